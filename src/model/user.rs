use serde::{Deserialize, Serialize};

use super::lenient::{self, pick};

/// A user record, with name spellings merged at decode time.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawUser")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Display name as reported by the server or derived by the store.
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// `name` when present, otherwise "first last".
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.full_name(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Fills in the derived name and, when missing, a placeholder email.
    pub fn with_derived_profile(mut self) -> Self {
        self.name = Some(self.full_name());
        if self.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            self.email = Some(format!(
                "{}.{}@example.com",
                self.first_name.to_lowercase(),
                self.last_name.to_lowercase()
            ));
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawUser {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    first_name: Option<String>,
    #[serde(default, rename = "firstName", deserialize_with = "lenient::string")]
    first_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    last_name: Option<String>,
    #[serde(default, rename = "lastName", deserialize_with = "lenient::string")]
    last_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    avatar: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        User {
            id: raw.id.unwrap_or_default(),
            first_name: pick(raw.first_name, raw.first_name_camel).unwrap_or_default(),
            last_name: pick(raw.last_name, raw.last_name_camel).unwrap_or_default(),
            name: pick(raw.name, None),
            email: pick(raw.email, None),
            avatar: pick(raw.avatar, None),
        }
    }
}

/// Body sent on user create (POST) and update (PUT).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            avatar: user.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camel_case_names_are_accepted() {
        let user: User = serde_json::from_value(json!({
            "id": "3",
            "firstName": "Grace",
            "lastName": "Hopper"
        }))
        .unwrap();
        assert_eq!(user.first_name, "Grace");
        assert_eq!(user.display_name(), "Grace Hopper");
    }

    #[test]
    fn server_name_wins_for_display() {
        let user = User {
            first_name: "A".into(),
            last_name: "B".into(),
            name: Some("Alias".into()),
            ..User::default()
        };
        assert_eq!(user.display_name(), "Alias");
    }

    #[test]
    fn derived_profile_fills_missing_email() {
        let user = User {
            id: "1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..User::default()
        }
        .with_derived_profile();
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.email.as_deref(), Some("ada.lovelace@example.com"));
    }

    #[test]
    fn derived_profile_keeps_existing_email() {
        let user = User {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@math.org".into()),
            ..User::default()
        }
        .with_derived_profile();
        assert_eq!(user.email.as_deref(), Some("ada@math.org"));
    }

    #[test]
    fn payload_uses_snake_case_names() {
        let payload = UserPayload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@math.org".into(),
            avatar: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada@math.org" })
        );
    }
}
