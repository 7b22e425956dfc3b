use std::sync::LazyLock;

use regex::Regex;

use super::{required, FormErrors};
use crate::model::{User, UserPayload};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
    Avatar,
}

impl UserField {
    pub const ALL: [UserField; 4] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::Email,
        UserField::Avatar,
    ];

    pub fn key(self) -> &'static str {
        match self {
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::Email => "email",
            UserField::Avatar => "avatar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "First Name",
            UserField::LastName => "Last Name",
            UserField::Email => "Email",
            UserField::Avatar => "Avatar URL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            avatar: user.avatar.clone().unwrap_or_default(),
        }
    }

    pub fn text(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Email => &self.email,
            UserField::Avatar => &self.avatar,
        }
    }

    pub fn text_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::Email => &mut self.email,
            UserField::Avatar => &mut self.avatar,
        }
    }

    pub fn validate(&self) -> Result<UserPayload, FormErrors> {
        let mut errors = FormErrors::default();
        required(
            &mut errors,
            UserField::FirstName.key(),
            &self.first_name,
            "First name is required",
        );
        required(
            &mut errors,
            UserField::LastName.key(),
            &self.last_name,
            "Last name is required",
        );
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(UserField::Email.key(), "Email is required");
        } else if !is_valid_email(email) {
            errors.push(UserField::Email.key(), "Please enter a valid email");
        }

        let avatar = self.avatar.trim();
        errors.into_result(UserPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.to_string(),
            avatar: (!avatar.is_empty()).then(|| avatar.to_string()),
        })
    }
}
