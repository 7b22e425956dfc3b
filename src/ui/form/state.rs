use crate::forms::{FormErrors, TaskField, TaskForm, UserField, UserForm};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the record with this id.
    Edit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    Task(TaskForm),
    User(UserForm),
}

impl FormKind {
    pub fn field_count(&self) -> usize {
        match self {
            FormKind::Task(_) => TaskField::ALL.len(),
            FormKind::User(_) => UserField::ALL.len(),
        }
    }

    pub fn field_key(&self, index: usize) -> Option<&'static str> {
        match self {
            FormKind::Task(_) => TaskField::ALL.get(index).map(|f| f.key()),
            FormKind::User(_) => UserField::ALL.get(index).map(|f| f.key()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormDialogState {
    #[default]
    Hidden,
    Visible {
        kind: FormKind,
        mode: FormMode,
        focused: usize,
        errors: FormErrors,
    },
}

impl UiState for FormDialogState {}

impl FormDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Visible { kind, mode, .. } => match (kind, mode) {
                (FormKind::Task(_), FormMode::Create) => "Add Task",
                (FormKind::Task(_), FormMode::Edit(_)) => "Edit Task",
                (FormKind::User(_), FormMode::Create) => "Add User",
                (FormKind::User(_), FormMode::Edit(_)) => "Edit User",
            },
        }
    }

    /// Focused task field, when a task form is open.
    pub fn focused_task_field(&self) -> Option<TaskField> {
        match self {
            Self::Visible {
                kind: FormKind::Task(_),
                focused,
                ..
            } => TaskField::ALL.get(*focused).copied(),
            _ => None,
        }
    }
}
