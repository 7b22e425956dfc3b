use crate::forms::FormErrors;
use crate::mvi::Intent;
use crate::ui::form::state::{FormKind, FormMode};

#[derive(Debug, Clone)]
pub enum FormIntent {
    Open { kind: FormKind, mode: FormMode },
    Close,
    FocusNext,
    FocusPrev,
    /// Typed character. Space flips the completion checkbox when focused.
    Insert(char),
    Backspace,
    /// Left/Right on the assigned-user picker; `options` are user ids in
    /// display order.
    Cycle { options: Vec<String>, direction: i32 },
    /// Submit failed validation.
    Rejected(FormErrors),
}

impl Intent for FormIntent {}
