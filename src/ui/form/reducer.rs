use crate::forms::{FormErrors, TaskField, UserField};
use crate::mvi::Reducer;
use crate::ui::form::intent::FormIntent;
use crate::ui::form::state::{FormDialogState, FormKind};

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormDialogState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Open { kind, mode } => FormDialogState::Visible {
                kind,
                mode,
                focused: 0,
                errors: Default::default(),
            },
            FormIntent::Close => FormDialogState::Hidden,
            intent => match state {
                FormDialogState::Visible {
                    kind,
                    mode,
                    focused,
                    errors,
                } => {
                    let (kind, focused, errors) = edit(kind, focused, errors, intent);
                    FormDialogState::Visible {
                        kind,
                        mode,
                        focused,
                        errors,
                    }
                }
                hidden => hidden,
            },
        }
    }
}

fn edit(
    mut kind: FormKind,
    focused: usize,
    mut errors: FormErrors,
    intent: FormIntent,
) -> (FormKind, usize, FormErrors) {
    let count = kind.field_count();
    match intent {
        FormIntent::FocusNext => return (kind, (focused + 1) % count, errors),
        FormIntent::FocusPrev => {
            let prev = if focused == 0 { count - 1 } else { focused - 1 };
            return (kind, prev, errors);
        }
        FormIntent::Rejected(new_errors) => return (kind, focused, new_errors),
        _ => {}
    }

    let changed = match (&mut kind, intent) {
        (FormKind::Task(form), FormIntent::Insert(' '))
            if TaskField::ALL.get(focused) == Some(&TaskField::Completed) =>
        {
            form.completed = !form.completed;
            true
        }
        (FormKind::Task(form), FormIntent::Insert(ch)) => TaskField::ALL
            .get(focused)
            .and_then(|field| form.text_mut(*field))
            .map(|text| text.push(ch))
            .is_some(),
        (FormKind::Task(form), FormIntent::Backspace) => TaskField::ALL
            .get(focused)
            .and_then(|field| form.text_mut(*field))
            .map(|text| text.pop())
            .is_some(),
        (FormKind::Task(form), FormIntent::Cycle { options, direction })
            if TaskField::ALL.get(focused) == Some(&TaskField::AssignedUser) =>
        {
            match cycle(&options, &form.assigned_user_id, direction) {
                Some(next) => {
                    form.assigned_user_id = next;
                    true
                }
                None => false,
            }
        }
        (FormKind::User(form), FormIntent::Insert(ch)) => match UserField::ALL.get(focused) {
            Some(field) => {
                form.text_mut(*field).push(ch);
                true
            }
            None => false,
        },
        (FormKind::User(form), FormIntent::Backspace) => match UserField::ALL.get(focused) {
            Some(field) => {
                form.text_mut(*field).pop();
                true
            }
            None => false,
        },
        _ => false,
    };

    if changed {
        if let Some(key) = kind.field_key(focused) {
            errors.clear(key);
        }
    }
    (kind, focused, errors)
}

/// Next id in `options` after `current`, wrapping. An unknown or empty
/// `current` starts at the first (or last, going backwards) option.
fn cycle(options: &[String], current: &str, direction: i32) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|id| id == current) {
        Some(index) if direction.is_negative() => (index + len - 1) % len,
        Some(index) => (index + 1) % len,
        None if direction.is_negative() => len - 1,
        None => 0,
    };
    options.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{TaskForm, UserForm};
    use crate::mvi::dispatch;
    use crate::ui::form::state::FormMode;
    use chrono::NaiveDate;

    fn open_task() -> FormDialogState {
        let today = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        FormReducer::reduce(
            FormDialogState::Hidden,
            FormIntent::Open {
                kind: FormKind::Task(TaskForm::new(today)),
                mode: FormMode::Create,
            },
        )
    }

    fn task_form(state: &FormDialogState) -> &TaskForm {
        match state {
            FormDialogState::Visible {
                kind: FormKind::Task(form),
                ..
            } => form,
            other => panic!("expected task form, got {other:?}"),
        }
    }

    fn focus(state: &FormDialogState) -> usize {
        match state {
            FormDialogState::Visible { focused, .. } => *focused,
            FormDialogState::Hidden => usize::MAX,
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut state = open_task();
        for ch in "Plan".chars() {
            dispatch::<FormReducer>(&mut state, FormIntent::Insert(ch));
        }
        dispatch::<FormReducer>(&mut state, FormIntent::Backspace);
        dispatch::<FormReducer>(&mut state, FormIntent::FocusNext);
        dispatch::<FormReducer>(&mut state, FormIntent::Insert('d'));
        assert_eq!(task_form(&state).title, "Pla");
        assert_eq!(task_form(&state).description, "d");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = open_task();
        dispatch::<FormReducer>(&mut state, FormIntent::FocusPrev);
        assert_eq!(focus(&state), TaskField::ALL.len() - 1);
        dispatch::<FormReducer>(&mut state, FormIntent::FocusNext);
        assert_eq!(focus(&state), 0);
    }

    #[test]
    fn space_toggles_completion_checkbox() {
        let mut state = open_task();
        while state.focused_task_field() != Some(TaskField::Completed) {
            dispatch::<FormReducer>(&mut state, FormIntent::FocusNext);
        }
        dispatch::<FormReducer>(&mut state, FormIntent::Insert(' '));
        assert!(task_form(&state).completed);
    }

    #[test]
    fn user_picker_cycles_and_ignores_typing() {
        let mut state = open_task();
        while state.focused_task_field() != Some(TaskField::AssignedUser) {
            dispatch::<FormReducer>(&mut state, FormIntent::FocusNext);
        }
        let options = vec!["1".to_string(), "2".to_string()];
        dispatch::<FormReducer>(&mut state, FormIntent::Insert('x'));
        assert_eq!(task_form(&state).assigned_user_id, "");

        dispatch::<FormReducer>(
            &mut state,
            FormIntent::Cycle {
                options: options.clone(),
                direction: 1,
            },
        );
        assert_eq!(task_form(&state).assigned_user_id, "1");
        dispatch::<FormReducer>(
            &mut state,
            FormIntent::Cycle {
                options,
                direction: -1,
            },
        );
        assert_eq!(task_form(&state).assigned_user_id, "2");
    }

    #[test]
    fn editing_clears_that_fields_error() {
        let mut state = open_task();
        let mut errors = FormErrors::default();
        errors.push("title", "Title is required");
        errors.push("description", "Description is required");
        dispatch::<FormReducer>(&mut state, FormIntent::Rejected(errors));
        dispatch::<FormReducer>(&mut state, FormIntent::Insert('a'));
        match &state {
            FormDialogState::Visible { errors, .. } => {
                assert_eq!(errors.get("title"), None);
                assert!(errors.get("description").is_some());
            }
            FormDialogState::Hidden => panic!("dialog closed"),
        }
    }

    #[test]
    fn user_form_editing_and_close() {
        let mut state = FormReducer::reduce(
            FormDialogState::Hidden,
            FormIntent::Open {
                kind: FormKind::User(UserForm::default()),
                mode: FormMode::Edit("9".into()),
            },
        );
        assert_eq!(state.title(), "Edit User");
        dispatch::<FormReducer>(&mut state, FormIntent::Insert('A'));
        match &state {
            FormDialogState::Visible {
                kind: FormKind::User(form),
                ..
            } => assert_eq!(form.first_name, "A"),
            other => panic!("unexpected {other:?}"),
        }
        dispatch::<FormReducer>(&mut state, FormIntent::Close);
        assert!(!state.is_visible());
    }

    #[test]
    fn edits_on_hidden_dialog_are_ignored() {
        let state = FormReducer::reduce(FormDialogState::Hidden, FormIntent::Insert('a'));
        assert_eq!(state, FormDialogState::Hidden);
    }
}
