use chrono::NaiveDate;

use super::{required, FormErrors};
use crate::model::date::{parse_date, parse_input_date};
use crate::model::{Task, TaskPayload};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    AssignedUser,
    StartDate,
    EndDate,
    Completed,
}

impl TaskField {
    pub const ALL: [TaskField; 6] = [
        TaskField::Title,
        TaskField::Description,
        TaskField::AssignedUser,
        TaskField::StartDate,
        TaskField::EndDate,
        TaskField::Completed,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TaskField::Title => "title",
            TaskField::Description => "description",
            TaskField::AssignedUser => "assignedUserId",
            TaskField::StartDate => "startDate",
            TaskField::EndDate => "endDate",
            TaskField::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskField::Title => "Title",
            TaskField::Description => "Description",
            TaskField::AssignedUser => "Assigned User",
            TaskField::StartDate => "Start Date",
            TaskField::EndDate => "End Date",
            TaskField::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub assigned_user_id: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    pub completed: bool,
}

impl TaskForm {
    /// Blank form with both dates set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        let today = today.format(DATE_FORMAT).to_string();
        Self {
            start_date: today.clone(),
            end_date: today,
            ..Self::default()
        }
    }

    /// Prefilled from an existing task. Missing dates fall back to `today`.
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        let date_or_today = |raw: Option<&str>| {
            raw.and_then(parse_date)
                .unwrap_or(today)
                .format(DATE_FORMAT)
                .to_string()
        };
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            assigned_user_id: task.assigned_user_id.clone().unwrap_or_default(),
            start_date: date_or_today(task.start_date.as_deref()),
            end_date: date_or_today(task.end_date.as_deref()),
            completed: task.completed,
        }
    }

    pub fn text(&self, field: TaskField) -> Option<&str> {
        match field {
            TaskField::Title => Some(&self.title),
            TaskField::Description => Some(&self.description),
            TaskField::AssignedUser => Some(&self.assigned_user_id),
            TaskField::StartDate => Some(&self.start_date),
            TaskField::EndDate => Some(&self.end_date),
            TaskField::Completed => None,
        }
    }

    /// Mutable text of an editable field. The user picker and the
    /// completion flag are not free text.
    pub fn text_mut(&mut self, field: TaskField) -> Option<&mut String> {
        match field {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::StartDate => Some(&mut self.start_date),
            TaskField::EndDate => Some(&mut self.end_date),
            TaskField::AssignedUser | TaskField::Completed => None,
        }
    }

    pub fn validate(&self) -> Result<TaskPayload, FormErrors> {
        let mut errors = FormErrors::default();
        required(&mut errors, TaskField::Title.key(), &self.title, "Title is required");
        required(
            &mut errors,
            TaskField::Description.key(),
            &self.description,
            "Description is required",
        );
        required(
            &mut errors,
            TaskField::AssignedUser.key(),
            &self.assigned_user_id,
            "Please select a user",
        );

        let start = self.check_date(&mut errors, TaskField::StartDate, &self.start_date);
        let end = self.check_date(&mut errors, TaskField::EndDate, &self.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.push(TaskField::EndDate.key(), "End date must be after start date");
            }
        }

        errors.into_result(TaskPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            completed: self.completed,
            start_date: start.map(|d| d.format(DATE_FORMAT).to_string()),
            end_date: end.map(|d| d.format(DATE_FORMAT).to_string()),
            assigned_user_id: self.assigned_user_id.clone(),
        })
    }

    fn check_date(
        &self,
        errors: &mut FormErrors,
        field: TaskField,
        raw: &str,
    ) -> Option<NaiveDate> {
        if raw.trim().is_empty() {
            errors.push(field.key(), format!("{} is required", field.label()));
            return None;
        }
        let parsed = parse_input_date(raw);
        if parsed.is_none() {
            errors.push(field.key(), "Use the YYYY-MM-DD format");
        }
        parsed
    }
}
