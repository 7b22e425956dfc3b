//! Spreadsheet export of the filtered task and user lists.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;
use tracing::info;

use crate::display::{assigned_user_name, status_label};
use crate::model::date::format_display;
use crate::model::{Task, User};

const SHEET_NAME: &str = "Sheet1";

pub const TASK_COLUMNS: [&str; 11] = [
    "Serial No",
    "Task ID",
    "Title",
    "Description",
    "Assigned User",
    "Start Date",
    "End Date",
    "Status",
    "Priority",
    "Created Date",
    "Updated Date",
];

pub const USER_COLUMNS: [&str; 5] = [
    "Serial No",
    "User ID",
    "First Name",
    "Last Name",
    "Email Address",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,

    #[error("Failed to build workbook: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("Failed to create export directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    fn width(&self) -> usize {
        match self {
            Cell::Number(n) => n.to_string().chars().count(),
            Cell::Text(s) => s.chars().count(),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Header row plus data rows, ready to be written to a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Per-column width: the longer of the header and the widest cell.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::width)
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_workbook(&self) -> Result<Workbook, ExportError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }
        for (index, row) in self.rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Number(n) => worksheet.write_number(row_num, col as u16, *n)?,
                    Cell::Text(s) => worksheet.write_string(row_num, col as u16, s)?,
                };
            }
        }
        for (col, width) in self.column_widths().into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }
        Ok(workbook)
    }

    /// Serialized `.xlsx` bytes.
    pub fn to_buffer(&self) -> Result<Vec<u8>, ExportError> {
        Ok(self.to_workbook()?.save_to_buffer()?)
    }

    /// Writes `<dir>/<file_name>`, creating `dir` if needed.
    pub fn save(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
        if self.is_empty() {
            return Err(ExportError::Empty);
        }
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(file_name);
        self.to_workbook()?.save(&path)?;
        info!(path = %path.display(), rows = self.rows.len(), "Export written");
        Ok(path)
    }
}

pub fn task_sheet(tasks: &[&Task], users: &[User]) -> Sheet {
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            vec![
                Cell::Number((index + 1) as f64),
                task.id.as_str().into(),
                task.title.as_str().into(),
                task.description.as_str().into(),
                assigned_user_name(task, users).into(),
                format_display(task.start_date.as_deref()).into(),
                format_display(task.end_date.as_deref()).into(),
                status_label(task.completed).into(),
                task.priority.as_deref().unwrap_or("Normal").into(),
                format_display(task.created_at.as_deref()).into(),
                format_display(task.updated_at.as_deref()).into(),
            ]
        })
        .collect();
    Sheet {
        headers: TASK_COLUMNS.to_vec(),
        rows,
    }
}

pub fn user_sheet(users: &[&User]) -> Sheet {
    let rows = users
        .iter()
        .enumerate()
        .map(|(index, user)| {
            vec![
                Cell::Number((index + 1) as f64),
                user.id.as_str().into(),
                user.first_name.as_str().into(),
                user.last_name.as_str().into(),
                user.email.as_deref().unwrap_or_default().into(),
            ]
        })
        .collect();
    Sheet {
        headers: USER_COLUMNS.to_vec(),
        rows,
    }
}

/// `<prefix>-export-YYYY-MM-DD.xlsx`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-export-{}.xlsx", date.format("%Y-%m-%d"))
}
