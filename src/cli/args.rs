use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::store::StatusFilter;

#[derive(Debug, Parser)]
#[command(
    name = "deskboard",
    version,
    about = "Admin dashboard for tasks and users",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: <config dir>/deskboard/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL", env = "DESKBOARD_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Retries for network and timeout failures
    #[arg(long, global = true, value_name = "N")]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Interactive mode: no subcommand or `tui`.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Tui))
    }

    /// Reads the config file and applies flag overrides on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_seconds = timeout;
        }
        if let Some(retries) = self.retries {
            config.api.max_retries = retries;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Interactive dashboard (default)
    Tui,
    /// Print task statistics
    Dashboard,
    #[command(subcommand)]
    Tasks(TaskCommand),
    #[command(subcommand)]
    Users(UserCommand),
    /// Check that the API is reachable
    Health,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum TaskCommand {
    /// List tasks with local search, status filter and paging
    List(TaskListArgs),
    Show {
        id: String,
    },
    Add(TaskFieldArgs),
    /// Change the given fields of a task
    Edit {
        id: String,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
    /// Flip a task between completed and pending
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Write the filtered task list to an .xlsx file
    Export {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Target directory (default: config export directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Tasks assigned to one user
    ByUser {
        user_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum UserCommand {
    List(PageArgs),
    Show {
        id: String,
    },
    Add(UserFieldArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: UserFieldArgs,
    },
    Delete {
        id: String,
    },
    Export {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Server-side name search
    Search {
        term: String,
    },
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct TaskListArgs {
    #[arg(long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct PageArgs {
    /// Case-insensitive substring match
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// One of 10, 25, 50, 100
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<usize>,
}

/// Task fields; unset ones keep the current or default value.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct TaskFieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Assigned user id
    #[arg(long = "user", value_name = "USER_ID")]
    pub assigned_user_id: Option<String>,
    /// Start date, YYYY-MM-DD
    #[arg(long = "start", value_name = "DATE")]
    pub start_date: Option<String>,
    /// End date, YYYY-MM-DD
    #[arg(long = "end", value_name = "DATE")]
    pub end_date: Option<String>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct UserFieldArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Avatar image URL
    #[arg(long)]
    pub avatar: Option<String>,
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if crate::store::PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "page size must be one of {:?}",
            crate::store::PAGE_SIZE_OPTIONS
        ))
    }
}
