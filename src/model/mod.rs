//! Task and user records exchanged with the mock API.

pub mod date;
mod lenient;
mod task;
mod user;

pub use task::{Task, TaskPatch, TaskPayload};
pub use user::{User, UserPayload};
