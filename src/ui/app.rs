use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Config;
use crate::export::{export_file_name, task_sheet, user_sheet};
use crate::forms::{TaskForm, UserForm};
use crate::model::{Task, User};
use crate::mvi::dispatch;
use crate::notify::Notifications;
use crate::query::{filter_tasks, filter_users, paginate, total_pages};
use crate::stats::TaskStats;
use crate::store::{
    step_page_size, ResourceIntent, TaskFilterPatch, TaskIntent, TaskReducer, TaskState,
    UserFilterPatch, UserIntent, UserReducer, UserState,
};
use crate::ui::form::{FormDialogState, FormIntent, FormKind, FormMode, FormReducer};
use crate::ui::worker::{ResourceOp, UiCommand, UiCommandSender};

const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen {
    Dashboard,
    Tasks,
    Users,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Dashboard, Screen::Tasks, Screen::Users];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Tasks => "Tasks",
            Screen::Users => "Users",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Screen::Dashboard => Screen::Tasks,
            Screen::Tasks => Screen::Users,
            Screen::Users => Screen::Dashboard,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewMode {
    Table,
    Cards,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Main,
    Search,
    Form,
    ConfirmDelete,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeleteTarget {
    Task { id: String, title: String },
    User { id: String, name: String },
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        match self {
            DeleteTarget::Task { title, .. } => format!("Delete task \"{title}\"?"),
            DeleteTarget::User { name, .. } => format!("Delete user \"{name}\"?"),
        }
    }
}

pub struct App {
    should_quit: bool,
    screen: Screen,
    view_mode: ViewMode,
    focus: Focus,
    tasks: TaskState,
    users: UserState,
    /// Row index within the visible page.
    task_selection: usize,
    user_selection: usize,
    form: FormDialogState,
    pending_delete: Option<DeleteTarget>,
    notifications: Notifications,
    /// `None` until the first probe returns.
    health: Option<bool>,
    commands: Option<UiCommandSender>,
    export_dir: PathBuf,
    last_health_check: Instant,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let page_size = config.ui.page_size;
        Self {
            should_quit: false,
            screen: Screen::Dashboard,
            view_mode: ViewMode::Table,
            focus: Focus::Main,
            tasks: TaskState::with_page_size(page_size),
            users: UserState::with_page_size(page_size),
            task_selection: 0,
            user_selection: 0,
            form: FormDialogState::default(),
            pending_delete: None,
            notifications: Notifications::new(Duration::from_secs(
                config.ui.notification_seconds,
            )),
            health: None,
            commands: None,
            export_dir: config
                .export
                .directory
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            last_health_check: Instant::now(),
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.commands = Some(sender);
    }

    /// Initial load: both lists and a connectivity probe.
    pub fn start(&mut self) {
        self.refresh();
        self.send_command(UiCommand::CheckHealth);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn next_screen(&mut self) {
        self.screen = self.screen.next();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Table => ViewMode::Cards,
            ViewMode::Cards => ViewMode::Table,
        };
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn tasks(&self) -> &TaskState {
        &self.tasks
    }

    pub fn users(&self) -> &UserState {
        &self.users
    }

    pub fn form(&self) -> &FormDialogState {
        &self.form
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.pending_delete.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn health(&self) -> Option<bool> {
        self.health
    }

    pub fn is_loading(&self) -> bool {
        self.tasks.loading || self.users.loading
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::calculate(&self.tasks.items, today())
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks.items, &self.tasks.filters)
    }

    pub fn filtered_users(&self) -> Vec<&User> {
        filter_users(&self.users.items, &self.users.filters.search)
    }

    /// Selected row on the active list screen, within the visible page.
    pub fn selection(&self) -> usize {
        match self.screen {
            Screen::Users => self.user_selection,
            _ => self.task_selection,
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let filtered = self.filtered_tasks();
        let page = paginate(&filtered, self.tasks.page, self.tasks.page_size);
        page.items.get(self.task_selection).copied()
    }

    pub fn selected_user(&self) -> Option<&User> {
        let filtered = self.filtered_users();
        let page = paginate(&filtered, self.users.page, self.users.page_size);
        page.items.get(self.user_selection).copied()
    }

    fn visible_task_rows(&self) -> usize {
        let filtered = self.filtered_tasks();
        paginate(&filtered, self.tasks.page, self.tasks.page_size)
            .items
            .len()
    }

    fn visible_user_rows(&self) -> usize {
        let filtered = self.filtered_users();
        paginate(&filtered, self.users.page, self.users.page_size)
            .items
            .len()
    }

    fn visible_rows(&self) -> usize {
        match self.screen {
            Screen::Dashboard => 0,
            Screen::Tasks => self.visible_task_rows(),
            Screen::Users => self.visible_user_rows(),
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        let rows = self.visible_rows();
        let selection = match self.screen {
            Screen::Dashboard => return,
            Screen::Tasks => &mut self.task_selection,
            Screen::Users => &mut self.user_selection,
        };
        if rows == 0 {
            *selection = 0;
            return;
        }
        *selection = if delta.is_negative() {
            selection.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (*selection + delta as usize).min(rows - 1)
        };
    }

    /// Pulls the task page and row back inside the filtered list after it
    /// shrank.
    fn clamp_tasks_view(&mut self) {
        let pages = total_pages(self.filtered_tasks().len(), self.tasks.page_size).max(1);
        if self.tasks.page > pages {
            dispatch::<TaskReducer>(&mut self.tasks, TaskIntent::SetPage(pages));
        }
        let max = self.visible_task_rows().saturating_sub(1);
        self.task_selection = self.task_selection.min(max);
    }

    fn clamp_users_view(&mut self) {
        let pages = total_pages(self.filtered_users().len(), self.users.page_size).max(1);
        if self.users.page > pages {
            dispatch::<UserReducer>(&mut self.users, UserIntent::SetPage(pages));
        }
        let max = self.visible_user_rows().saturating_sub(1);
        self.user_selection = self.user_selection.min(max);
    }

    /// Moves one page in `direction`, staying within the filtered list.
    pub fn change_page(&mut self, direction: i32) {
        match self.screen {
            Screen::Dashboard => {}
            Screen::Tasks => {
                let pages = total_pages(self.filtered_tasks().len(), self.tasks.page_size).max(1);
                let page = step_page(self.tasks.page, direction, pages);
                dispatch::<TaskReducer>(&mut self.tasks, TaskIntent::SetPage(page));
                self.task_selection = 0;
            }
            Screen::Users => {
                let pages = total_pages(self.filtered_users().len(), self.users.page_size).max(1);
                let page = step_page(self.users.page, direction, pages);
                dispatch::<UserReducer>(&mut self.users, UserIntent::SetPage(page));
                self.user_selection = 0;
            }
        }
    }

    pub fn cycle_page_size(&mut self, direction: i32) {
        match self.screen {
            Screen::Dashboard => {}
            Screen::Tasks => {
                let size = step_page_size(self.tasks.page_size, direction);
                dispatch::<TaskReducer>(&mut self.tasks, TaskIntent::SetPageSize(size));
                self.task_selection = 0;
            }
            Screen::Users => {
                let size = step_page_size(self.users.page_size, direction);
                dispatch::<UserReducer>(&mut self.users, UserIntent::SetPageSize(size));
                self.user_selection = 0;
            }
        }
    }

    pub fn cycle_status_filter(&mut self) {
        if self.screen != Screen::Tasks {
            return;
        }
        let status = self.tasks.filters.status.next();
        dispatch::<TaskReducer>(
            &mut self.tasks,
            TaskIntent::SetFilters(TaskFilterPatch {
                status: Some(status),
                ..TaskFilterPatch::default()
            }),
        );
        self.task_selection = 0;
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn begin_search(&mut self) {
        if matches!(self.screen, Screen::Tasks | Screen::Users) {
            self.focus = Focus::Search;
        }
    }

    /// Current search term of the active list screen.
    pub fn search_term(&self) -> &str {
        match self.screen {
            Screen::Users => &self.users.filters.search,
            _ => &self.tasks.filters.search,
        }
    }

    fn set_search(&mut self, term: String) {
        match self.screen {
            Screen::Tasks => {
                dispatch::<TaskReducer>(
                    &mut self.tasks,
                    TaskIntent::SetFilters(TaskFilterPatch {
                        search: Some(term),
                        ..TaskFilterPatch::default()
                    }),
                );
                self.task_selection = 0;
            }
            Screen::Users => {
                dispatch::<UserReducer>(
                    &mut self.users,
                    UserIntent::SetFilters(UserFilterPatch { search: Some(term) }),
                );
                self.user_selection = 0;
            }
            Screen::Dashboard => {}
        }
    }

    pub fn search_insert(&mut self, ch: char) {
        let mut term = self.search_term().to_string();
        term.push(ch);
        self.set_search(term);
    }

    pub fn search_backspace(&mut self) {
        let mut term = self.search_term().to_string();
        term.pop();
        self.set_search(term);
    }

    pub fn finish_search(&mut self) {
        self.focus = Focus::Main;
    }

    pub fn cancel_search(&mut self) {
        self.set_search(String::new());
        self.focus = Focus::Main;
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    pub fn dispatch_form(&mut self, intent: FormIntent) {
        dispatch::<FormReducer>(&mut self.form, intent);
    }

    pub fn open_add_form(&mut self) {
        let kind = match self.screen {
            Screen::Dashboard => return,
            Screen::Tasks => FormKind::Task(TaskForm::new(today())),
            Screen::Users => FormKind::User(UserForm::default()),
        };
        self.dispatch_form(FormIntent::Open {
            kind,
            mode: FormMode::Create,
        });
        self.focus = Focus::Form;
    }

    pub fn open_edit_form(&mut self) {
        let opened = match self.screen {
            Screen::Dashboard => None,
            Screen::Tasks => self.selected_task().map(|task| {
                (
                    FormKind::Task(TaskForm::from_task(task, today())),
                    task.id.clone(),
                )
            }),
            Screen::Users => self
                .selected_user()
                .map(|user| (FormKind::User(UserForm::from_user(user)), user.id.clone())),
        };
        let Some((kind, id)) = opened else {
            return;
        };
        self.dispatch_form(FormIntent::Open {
            kind,
            mode: FormMode::Edit(id),
        });
        self.focus = Focus::Form;
    }

    /// Ids offered by the assigned-user picker.
    pub fn user_options(&self) -> Vec<String> {
        self.users.items.iter().map(|user| user.id.clone()).collect()
    }

    pub fn close_form(&mut self) {
        self.dispatch_form(FormIntent::Close);
        self.focus = Focus::Main;
    }

    /// Validates the open form; sends the request or shows field errors.
    pub fn submit_form(&mut self) {
        let FormDialogState::Visible { kind, mode, .. } = &self.form else {
            return;
        };
        let result = match kind {
            FormKind::Task(form) => form.validate().map(|payload| match mode {
                FormMode::Create => UiCommand::CreateTask(payload),
                FormMode::Edit(id) => UiCommand::UpdateTask {
                    id: id.clone(),
                    payload,
                },
            }),
            FormKind::User(form) => form.validate().map(|payload| match mode {
                FormMode::Create => UiCommand::CreateUser(payload),
                FormMode::Edit(id) => UiCommand::UpdateUser {
                    id: id.clone(),
                    payload,
                },
            }),
        };
        match result {
            Ok(command) => {
                self.close_form();
                self.send_command(command);
            }
            Err(errors) => {
                debug!(%errors, "form rejected");
                self.dispatch_form(FormIntent::Rejected(errors));
            }
        }
    }

    // ------------------------------------------------------------------
    // Row actions
    // ------------------------------------------------------------------

    pub fn request_delete(&mut self) {
        let target = match self.screen {
            Screen::Dashboard => None,
            Screen::Tasks => self.selected_task().map(|task| DeleteTarget::Task {
                id: task.id.clone(),
                title: task.title.clone(),
            }),
            Screen::Users => self.selected_user().map(|user| DeleteTarget::User {
                id: user.id.clone(),
                name: user.display_name(),
            }),
        };
        if let Some(target) = target {
            self.pending_delete = Some(target);
            self.focus = Focus::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.focus = Focus::Main;
        let Some(target) = self.pending_delete.take() else {
            return;
        };
        let command = match target {
            DeleteTarget::Task { id, .. } => UiCommand::DeleteTask { id },
            DeleteTarget::User { id, .. } => UiCommand::DeleteUser { id },
        };
        self.send_command(command);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.focus = Focus::Main;
    }

    pub fn toggle_selected_task(&mut self) {
        if self.screen != Screen::Tasks {
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        let command = UiCommand::ToggleTask {
            id: task.id.clone(),
            completed: !task.completed,
        };
        self.send_command(command);
    }

    /// Writes the filtered list of the active screen to a spreadsheet.
    pub fn export_current(&mut self) {
        let (prefix, noun, result) = match self.screen {
            Screen::Dashboard => return,
            Screen::Tasks => {
                let filtered = self.filtered_tasks();
                let sheet = task_sheet(&filtered, &self.users.items);
                let count = filtered.len();
                let file = export_file_name("tasks", today());
                ("tasks", "tasks", sheet.save(&self.export_dir, &file).map(|p| (p, count)))
            }
            Screen::Users => {
                let filtered = self.filtered_users();
                let sheet = user_sheet(&filtered);
                let count = filtered.len();
                let file = export_file_name("users", today());
                ("users", "users", sheet.save(&self.export_dir, &file).map(|p| (p, count)))
            }
        };
        match result {
            Ok((path, count)) => {
                info!(path = %path.display(), prefix, "exported");
                self.notifications
                    .success("Export Successful", format!("{count} {noun} exported to Excel"));
            }
            Err(err) => self.notifications.error("Export Failed", err.to_string()),
        }
    }

    pub fn refresh(&mut self) {
        self.send_command(UiCommand::FetchTasks);
        self.send_command(UiCommand::FetchUsers);
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn on_tick(&mut self) {
        self.notifications.prune(Instant::now());
        if self.last_health_check.elapsed() >= HEALTH_INTERVAL {
            self.last_health_check = Instant::now();
            self.send_command(UiCommand::CheckHealth);
        }
    }

    pub fn on_tasks_result(&mut self, op: ResourceOp, intent: TaskIntent) {
        match (&intent, op) {
            (ResourceIntent::Rejected(message), op) => {
                let title = match op {
                    ResourceOp::Fetch => "Failed to load tasks",
                    ResourceOp::Create => "Failed to create task",
                    ResourceOp::Update => "Failed to update task",
                    ResourceOp::Toggle(_) => "Failed to update task status",
                    ResourceOp::Delete => "Failed to delete task",
                };
                self.notifications.error(title, message.clone());
            }
            (_, ResourceOp::Create) => {
                self.notifications.success("Success", "Task created successfully")
            }
            (_, ResourceOp::Update) => {
                self.notifications.success("Success", "Task updated successfully")
            }
            (_, ResourceOp::Toggle(true)) => {
                self.notifications.success("Success", "Task marked as completed")
            }
            (_, ResourceOp::Toggle(false)) => {
                self.notifications.success("Success", "Task marked as pending")
            }
            (_, ResourceOp::Delete) => {
                self.notifications.success("Success", "Task deleted successfully")
            }
            (_, ResourceOp::Fetch) => {}
        }
        dispatch::<TaskReducer>(&mut self.tasks, intent);
        self.clamp_tasks_view();
    }

    pub fn on_users_result(&mut self, op: ResourceOp, intent: UserIntent) {
        match (&intent, op) {
            (ResourceIntent::Rejected(message), op) => {
                let title = match op {
                    ResourceOp::Fetch => "Failed to load users",
                    ResourceOp::Create => "Failed to create user",
                    ResourceOp::Update | ResourceOp::Toggle(_) => "Failed to update user",
                    ResourceOp::Delete => "Failed to delete user",
                };
                self.notifications.error(title, message.clone());
            }
            (_, ResourceOp::Create) => {
                self.notifications.success("Success", "User created successfully")
            }
            (_, ResourceOp::Update) => {
                self.notifications.success("Success", "User updated successfully")
            }
            (_, ResourceOp::Delete) => {
                self.notifications.success("Success", "User deleted successfully")
            }
            (_, ResourceOp::Fetch | ResourceOp::Toggle(_)) => {}
        }
        dispatch::<UserReducer>(&mut self.users, intent);
        self.clamp_users_view();
    }

    pub fn on_health(&mut self, online: bool) {
        self.health = Some(online);
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.commands else {
            return false;
        };
        let store = pending_store(&command);

        match sender.try_send(command) {
            Ok(()) => {
                match store {
                    Some(Screen::Tasks) => {
                        dispatch::<TaskReducer>(&mut self.tasks, TaskIntent::Pending)
                    }
                    Some(Screen::Users) => {
                        dispatch::<UserReducer>(&mut self.users, UserIntent::Pending)
                    }
                    _ => {}
                }
                true
            }
            Err(err) => {
                self.notifications
                    .error("Error", format!("Request could not be queued: {}", err));
                false
            }
        }
    }
}

/// Store that shows a loading state while `command` runs. Toggles update
/// in place without one.
fn pending_store(command: &UiCommand) -> Option<Screen> {
    match command {
        UiCommand::FetchTasks
        | UiCommand::CreateTask(_)
        | UiCommand::UpdateTask { .. }
        | UiCommand::DeleteTask { .. } => Some(Screen::Tasks),
        UiCommand::FetchUsers
        | UiCommand::CreateUser(_)
        | UiCommand::UpdateUser { .. }
        | UiCommand::DeleteUser { .. } => Some(Screen::Users),
        UiCommand::ToggleTask { .. } | UiCommand::CheckHealth => None,
    }
}

fn step_page(current: usize, direction: i32, pages: usize) -> usize {
    if direction.is_negative() {
        current.saturating_sub(1).max(1)
    } else {
        (current + 1).min(pages)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: format!("about {title}"),
            completed,
            ..Task::default()
        }
    }

    fn app_with_channel() -> (App, mpsc::Receiver<UiCommand>) {
        let (tx, rx) = mpsc::channel(16);
        let mut app = App::new(&Config::default());
        app.set_command_sender(tx);
        (app, rx)
    }

    fn load_tasks(app: &mut App, count: usize) {
        let tasks = (1..=count)
            .map(|i| task(&i.to_string(), &format!("task {i}"), i % 2 == 0))
            .collect();
        app.on_tasks_result(ResourceOp::Fetch, TaskIntent::ListLoaded(tasks));
    }

    #[test]
    fn start_requests_lists_and_health() {
        let (mut app, mut rx) = app_with_channel();
        app.start();
        assert_eq!(rx.try_recv().unwrap(), UiCommand::FetchTasks);
        assert_eq!(rx.try_recv().unwrap(), UiCommand::FetchUsers);
        assert_eq!(rx.try_recv().unwrap(), UiCommand::CheckHealth);
        assert!(app.tasks().loading);
        assert!(app.users().loading);
    }

    #[test]
    fn toggle_does_not_mark_loading() {
        let (mut app, mut rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 3);
        app.toggle_selected_task();
        assert_eq!(
            rx.try_recv().unwrap(),
            UiCommand::ToggleTask {
                id: "1".into(),
                completed: true
            }
        );
        assert!(!app.tasks().loading);
    }

    #[test]
    fn paging_stays_within_filtered_list() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 23);
        app.change_page(1);
        app.change_page(1);
        app.change_page(1);
        assert_eq!(app.tasks().page, 3);
        app.move_selection(10);
        assert_eq!(app.selection(), 2);
        assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("23"));
        app.change_page(-1);
        assert_eq!(app.tasks().page, 2);
        assert_eq!(app.selection(), 0);
    }

    #[test]
    fn deleting_last_row_of_last_page_steps_back() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 11);
        app.change_page(1);
        assert_eq!(app.tasks().page, 2);

        app.on_tasks_result(ResourceOp::Delete, TaskIntent::Deleted("11".into()));

        assert_eq!(app.tasks().page, 1);
        assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("1"));
    }

    #[test]
    fn users_refetch_clamps_users_page_from_another_screen() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Users);
        let users = |count: usize| -> Vec<User> {
            (1..=count)
                .map(|i| User {
                    id: i.to_string(),
                    first_name: format!("user{i}"),
                    ..User::default()
                })
                .collect()
        };
        app.on_users_result(ResourceOp::Fetch, UserIntent::ListLoaded(users(25)));
        app.change_page(1);
        app.change_page(1);
        app.move_selection(3);
        app.set_screen(Screen::Dashboard);

        app.on_users_result(ResourceOp::Fetch, UserIntent::ListLoaded(users(12)));

        app.set_screen(Screen::Users);
        assert_eq!(app.users().page, 2);
        assert_eq!(app.selection(), 1);
        assert_eq!(app.selected_user().map(|u| u.id.as_str()), Some("12"));
    }

    #[test]
    fn page_size_cycles_and_resets_page() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 30);
        app.change_page(1);
        app.cycle_page_size(1);
        assert_eq!(app.tasks().page_size, 25);
        assert_eq!(app.tasks().page, 1);
    }

    #[test]
    fn search_filters_live_and_cancel_clears() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 12);
        app.begin_search();
        assert_eq!(app.focus(), Focus::Search);
        for ch in "task 1".chars() {
            app.search_insert(ch);
        }
        // "task 1", "task 10", "task 11", "task 12"
        assert_eq!(app.filtered_tasks().len(), 4);
        app.cancel_search();
        assert_eq!(app.search_term(), "");
        assert_eq!(app.filtered_tasks().len(), 12);
    }

    #[test]
    fn status_filter_cycles() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 4);
        app.cycle_status_filter();
        assert_eq!(app.filtered_tasks().len(), 2);
        assert!(app.filtered_tasks().iter().all(|t| t.completed));
    }

    #[test]
    fn invalid_form_stays_open_with_errors() {
        let (mut app, mut rx) = app_with_channel();
        app.set_screen(Screen::Users);
        app.open_add_form();
        app.submit_form();
        assert_eq!(app.focus(), Focus::Form);
        assert!(rx.try_recv().is_err());
        match app.form() {
            FormDialogState::Visible { errors, .. } => {
                assert_eq!(errors.get("first_name"), Some("First name is required"));
            }
            FormDialogState::Hidden => panic!("form closed"),
        }
    }

    #[test]
    fn valid_edit_form_sends_update() {
        let (mut app, mut rx) = app_with_channel();
        app.set_screen(Screen::Users);
        let user = User {
            id: "8".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            ..User::default()
        };
        app.on_users_result(ResourceOp::Fetch, UserIntent::ListLoaded(vec![user]));
        app.open_edit_form();
        app.submit_form();
        assert_eq!(app.focus(), Focus::Main);
        match rx.try_recv().unwrap() {
            UiCommand::UpdateUser { id, payload } => {
                assert_eq!(id, "8");
                assert_eq!(payload.email, "ada@example.com");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(app.users().loading);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, mut rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 2);
        app.request_delete();
        assert_eq!(app.focus(), Focus::ConfirmDelete);
        assert!(rx.try_recv().is_err());
        app.confirm_delete();
        assert_eq!(
            rx.try_recv().unwrap(),
            UiCommand::DeleteTask { id: "1".into() }
        );
        assert!(app.pending_delete().is_none());
    }

    #[test]
    fn results_raise_notifications() {
        let (mut app, _rx) = app_with_channel();
        app.on_tasks_result(ResourceOp::Create, TaskIntent::Created(task("9", "new", false)));
        assert_eq!(
            app.notifications().latest().map(|n| n.message.as_str()),
            Some("Task created successfully")
        );
        app.on_tasks_result(
            ResourceOp::Toggle(false),
            TaskIntent::Toggled(task("9", "new", false)),
        );
        assert_eq!(
            app.notifications().latest().map(|n| n.message.as_str()),
            Some("Task marked as pending")
        );
        app.on_users_result(
            ResourceOp::Delete,
            UserIntent::Rejected("Resource not found".into()),
        );
        let latest = app.notifications().latest().unwrap();
        assert_eq!(latest.title, "Failed to delete user");
        assert_eq!(latest.message, "Resource not found");
        assert_eq!(app.users().error.as_deref(), Some("Resource not found"));
    }

    #[test]
    fn selection_clamps_after_delete() {
        let (mut app, _rx) = app_with_channel();
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 3);
        app.move_selection(2);
        app.on_tasks_result(ResourceOp::Delete, TaskIntent::Deleted("3".into()));
        assert_eq!(app.selection(), 1);
    }

    #[test]
    fn without_worker_commands_are_dropped() {
        let mut app = App::new(&Config::default());
        app.start();
        assert!(!app.tasks().loading);
    }

    #[test]
    fn export_writes_filtered_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.directory = Some(dir.path().display().to_string());
        let mut app = App::new(&config);
        app.set_screen(Screen::Tasks);
        load_tasks(&mut app, 5);
        app.cycle_status_filter();
        app.export_current();
        assert_eq!(
            app.notifications().latest().map(|n| n.message.as_str()),
            Some("2 tasks exported to Excel")
        );
        let file = dir.path().join(export_file_name("tasks", today()));
        assert!(file.exists());
    }
}
