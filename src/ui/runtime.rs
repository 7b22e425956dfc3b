use crate::api::Api;
use crate::config::Config;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::spawn_worker;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

/// Runs the dashboard until the user quits. API calls execute on `handle`.
pub fn run(config: &Config, api: Api, handle: &Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(10));
    let events = EventHandler::new(tick_rate);
    let mut app = App::new(config);
    app.set_command_sender(spawn_worker(handle, api, events.sender()));
    app.start();
    info!("dashboard started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(event) => apply_event(&mut app, event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    info!("dashboard closed");
    Ok(())
}

fn apply_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Input(key) => handle_key(app, key),
        AppEvent::Tick => app.on_tick(),
        // Next draw picks up the new size.
        AppEvent::Resize => {}
        AppEvent::Tasks { op, intent } => app.on_tasks_result(op, intent),
        AppEvent::Users { op, intent } => app.on_users_result(op, intent),
        AppEvent::Health(online) => app.on_health(online),
    }
}
