//! SweeperKeeper terminal client

mod logging;
mod ui;

use anyhow::Context;
use sweeperkeeper_app::{notifications, App, NotificationQueue};
use sweeperkeeper_core::ClientConfig;
use sweeperkeeper_networking::SweeperClient;
use ui::{LoginField, UiState, UserEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init()?;
    tracing::info!("Starting SweeperKeeper v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    tracing::info!("Backend: {}", config.base_url);
    let client = SweeperClient::new(config).context("invalid backend configuration")?;

    let (notifier, queue) = notifications::channel();
    let app = App::new(client, notifier);

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, app, queue).await;
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    mut app: App,
    mut queue: NotificationQueue,
) -> anyhow::Result<()> {
    let mut state = UiState::default();

    loop {
        if state.wants_notice() {
            if let Some(notice) = queue.try_next() {
                state.show_notice(notice);
            }
        }

        let snap = app.snapshot().await;
        terminal.draw(|f| ui::draw(f, &mut state, &snap))?;

        match ui::next_event(&mut state, &snap)? {
            UserEvent::Quit => break,
            UserEvent::Tick | UserEvent::Redraw => {}
            UserEvent::Type(field, c) => match field {
                LoginField::Username => app.login_screen_mut().username.push(c),
                LoginField::Password => app.login_screen_mut().password.push(c),
            },
            UserEvent::Backspace(field) => {
                match field {
                    LoginField::Username => app.login_screen_mut().username.pop(),
                    LoginField::Password => app.login_screen_mut().password.pop(),
                };
            }
            UserEvent::TogglePassword => app.login_screen_mut().toggle_password_visibility(),
            UserEvent::SubmitLogin => {
                let status = app.submit_login().await;
                tracing::debug!("Login finished: {:?}", status);
            }
            // Fetch results surface through the notification queue
            UserEvent::SelectTab(tab) => {
                if let Err(e) = app.select_tab(tab) {
                    tracing::warn!("Cannot switch to {}: {}", tab, e);
                }
            }
            UserEvent::Refresh => {
                if let Err(e) = app.refresh_active() {
                    tracing::warn!("Cannot refresh: {}", e);
                }
            }
            UserEvent::Claim(account_id) => {
                if let Some(dashboard) = app.tabs().and_then(|t| t.dashboard()) {
                    dashboard.spawn_claim(account_id);
                }
            }
        }
    }

    app.shutdown();
    tracing::info!("SweeperKeeper closed");
    Ok(())
}
