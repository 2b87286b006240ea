//! Session state machine: LoggedOut -> LoggedIn
//!
//! There is no transition back. Logging out is not part of the backend
//! contract the client knows about.

use crate::navigation::{NavigationStack, Route};
use crate::notifications::NotificationHandle;
use crate::screens::{ActiveScreen, FetchStatus, HomeScreen, LoginScreen, MainTabs, Tab};
use std::collections::HashSet;
use sweeperkeeper_core::{Account, AccountId, Casino, Error, Result};
use sweeperkeeper_networking::{LoginOutcome, SweeperClient};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Outcome of submitting the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    /// Now logged in; the tab group replaced the login screen
    Accepted,
    /// Server answered `success: false`
    Rejected,
    /// The request failed
    Failed,
    /// Already logged in; nothing was sent
    AlreadyLoggedIn,
}

/// Everything the front end needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub route: Route,
    pub username: String,
    pub password_display: String,
    pub password_visible: bool,
    pub active_tab: Option<Tab>,
    pub logged_in_as: Option<String>,
    pub accounts: Vec<Account>,
    pub pending_claims: HashSet<AccountId>,
    pub casinos: Vec<Casino>,
}

/// One app instance: login screen, navigation and, once logged in, the tab
/// group
pub struct App {
    client: SweeperClient,
    notifier: NotificationHandle,
    navigation: NavigationStack,
    login: LoginScreen,
    tabs: Option<MainTabs>,
    root: CancellationToken,
}

impl App {
    /// Start logged out on an empty login form
    pub fn new(client: SweeperClient, notifier: NotificationHandle) -> Self {
        Self {
            client,
            notifier,
            navigation: NavigationStack::new(Route::Login),
            login: LoginScreen::new(),
            tabs: None,
            root: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.tabs.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn login_screen(&self) -> &LoginScreen {
        &self.login
    }

    pub fn login_screen_mut(&mut self) -> &mut LoginScreen {
        &mut self.login
    }

    pub fn tabs(&self) -> Option<&MainTabs> {
        self.tabs.as_ref()
    }

    /// Submit the login form.
    ///
    /// On acceptance the tab group replaces the login route. On rejection
    /// or error one notification is raised and the form keeps its values.
    pub async fn submit_login(&mut self) -> LoginStatus {
        if self.tabs.is_some() {
            warn!("Login submitted while already logged in");
            return LoginStatus::AlreadyLoggedIn;
        }

        let credentials = self.login.credentials();
        info!("Submitting login for {}", credentials.username);

        match self.client.login(&credentials).await {
            Ok(LoginOutcome::Accepted(session)) => {
                info!("Login accepted, entering tab group");
                self.tabs = Some(MainTabs::new(
                    session,
                    self.notifier.clone(),
                    self.root.child_token(),
                ));
                self.navigation.replace(Route::MainTabs);
                LoginStatus::Accepted
            }
            Ok(LoginOutcome::Rejected(_)) => {
                self.notifier.notify_login_rejected();
                LoginStatus::Rejected
            }
            Err(e) => {
                error!("Login request failed: {}", e);
                self.notifier.notify_login_error(&e);
                LoginStatus::Failed
            }
        }
    }

    /// Activate a tab of the logged-in group. Returns the new screen's mount
    /// fetch when it has one.
    pub fn select_tab(&mut self, tab: Tab) -> Result<Option<JoinHandle<FetchStatus>>> {
        let tabs = self.tabs.as_mut().ok_or(Error::NotAuthenticated)?;
        Ok(tabs.select(tab))
    }

    /// Re-run the active tab's fetch
    pub fn refresh_active(&self) -> Result<Option<JoinHandle<FetchStatus>>> {
        let tabs = self.tabs.as_ref().ok_or(Error::NotAuthenticated)?;
        Ok(tabs.refresh_active())
    }

    /// Back navigation; refused at the root of the stack
    pub fn go_back(&mut self) -> bool {
        self.navigation.go_back()
    }

    /// Cancel everything still in flight
    pub fn shutdown(&self) {
        info!("Shutting down app flow");
        self.root.cancel();
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let mut snapshot = AppSnapshot {
            route: self.navigation.current(),
            username: self.login.username.clone(),
            password_display: self.login.display_password(),
            password_visible: self.login.password_visible(),
            active_tab: None,
            logged_in_as: None,
            accounts: Vec::new(),
            pending_claims: HashSet::new(),
            casinos: Vec::new(),
        };

        if let Some(tabs) = &self.tabs {
            snapshot.active_tab = Some(tabs.active_tab());
            snapshot.logged_in_as = Some(tabs.session().username().to_string());

            match tabs.active() {
                ActiveScreen::Home(HomeScreen) => {}
                ActiveScreen::Dashboard(screen) => {
                    snapshot.accounts = screen.accounts().await;
                    snapshot.pending_claims = screen.pending_claims();
                }
                ActiveScreen::Casinos(screen) => {
                    snapshot.casinos = screen.casinos().await;
                }
            }
        }

        snapshot
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
