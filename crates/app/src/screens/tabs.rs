//! Authenticated tab group (Home, Dashboard, Casinos)

use super::{CasinosScreen, DashboardScreen, FetchStatus, HomeScreen};
use crate::notifications::NotificationHandle;
use serde::Serialize;
use sweeperkeeper_networking::Session;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    Home,
    Dashboard,
    Casinos,
}

impl Tab {
    /// Tabs in display order
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Dashboard, Tab::Casinos];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Dashboard => "Dashboard",
            Tab::Casinos => "Casinos",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// The screen currently mounted in the tab group
#[derive(Clone)]
pub enum ActiveScreen {
    Home(HomeScreen),
    Dashboard(DashboardScreen),
    Casinos(CasinosScreen),
}

impl ActiveScreen {
    pub fn tab(&self) -> Tab {
        match self {
            ActiveScreen::Home(_) => Tab::Home,
            ActiveScreen::Dashboard(_) => Tab::Dashboard,
            ActiveScreen::Casinos(_) => Tab::Casinos,
        }
    }

    fn unmount(&self) {
        match self {
            ActiveScreen::Home(_) => {}
            ActiveScreen::Dashboard(screen) => screen.unmount(),
            ActiveScreen::Casinos(screen) => screen.unmount(),
        }
    }
}

/// Tab group shown while logged in.
///
/// Exactly one tab's screen is mounted at a time. Activating a tab mounts a
/// fresh screen (which fetches its data) and tears down the previous one.
pub struct MainTabs {
    session: Session,
    notifier: NotificationHandle,
    cancel: CancellationToken,
    active: ActiveScreen,
}

impl MainTabs {
    /// Enter the tab group on the Home tab
    pub fn new(session: Session, notifier: NotificationHandle, cancel: CancellationToken) -> Self {
        Self {
            session,
            notifier,
            cancel,
            active: ActiveScreen::Home(HomeScreen),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active(&self) -> &ActiveScreen {
        &self.active
    }

    pub fn active_tab(&self) -> Tab {
        self.active.tab()
    }

    pub fn dashboard(&self) -> Option<&DashboardScreen> {
        match &self.active {
            ActiveScreen::Dashboard(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn casinos(&self) -> Option<&CasinosScreen> {
        match &self.active {
            ActiveScreen::Casinos(screen) => Some(screen),
            _ => None,
        }
    }

    /// Activate `tab`. Returns the mount fetch of the new screen, if it
    /// has one. Selecting the tab that is already active does nothing.
    pub fn select(&mut self, tab: Tab) -> Option<JoinHandle<FetchStatus>> {
        if tab == self.active.tab() {
            return None;
        }

        info!("Switching tab {} -> {}", self.active.tab(), tab);
        self.active.unmount();

        let (screen, fetch) = match tab {
            Tab::Home => (ActiveScreen::Home(HomeScreen), None),
            Tab::Dashboard => {
                let screen = DashboardScreen::mount(self.session.clone(), self.notifier.clone(), &self.cancel);
                let fetch = screen.spawn_refresh();
                (ActiveScreen::Dashboard(screen), Some(fetch))
            }
            Tab::Casinos => {
                let screen = CasinosScreen::mount(self.session.clone(), self.notifier.clone(), &self.cancel);
                let fetch = screen.spawn_refresh();
                (ActiveScreen::Casinos(screen), Some(fetch))
            }
        };

        self.active = screen;
        fetch
    }

    /// Re-run the active screen's fetch
    pub fn refresh_active(&self) -> Option<JoinHandle<FetchStatus>> {
        match &self.active {
            ActiveScreen::Home(_) => None,
            ActiveScreen::Dashboard(screen) => Some(screen.spawn_refresh()),
            ActiveScreen::Casinos(screen) => Some(screen.spawn_refresh()),
        }
    }
}

impl Drop for MainTabs {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycling() {
        assert_eq!(Tab::Home.next(), Tab::Dashboard);
        assert_eq!(Tab::Casinos.next(), Tab::Home);
        assert_eq!(Tab::Home.previous(), Tab::Casinos);
        assert_eq!(Tab::ALL.map(|t| t.title()), ["Home", "Dashboard", "Casinos"]);
    }
}
