//! SweeperKeeper App - session and view flow
//!
//! Drives login, the authenticated tab group and the data-refresh cycle of
//! each screen. Rendering is left to the front end, which reads an
//! [`AppSnapshot`] and drains the [`NotificationQueue`].

pub mod flow;
pub mod navigation;
pub mod notifications;
pub mod screens;

pub use flow::{App, AppSnapshot, LoginStatus, SessionState};
pub use navigation::{NavigationStack, Route};
pub use notifications::{Notification, NotificationHandle, NotificationLevel, NotificationQueue};
pub use screens::{
    ActiveScreen, CasinosScreen, ClaimStatus, DashboardScreen, FetchStatus, HomeScreen,
    LoginScreen, MainTabs, Tab,
};
