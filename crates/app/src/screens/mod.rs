//! Screens of the flow and the tab group that hosts the authenticated ones

mod casinos;
mod dashboard;
mod home;
mod listing;
mod login;
mod tabs;

pub use casinos::CasinosScreen;
pub use dashboard::{ClaimStatus, DashboardScreen};
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use tabs::{ActiveScreen, MainTabs, Tab};

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Result of one list fetch issued by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The displayed list was replaced with `count` items
    Updated { count: usize },
    /// A newer fetch had already been applied; this response was dropped
    Superseded,
    /// The request failed; the displayed list is unchanged
    Failed,
    /// The screen was torn down before the response arrived
    Cancelled,
}

/// Run `fut` unless `cancel` fires first. A result that lands after
/// cancellation is discarded.
pub(crate) async fn until_unmounted<F: Future>(cancel: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = fut => {
            if cancel.is_cancelled() {
                None
            } else {
                Some(output)
            }
        }
    }
}
