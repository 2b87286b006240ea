//! Casinos tab: read-only list of supported sites

use super::listing::Listing;
use super::{until_unmounted, FetchStatus};
use crate::notifications::NotificationHandle;
use std::sync::Arc;
use sweeperkeeper_core::Casino;
use sweeperkeeper_networking::Session;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

struct CasinosInner {
    session: Session,
    notifier: NotificationHandle,
    casinos: Listing<Casino>,
    cancel: CancellationToken,
}

#[derive(Clone)]
pub struct CasinosScreen {
    inner: Arc<CasinosInner>,
}

impl CasinosScreen {
    pub fn mount(session: Session, notifier: NotificationHandle, parent: &CancellationToken) -> Self {
        debug!("Mounting casinos");
        Self {
            inner: Arc::new(CasinosInner {
                session,
                notifier,
                casinos: Listing::new(),
                cancel: parent.child_token(),
            }),
        }
    }

    pub fn unmount(&self) {
        debug!("Unmounting casinos");
        self.inner.cancel.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.cancel.is_cancelled()
    }

    pub async fn casinos(&self) -> Vec<Casino> {
        self.inner.casinos.snapshot().await
    }

    /// Fetch casinos and replace the displayed list
    pub async fn refresh(&self) -> FetchStatus {
        let inner = &self.inner;
        let ticket = inner.casinos.ticket();

        let Some(result) = until_unmounted(&inner.cancel, inner.session.list_casinos()).await else {
            debug!("Casinos fetch dropped, screen unmounted");
            return FetchStatus::Cancelled;
        };

        match result {
            Ok(casinos) => {
                let count = casinos.len();
                if inner.casinos.apply(ticket, casinos).await {
                    FetchStatus::Updated { count }
                } else {
                    FetchStatus::Superseded
                }
            }
            Err(e) => {
                warn!("Failed to fetch casinos: {}", e);
                inner.notifier.notify_fetch_failed("casinos", &e);
                FetchStatus::Failed
            }
        }
    }

    pub fn spawn_refresh(&self) -> JoinHandle<FetchStatus> {
        let screen = self.clone();
        tokio::spawn(async move { screen.refresh().await })
    }
}
