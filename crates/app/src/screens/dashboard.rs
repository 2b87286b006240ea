//! Dashboard tab: tracked accounts and the claim action

use super::listing::Listing;
use super::{until_unmounted, FetchStatus};
use crate::notifications::NotificationHandle;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use sweeperkeeper_core::{Account, AccountId, ClaimResult};
use sweeperkeeper_networking::Session;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of a claim request issued from the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimStatus {
    /// The server accepted the claim; `refresh` is the follow-up fetch
    Claimed {
        result: ClaimResult,
        refresh: FetchStatus,
    },
    /// A claim for the same account is still outstanding; nothing was sent
    AlreadyPending,
    /// The request failed; the displayed balance is unchanged
    Failed,
    /// The screen was torn down before the claim completed
    Cancelled,
}

struct DashboardInner {
    session: Session,
    notifier: NotificationHandle,
    accounts: Listing<Account>,
    pending_claims: Mutex<HashSet<AccountId>>,
    cancel: CancellationToken,
}

/// Mounted dashboard. Clones share the same state and lifetime.
#[derive(Clone)]
pub struct DashboardScreen {
    inner: Arc<DashboardInner>,
}

impl DashboardScreen {
    /// Mount the screen with an empty list. The screen lives until
    /// [`unmount`](Self::unmount) or until `parent` is cancelled.
    pub fn mount(session: Session, notifier: NotificationHandle, parent: &CancellationToken) -> Self {
        debug!("Mounting dashboard");
        Self {
            inner: Arc::new(DashboardInner {
                session,
                notifier,
                accounts: Listing::new(),
                pending_claims: Mutex::new(HashSet::new()),
                cancel: parent.child_token(),
            }),
        }
    }

    /// Tear the screen down, aborting its in-flight requests
    pub fn unmount(&self) {
        debug!("Unmounting dashboard");
        self.inner.cancel.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.cancel.is_cancelled()
    }

    /// Accounts currently displayed
    pub async fn accounts(&self) -> Vec<Account> {
        self.inner.accounts.snapshot().await
    }

    /// Whether the claim action of `account_id` is disabled
    pub fn is_claim_pending(&self, account_id: &AccountId) -> bool {
        self.pending().contains(account_id)
    }

    pub fn pending_claims(&self) -> HashSet<AccountId> {
        self.pending().clone()
    }

    /// Fetch accounts and replace the displayed list
    pub async fn refresh(&self) -> FetchStatus {
        let inner = &self.inner;
        let ticket = inner.accounts.ticket();

        let Some(result) = until_unmounted(&inner.cancel, inner.session.list_accounts()).await else {
            debug!("Accounts fetch dropped, dashboard unmounted");
            return FetchStatus::Cancelled;
        };

        match result {
            Ok(accounts) => {
                let count = accounts.len();
                if inner.accounts.apply(ticket, accounts).await {
                    FetchStatus::Updated { count }
                } else {
                    debug!("Accounts fetch superseded by a newer one");
                    FetchStatus::Superseded
                }
            }
            Err(e) => {
                warn!("Failed to fetch accounts: {}", e);
                inner.notifier.notify_fetch_failed("accounts", &e);
                FetchStatus::Failed
            }
        }
    }

    /// Claim coins for one account, then re-fetch the list on success.
    ///
    /// The account stays locked until the follow-up fetch has finished, so
    /// a second claim cannot be issued against a stale balance.
    pub async fn claim(&self, account_id: AccountId) -> ClaimStatus {
        let Some(_lock) = ClaimLock::acquire(self, &account_id) else {
            debug!("Claim for account {} already pending, ignoring", account_id);
            return ClaimStatus::AlreadyPending;
        };

        let inner = &self.inner;
        info!("Claiming coins for account {}", account_id);

        let Some(result) = until_unmounted(&inner.cancel, inner.session.claim_coins(&account_id)).await
        else {
            debug!("Claim for account {} dropped, dashboard unmounted", account_id);
            return ClaimStatus::Cancelled;
        };

        match result {
            Ok(result) => {
                inner.notifier.notify_claim_succeeded(&account_id);
                let refresh = self.refresh().await;
                ClaimStatus::Claimed { result, refresh }
            }
            Err(e) => {
                warn!("Claim for account {} failed: {}", account_id, e);
                inner.notifier.notify_claim_failed(&account_id, &e);
                ClaimStatus::Failed
            }
        }
    }

    /// Run [`refresh`](Self::refresh) on its own task
    pub fn spawn_refresh(&self) -> JoinHandle<FetchStatus> {
        let screen = self.clone();
        tokio::spawn(async move { screen.refresh().await })
    }

    /// Run [`claim`](Self::claim) on its own task
    pub fn spawn_claim(&self, account_id: AccountId) -> JoinHandle<ClaimStatus> {
        let screen = self.clone();
        tokio::spawn(async move { screen.claim(account_id).await })
    }

    fn pending(&self) -> MutexGuard<'_, HashSet<AccountId>> {
        self.inner
            .pending_claims
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Marks an account as having a claim in flight; released on drop
struct ClaimLock<'a> {
    screen: &'a DashboardScreen,
    account_id: AccountId,
}

impl<'a> ClaimLock<'a> {
    fn acquire(screen: &'a DashboardScreen, account_id: &AccountId) -> Option<Self> {
        if !screen.pending().insert(account_id.clone()) {
            return None;
        }
        Some(Self {
            screen,
            account_id: account_id.clone(),
        })
    }
}

impl Drop for ClaimLock<'_> {
    fn drop(&mut self) {
        self.screen.pending().remove(&self.account_id);
    }
}
