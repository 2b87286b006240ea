//! Authenticated session established by a successful login

use super::client::{fetch_casinos, send_json, send_opaque};
use reqwest::{cookie::Jar, Client, Url};
use std::sync::Arc;
use sweeperkeeper_core::{Account, AccountId, Casino, ClaimResult, ClientConfig, Error, Result};
use tracing::{debug, info, instrument};

/// Handle to an authenticated backend session
///
/// Owns the cookie jar populated by `POST /login`; every request made
/// through it carries those cookies. Cloning is cheap and clones share the
/// same jar.
#[derive(Clone)]
pub struct Session {
    http: Client,
    jar: Arc<Jar>,
    config: Arc<ClientConfig>,
    username: String,
}

impl Session {
    pub(crate) fn new(http: Client, jar: Arc<Jar>, config: Arc<ClientConfig>, username: String) -> Self {
        Self {
            http,
            jar,
            config,
            username,
        }
    }

    /// Username the session was established for
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the server set any cookie for this session
    pub fn has_cookies(&self) -> bool {
        use reqwest::cookie::CookieStore;

        Url::parse(&self.config.base_url)
            .ok()
            .and_then(|url| self.jar.cookies(&url))
            .is_some()
    }

    /// List supported casinos (`GET /api/casinos`)
    #[instrument(skip(self), fields(user = %self.username))]
    pub async fn list_casinos(&self) -> Result<Vec<Casino>> {
        fetch_casinos(&self.http, &self.config).await
    }

    /// List the tracked accounts of this session (`GET /api/accounts`)
    #[instrument(skip(self), fields(user = %self.username))]
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let url = self.config.endpoint("/api/accounts");
        debug!("Fetching accounts from: {}", url);

        let accounts: Vec<Account> = send_json(self.http.get(&url), "Accounts").await?;
        debug!("Fetched {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Trigger the server-side claim for one account
    /// (`GET /claim_coins/{id}`)
    ///
    /// Not idempotent: each call issues a request.
    #[instrument(skip(self), fields(user = %self.username))]
    pub async fn claim_coins(&self, account_id: &AccountId) -> Result<ClaimResult> {
        let url = claim_url(&self.config, account_id)?;
        debug!("Claiming coins for account {}", account_id);

        let body = send_opaque(self.http.get(url), "Claim").await?;
        info!("Coins claimed for account {}", account_id);

        Ok(ClaimResult {
            account_id: account_id.clone(),
            body,
        })
    }

    /// Fetch analytics (`GET /analytics`); the payload is not interpreted
    #[instrument(skip(self), fields(user = %self.username))]
    pub async fn analytics(&self) -> Result<serde_json::Value> {
        let url = self.config.endpoint("/analytics");
        send_opaque(self.http.get(&url), "Analytics").await
    }
}

/// `/claim_coins/{id}` with the id percent-encoded as one path segment
fn claim_url(config: &ClientConfig, account_id: &AccountId) -> Result<Url> {
    let mut url = Url::parse(&config.endpoint("/claim_coins"))
        .map_err(|e| Error::ConfigError(format!("invalid base URL '{}': {}", config.base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::ConfigError(format!("base URL '{}' cannot take a path", config.base_url)))?
        .push(&account_id.to_string());
    Ok(url)
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
