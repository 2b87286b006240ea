//! SweeperKeeper HTTP client with cookie-based authentication

use super::session::Session;
use reqwest::{
    cookie::Jar,
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use sweeperkeeper_core::{Casino, ClientConfig, Credentials, Error, LoginResponse, Result};
use tracing::{debug, error, info, instrument, warn};

/// Result of a login attempt that reached the server
#[derive(Debug)]
pub enum LoginOutcome {
    /// `success: true`; the session owns the cookies the server set
    Accepted(Session),
    /// `success: false`; the server's response is kept for display
    Rejected(LoginResponse),
}

/// Unauthenticated entry point to the SweeperKeeper backend
///
/// Holds the configuration and a cookie-less transport for public
/// endpoints. Authenticated calls go through the [`Session`] returned by
/// [`SweeperClient::login`].
#[derive(Clone)]
pub struct SweeperClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl SweeperClient {
    /// Create a client for the configured backend
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http(&config, None)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit credentials to `POST /login`
    ///
    /// Every attempt gets its own cookie jar, so an accepted login yields a
    /// session that shares no state with earlier ones.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        let url = self.config.endpoint("/login");
        debug!("Logging in via {}", url);

        let jar = Arc::new(Jar::default());
        let http = build_http(&self.config, Some(jar.clone()))?;

        let response: LoginResponse = send_json(http.post(&url).json(credentials), "Login").await?;

        if !response.success {
            warn!(
                "Login rejected for {}: {}",
                credentials.username,
                response.message.as_deref().unwrap_or("no reason given")
            );
            return Ok(LoginOutcome::Rejected(response));
        }

        info!("Logged in as {}", credentials.username);
        Ok(LoginOutcome::Accepted(Session::new(
            http,
            jar,
            self.config.clone(),
            credentials.username.clone(),
        )))
    }

    /// List supported casinos (`GET /api/casinos`)
    #[instrument(skip(self))]
    pub async fn list_casinos(&self) -> Result<Vec<Casino>> {
        fetch_casinos(&self.http, &self.config).await
    }
}

impl std::fmt::Debug for SweeperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweeperClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

/// Build a transport with the fixed timeout and JSON headers, optionally
/// backed by a cookie jar
fn build_http(config: &ClientConfig, jar: Option<Arc<Jar>>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(config.timeout)
        .default_headers(default_headers());

    if let Some(jar) = jar {
        builder = builder.cookie_provider(jar);
    }

    builder.build().map_err(|e| {
        error!("Failed to create HTTP client: {}", e);
        Error::NetworkError(e.to_string())
    })
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

pub(crate) async fn fetch_casinos(http: &Client, config: &ClientConfig) -> Result<Vec<Casino>> {
    let url = config.endpoint("/api/casinos");
    debug!("Fetching casinos from: {}", url);

    let casinos: Vec<Casino> = send_json(http.get(&url), "Casinos").await?;
    debug!("Fetched {} casinos", casinos.len());
    Ok(casinos)
}

/// Send a request and decode a JSON body of the expected shape
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let bytes = send_raw(request, what).await?;

    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Failed to parse {} response: {}", what, e);
        Error::InvalidData(e.to_string())
    })
}

/// Send a request and return the body as an opaque JSON value.
///
/// Non-JSON bodies come back as a JSON string, empty bodies as `null`.
pub(crate) async fn send_opaque(request: RequestBuilder, what: &str) -> Result<serde_json::Value> {
    let bytes = send_raw(request, what).await?;
    Ok(opaque_body(&bytes))
}

async fn send_raw(request: RequestBuilder, what: &str) -> Result<Vec<u8>> {
    let response = request.send().await.map_err(|e| {
        error!("{} request failed: {}", what, e);
        Error::from(e)
    })?;

    debug!("{} response status: {}", what, response.status());

    let response = check_status(response, what).await?;

    let bytes = response.bytes().await.map_err(|e| {
        error!("Failed to read {} response body: {}", what, e);
        Error::from(e)
    })?;

    Ok(bytes.to_vec())
}

/// Turn a non-success status into `Error::ApiError` carrying the body
async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let body = opaque_body(&bytes);
    error!("{} request failed with status {}: {}", what, status, body);

    Err(Error::ApiError {
        status: status.as_u16(),
        body,
    })
}

fn opaque_body(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::opaque_body;
    use serde_json::{json, Value};

    #[test]
    fn test_opaque_body_shapes() {
        assert_eq!(opaque_body(b""), Value::Null);
        assert_eq!(opaque_body(br#"{"ok":true}"#), json!({ "ok": true }));
        assert_eq!(
            opaque_body(b"<h1>Internal Server Error</h1>"),
            json!("<h1>Internal Server Error</h1>")
        );
    }
}
