use serde_json::json;
use std::time::Duration;
use sweeperkeeper_app::notifications::{self, NotificationQueue};
use sweeperkeeper_app::{
    App, ClaimStatus, DashboardScreen, FetchStatus, LoginStatus, NotificationLevel, Route,
    SessionState, Tab,
};
use sweeperkeeper_core::{Account, AccountId, Casino, ClientConfig, Credentials, Error};
use sweeperkeeper_networking::test_helpers::{unreachable_config, Endpoint, FakeBackend};
use sweeperkeeper_networking::SweeperClient;

async fn seeded_backend() -> FakeBackend {
    let backend = FakeBackend::start().await;
    backend.add_user(&Credentials::new("alice", "correct-pw"));
    backend.set_casinos(vec![Casino::named("Acme"), Casino::named("Lucky Spins")]);
    backend.set_accounts(
        "alice",
        vec![Account::new(7, "Acme", 120.0), Account::new(8, "Lucky Spins", 40.0)],
    );
    backend
}

fn app_for(config: ClientConfig) -> (App, NotificationQueue) {
    let client = SweeperClient::new(config).unwrap();
    let (notifier, queue) = notifications::channel();
    (App::new(client, notifier), queue)
}

fn fill_login(app: &mut App, username: &str, password: &str) {
    let form = app.login_screen_mut();
    form.username = username.to_string();
    form.password = password.to_string();
}

async fn logged_in_app(backend: &FakeBackend) -> (App, NotificationQueue) {
    let (mut app, queue) = app_for(backend.config());
    fill_login(&mut app, "alice", "correct-pw");
    assert_eq!(app.submit_login().await, LoginStatus::Accepted);
    (app, queue)
}

/// Switch to the dashboard and wait for its mount fetch
async fn open_dashboard(app: &mut App) -> (DashboardScreen, FetchStatus) {
    let fetch = app.select_tab(Tab::Dashboard).unwrap().expect("dashboard fetches on mount");
    let status = fetch.await.unwrap();
    let screen = app.tabs().unwrap().dashboard().unwrap().clone();
    (screen, status)
}

#[tokio::test]
async fn test_login_success_shows_tabs_without_back_navigation() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;

    assert_eq!(app.state(), SessionState::LoggedIn);
    assert_eq!(app.navigation().current(), Route::MainTabs);
    assert!(!app.navigation().can_go_back());
    assert!(!app.go_back());
    assert_eq!(app.navigation().current(), Route::MainTabs);

    let tabs = app.tabs().unwrap();
    assert_eq!(tabs.active_tab(), Tab::Home);
    assert_eq!(tabs.session().username(), "alice");
    assert_eq!(Tab::ALL.map(|t| t.title()), ["Home", "Dashboard", "Casinos"]);
    assert!(queue.try_next().is_none());
}

#[tokio::test]
async fn test_rejected_login_keeps_fields_and_notifies() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = app_for(backend.config());
    fill_login(&mut app, "alice", "wrong-pw");

    assert_eq!(app.submit_login().await, LoginStatus::Rejected);

    assert_eq!(app.state(), SessionState::LoggedOut);
    assert_eq!(app.navigation().current(), Route::Login);
    assert_eq!(app.login_screen().username, "alice");
    assert_eq!(app.login_screen().password, "wrong-pw");

    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Login Failed");
    assert_eq!(shown[0].message, "Invalid username or password");
}

#[tokio::test]
async fn test_login_body_without_success_flag_is_rejection() {
    let backend = seeded_backend().await;
    backend.respond_to_login_with(json!({ "message": "bad credentials" }));
    let (mut app, mut queue) = app_for(backend.config());
    fill_login(&mut app, "alice", "correct-pw");

    assert_eq!(app.submit_login().await, LoginStatus::Rejected);

    assert_eq!(app.state(), SessionState::LoggedOut);
    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Login Failed");
    assert_eq!(shown[0].message, "Invalid username or password");
}

#[tokio::test]
async fn test_login_transport_error_stays_logged_out() {
    let (mut app, mut queue) = app_for(unreachable_config().await);
    fill_login(&mut app, "alice", "correct-pw");

    assert_eq!(app.submit_login().await, LoginStatus::Failed);

    assert_eq!(app.state(), SessionState::LoggedOut);
    assert_eq!(app.login_screen().password, "correct-pw");
    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "An error occurred while logging in");
    assert!(shown[0].detail.is_some());
}

#[tokio::test]
async fn test_resubmit_after_rejection_succeeds() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = app_for(backend.config());
    fill_login(&mut app, "alice", "typo");
    assert_eq!(app.submit_login().await, LoginStatus::Rejected);

    app.login_screen_mut().password = "correct-pw".to_string();
    assert_eq!(app.submit_login().await, LoginStatus::Accepted);
    assert_eq!(app.submit_login().await, LoginStatus::AlreadyLoggedIn);

    assert_eq!(queue.drain().len(), 1);
    assert_eq!(backend.hits(Endpoint::Login), 2);
}

#[tokio::test]
async fn test_tabs_require_login() {
    let backend = seeded_backend().await;
    let (mut app, _queue) = app_for(backend.config());

    assert!(matches!(app.select_tab(Tab::Dashboard), Err(Error::NotAuthenticated)));
    assert!(matches!(app.refresh_active(), Err(Error::NotAuthenticated)));
}

#[tokio::test]
async fn test_dashboard_fetch_is_idempotent() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;

    let (dashboard, status) = open_dashboard(&mut app).await;
    assert_eq!(status, FetchStatus::Updated { count: 2 });
    let first = dashboard.accounts().await;

    assert_eq!(dashboard.refresh().await, FetchStatus::Updated { count: 2 });
    let second = dashboard.accounts().await;

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
    assert!(queue.try_next().is_none());
}

#[tokio::test]
async fn test_claim_refreshes_balances_and_confirms() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    assert_eq!(dashboard.accounts().await[0], Account::new(7, "Acme", 120.0));

    let status = dashboard.claim(AccountId::from(7)).await;

    match status {
        ClaimStatus::Claimed { result, refresh } => {
            assert_eq!(result.account_id, AccountId::from(7));
            assert_eq!(refresh, FetchStatus::Updated { count: 2 });
        }
        other => panic!("expected claim to succeed, got {:?}", other),
    }
    assert_eq!(dashboard.accounts().await[0], Account::new(7, "Acme", 0.0));
    assert_eq!(backend.hits(Endpoint::Accounts), 2);

    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, NotificationLevel::Success);
    assert_eq!(shown[0].message, "Coins claimed successfully");
    assert!(!dashboard.is_claim_pending(&AccountId::from(7)));
}

#[tokio::test]
async fn test_failed_claim_keeps_stale_balance() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    backend.fail_with(Endpoint::Claim, 500);

    assert_eq!(dashboard.claim(AccountId::from(7)).await, ClaimStatus::Failed);

    assert_eq!(dashboard.accounts().await[0].coins.as_f64(), 120.0);
    assert_eq!(backend.hits(Endpoint::Accounts), 1);
    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "Failed to claim coins");
}

#[tokio::test]
async fn test_concurrent_claims_for_one_account_send_one_request() {
    let backend = seeded_backend().await;
    let (mut app, _queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    backend.set_delay(Endpoint::Claim, Duration::from_millis(200));

    let (first, second) = tokio::join!(
        dashboard.claim(AccountId::from(7)),
        dashboard.claim(AccountId::from(7)),
    );

    assert!(matches!(first, ClaimStatus::Claimed { .. }));
    assert_eq!(second, ClaimStatus::AlreadyPending);
    assert_eq!(backend.hits(Endpoint::Claim), 1);
}

#[tokio::test]
async fn test_claims_for_different_accounts_run_independently() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    backend.set_delay(Endpoint::Claim, Duration::from_millis(100));

    let first = dashboard.spawn_claim(AccountId::from(7));
    let second = dashboard.spawn_claim(AccountId::from(8));
    let (first, second) = (first.await.unwrap(), second.await.unwrap());

    assert!(matches!(first, ClaimStatus::Claimed { .. }));
    assert!(matches!(second, ClaimStatus::Claimed { .. }));
    assert_eq!(backend.hits(Endpoint::Claim), 2);
    assert!(dashboard.accounts().await.iter().all(|a| a.coins.as_f64() == 0.0));
    assert_eq!(queue.drain().len(), 2);
}

#[tokio::test]
async fn test_disconnect_leaves_dashboard_empty_with_one_notification() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    backend.shutdown().await;

    let (dashboard, status) = open_dashboard(&mut app).await;

    assert_eq!(status, FetchStatus::Failed);
    assert!(dashboard.accounts().await.is_empty());
    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "Failed to fetch accounts");
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    let before = dashboard.accounts().await;

    backend.fail_with(Endpoint::Accounts, 503);
    assert_eq!(dashboard.refresh().await, FetchStatus::Failed);

    assert_eq!(dashboard.accounts().await, before);
    assert_eq!(queue.drain().len(), 1);
}

#[tokio::test]
async fn test_timeout_is_reported_once() {
    let backend = seeded_backend().await;
    let config = backend.config().with_timeout(Duration::from_millis(200));
    let (mut app, mut queue) = app_for(config);
    fill_login(&mut app, "alice", "correct-pw");
    assert_eq!(app.submit_login().await, LoginStatus::Accepted);
    backend.set_delay(Endpoint::Accounts, Duration::from_secs(1));

    let (dashboard, status) = open_dashboard(&mut app).await;

    assert_eq!(status, FetchStatus::Failed);
    assert!(dashboard.accounts().await.is_empty());
    let shown = queue.drain();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].detail.as_deref().unwrap_or_default().contains("timed out"));
}

#[tokio::test]
async fn test_switching_tabs_cancels_in_flight_fetch() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    backend.set_delay(Endpoint::Accounts, Duration::from_millis(300));
    // Would raise a notification if the response were still applied
    backend.fail_with(Endpoint::Accounts, 500);

    let dashboard_fetch = app.select_tab(Tab::Dashboard).unwrap().unwrap();
    let dashboard = app.tabs().unwrap().dashboard().unwrap().clone();
    let casinos_fetch = app.select_tab(Tab::Casinos).unwrap().unwrap();

    assert_eq!(dashboard_fetch.await.unwrap(), FetchStatus::Cancelled);
    assert_eq!(casinos_fetch.await.unwrap(), FetchStatus::Updated { count: 2 });
    assert!(!dashboard.is_mounted());
    assert!(dashboard.accounts().await.is_empty());
    assert!(queue.try_next().is_none());

    let snapshot = app.snapshot().await;
    assert_eq!(snapshot.active_tab, Some(Tab::Casinos));
    assert_eq!(snapshot.casinos.len(), 2);
}

#[tokio::test]
async fn test_claim_on_unmounted_dashboard_sends_nothing() {
    let backend = seeded_backend().await;
    let (mut app, _queue) = logged_in_app(&backend).await;
    let (dashboard, _) = open_dashboard(&mut app).await;
    app.select_tab(Tab::Home).unwrap();

    assert_eq!(dashboard.claim(AccountId::from(7)).await, ClaimStatus::Cancelled);
    assert_eq!(backend.hits(Endpoint::Claim), 0);
}

#[tokio::test]
async fn test_casinos_failure_is_isolated() {
    let backend = seeded_backend().await;
    let (mut app, mut queue) = logged_in_app(&backend).await;
    backend.fail_with(Endpoint::Casinos, 500);

    let casinos_fetch = app.select_tab(Tab::Casinos).unwrap().unwrap();
    assert_eq!(casinos_fetch.await.unwrap(), FetchStatus::Failed);
    assert!(app.tabs().unwrap().casinos().unwrap().casinos().await.is_empty());
    assert_eq!(queue.drain()[0].message, "Failed to fetch casinos");

    let (dashboard, status) = open_dashboard(&mut app).await;
    assert_eq!(status, FetchStatus::Updated { count: 2 });
    assert_eq!(dashboard.accounts().await.len(), 2);
    assert!(queue.try_next().is_none());
}

#[tokio::test]
async fn test_reselecting_active_tab_does_not_refetch() {
    let backend = seeded_backend().await;
    let (mut app, _queue) = logged_in_app(&backend).await;
    open_dashboard(&mut app).await;

    assert!(app.select_tab(Tab::Dashboard).unwrap().is_none());
    assert_eq!(backend.hits(Endpoint::Accounts), 1);

    let refresh = app.refresh_active().unwrap().unwrap();
    assert_eq!(refresh.await.unwrap(), FetchStatus::Updated { count: 2 });
    assert_eq!(backend.hits(Endpoint::Accounts), 2);
}

#[tokio::test]
async fn test_snapshot_reflects_login_form() {
    let backend = seeded_backend().await;
    let (mut app, _queue) = app_for(backend.config());
    fill_login(&mut app, "alice", "pw");

    let masked = app.snapshot().await;
    assert_eq!(masked.route, Route::Login);
    assert_eq!(masked.username, "alice");
    assert_eq!(masked.password_display, "**");
    assert_eq!(masked.active_tab, None);

    app.login_screen_mut().toggle_password_visibility();
    assert_eq!(app.snapshot().await.password_display, "pw");
}
