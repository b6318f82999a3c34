// distro-client/tests/session_integration.rs
// Session lifecycle, token injection and route guards

mod common;

use std::sync::Arc;

use common::{Backend, PASSWORD};
use distro_client::api::zones;
use distro_client::guard::{DEFAULT_PATH, LOGIN_PATH};
use distro_client::session::{FileStorage, MemoryStorage, SessionStorage};
use distro_client::{ClientConfig, ClientError, Navigation, Role, RouteTable, SessionState};
use shared::models::{Zone, ZoneCreate};
use tempfile::TempDir;

#[tokio::test]
async fn test_login_injects_bearer_token() {
    let backend = Backend::seeded();
    let api = backend.api();

    let _: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();
    assert_eq!(backend.last_authorization(), None);

    api.login("admin", PASSWORD).await.unwrap();
    let me = api.me().await.unwrap();

    assert_eq!(me.role, Role::Admin);
    assert_eq!(backend.last_authorization().as_deref(), Some("Bearer token-admin"));
}

#[tokio::test]
async fn test_wrong_password_keeps_session_empty() {
    let backend = Backend::seeded();
    let api = backend.api();

    let err = api.login("admin", "nope").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn test_empty_credentials_never_reach_backend() {
    let backend = Backend::seeded();
    let api = backend.api();

    let err = api.login("", "").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let backend = Backend::seeded();
    let dir = TempDir::new().unwrap();

    let api = backend.api_with_storage(Arc::new(FileStorage::new(dir.path())));
    api.login("dist.north", PASSWORD).await.unwrap();
    drop(api);

    // New client over the same directory starts logged in
    let restarted = backend.api_with_storage(Arc::new(FileStorage::new(dir.path())));
    let state = restarted.session().state();
    assert!(state.is_authenticated());
    assert_eq!(state.role(), Some(Role::Distributor));
    assert_eq!(state.token(), Some("token-dist.north"));

    restarted.logout().unwrap();
    let after_logout = backend.api_with_storage(Arc::new(FileStorage::new(dir.path())));
    assert_eq!(after_logout.session().state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_corrupt_session_record_starts_logged_out() {
    let backend = Backend::seeded();
    let storage = Arc::new(MemoryStorage::new());
    storage
        .store(distro_client::config::DEFAULT_SESSION_KEY, "{not json")
        .unwrap();

    let api = backend.api_with_storage(storage.clone());

    assert!(!api.session().is_authenticated());
    assert_eq!(
        storage.load(distro_client::config::DEFAULT_SESSION_KEY).unwrap(),
        None
    );
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let backend = Backend::seeded();
    let storage = Arc::new(MemoryStorage::new());
    let stale = r#"{"user":{"id":1,"username":"ghost","role":"admin"},"token":"revoked"}"#;
    storage
        .store(distro_client::config::DEFAULT_SESSION_KEY, stale)
        .unwrap();
    let api = backend.api_with_storage(storage.clone());
    assert!(api.session().is_authenticated());

    let err = api.me().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!api.session().is_authenticated());
    assert_eq!(
        storage.load(distro_client::config::DEFAULT_SESSION_KEY).unwrap(),
        None
    );
}

#[tokio::test]
async fn test_rejected_token_drops_previous_user_data() {
    let backend = Backend::seeded();
    let storage = Arc::new(MemoryStorage::new());
    let stale = r#"{"user":{"id":1,"username":"ghost","role":"admin"},"token":"revoked"}"#;
    storage
        .store(distro_client::config::DEFAULT_SESSION_KEY, stale)
        .unwrap();
    let api = backend.api_with_storage(storage);
    let mut view = api.subscribe(&zones::GET_ZONES, ());
    view.settled().await;

    assert!(api.me().await.is_err());

    assert!(!api.is_cached(&zones::GET_ZONES, &()));
    assert!(view.current().data.is_none());
}

#[tokio::test]
async fn test_rejected_token_can_be_kept() {
    let backend = Backend::seeded();
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    let stale = r#"{"user":{"id":1,"username":"ghost","role":"admin"},"token":"revoked"}"#;
    storage
        .store(distro_client::config::DEFAULT_SESSION_KEY, stale)
        .unwrap();
    let api = backend.api_with(storage, ClientConfig::default().keep_session_on_unauthorized());

    assert!(api.me().await.is_err());
    assert!(api.session().is_authenticated());
}

#[tokio::test]
async fn test_logout_drops_cached_queries() {
    let backend = Backend::seeded();
    let api = backend.api();
    api.login("admin", PASSWORD).await.unwrap();
    let _: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();

    api.logout().unwrap();
    assert!(!api.is_cached(&zones::GET_ZONES, &()));

    let _: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();
    assert_eq!(backend.hits("GET /zones"), 2);
    assert_eq!(backend.last_authorization(), None);
}

#[tokio::test]
async fn test_view_from_previous_session_leaves_remounted_view_alone() {
    let backend = Backend::seeded();
    let api = backend.api();
    api.login("admin", PASSWORD).await.unwrap();
    let mut old_view = api.subscribe(&zones::GET_ZONES, ());
    old_view.settled().await;

    api.logout().unwrap();
    api.login("manager", PASSWORD).await.unwrap();
    let mut view = api.subscribe(&zones::GET_ZONES, ());
    view.settled().await;
    drop(old_view);

    let key = zones::GET_ZONES.cache_key(&());
    assert_eq!(api.cache().subscriber_count(&key), 1);

    let body = ZoneCreate {
        name: "East".into(),
        description: None,
        distributor_id: None,
    };
    api.mutate(&zones::CREATE_ZONE, body).await.unwrap();
    let refreshed = view.settled().await;

    assert_eq!(refreshed.data.map(|list| list.len()), Some(3));
    assert_eq!(backend.hits("GET /zones"), 3);
}

#[tokio::test]
async fn test_guards_follow_session() {
    let backend = Backend::seeded();
    let api = backend.api();
    let table = RouteTable::dashboard();

    assert_eq!(
        table.resolve("/shops", &api.session().state()),
        Navigation::Redirect(LOGIN_PATH)
    );
    assert_eq!(table.resolve(LOGIN_PATH, &api.session().state()), Navigation::Proceed);

    api.login("manager", PASSWORD).await.unwrap();
    let state = api.session().state();
    assert_eq!(table.resolve("/shops", &state), Navigation::Proceed);
    assert_eq!(table.resolve("/distributor", &state), Navigation::Proceed);
    assert_eq!(table.resolve("/wallets", &state), Navigation::Redirect(DEFAULT_PATH));
    assert_eq!(table.resolve(LOGIN_PATH, &state), Navigation::Redirect("/"));

    api.logout().unwrap();
    assert_eq!(
        table.resolve("/shops", &api.session().state()),
        Navigation::Redirect(LOGIN_PATH)
    );
}
