// admin-client/tests/http_backend.rs
// 集成测试：本地 axum 假后端

use admin_client::{
    AdminContext, Change, ClientConfig, ClientError, DerivedPermission, Section, pages,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::{
    ActivityLogEntry, ApiResponse, LoginRequest, LoginResponse, PagePermission, RoleRightsEntry,
    SessionUser,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::TempDir;

const TOKEN: &str = "tok-editor";

#[derive(Default)]
struct Backend {
    rights_calls: AtomicUsize,
    activity: parking_lot::Mutex<Vec<ActivityLogEntry>>,
    activity_down: AtomicBool,
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        == Some(expected.as_str())
}

async fn login(Json(req): Json<LoginRequest>) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    if req.username == "editor" && req.password == "secret" {
        let resp = LoginResponse {
            token: TOKEN.to_string(),
            user: SessionUser::new("u-1", "editor", "EDITOR"),
        };
        (StatusCode::OK, Json(ApiResponse::ok(resp)))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("E2001", "Invalid credentials")),
        )
    }
}

async fn role_rights(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> (StatusCode, Json<ApiResponse<Vec<RoleRightsEntry>>>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("E2000", "Not authenticated")),
        );
    }
    backend.rights_calls.fetch_add(1, Ordering::SeqCst);
    let table = vec![
        RoleRightsEntry::new(
            "EDITOR",
            vec![
                PagePermission::new(pages::BLOG_LIST, true, true, false),
                PagePermission::new(pages::ABOUT_SECTION, true, true, true),
            ],
        ),
        RoleRightsEntry::new(
            "VIEWER",
            vec![PagePermission::new(pages::BLOG_LIST, true, false, false)],
        ),
    ];
    (StatusCode::OK, Json(ApiResponse::ok(table)))
}

async fn activity_log(
    State(backend): State<Arc<Backend>>,
    Json(entry): Json<ActivityLogEntry>,
) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    if backend.activity_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("E9000", "Activity store unavailable")),
        );
    }
    backend.activity.lock().push(entry);
    (StatusCode::OK, Json(ApiResponse::ok(serde_json::Value::Null)))
}

async fn spawn_backend() -> (Arc<Backend>, String) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/role-rights", get(role_rights))
        .route("/api/activity-log", post(activity_log))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://{addr}"))
}

#[tokio::test]
async fn test_login_loads_rights_once() {
    let (backend, url) = spawn_backend().await;
    let ctx = AdminContext::new(&ClientConfig::new(url)).unwrap();

    ctx.login("editor", "secret").await.unwrap();

    let blog = ctx.resolver().resolve(pages::BLOG_LIST);
    assert_eq!(blog, DerivedPermission::new(true, true, false));
    assert_eq!(
        ctx.resolver().resolve(pages::USER_MANAGEMENT),
        DerivedPermission::DENIED
    );
    for page in pages::ALL_PAGES {
        ctx.resolver().resolve(page);
    }
    assert_eq!(backend.rights_calls.load(Ordering::SeqCst), 1);

    ctx.shutdown().await;
}

#[tokio::test]
async fn test_bad_credentials_stay_unauthenticated() {
    let (backend, url) = spawn_backend().await;
    let ctx = AdminContext::new(&ClientConfig::new(url)).unwrap();

    let result = ctx.login("editor", "wrong").await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert!(ctx.session().current_user().is_none());
    assert_eq!(backend.rights_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unauthorized_rights_load_fails_closed() {
    let (_backend, url) = spawn_backend().await;
    let ctx = AdminContext::new(&ClientConfig::new(url)).unwrap();

    assert!(ctx.ensure_rights_loaded().await.is_err());
    assert_eq!(
        ctx.resolver().resolve(pages::BLOG_LIST),
        DerivedPermission::DENIED
    );
}

#[tokio::test]
async fn test_mutation_posts_activity_entry() {
    let (backend, url) = spawn_backend().await;
    let ctx = AdminContext::new(&ClientConfig::new(url)).unwrap();
    ctx.login("editor", "secret").await.unwrap();

    let permission = ctx.resolver().resolve(pages::ABOUT_SECTION);
    ctx.pipeline()
        .run_gated(
            &permission,
            Change::create(Section::About).subject("Our mission"),
            async { Ok::<_, ClientError>(()) },
        )
        .await
        .unwrap();
    ctx.shutdown().await;

    let entries = backend.activity.lock();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].section, "About");
    assert_eq!(entries[0].link, "/about");
    assert_eq!(entries[0].user_id.as_deref(), Some("u-1"));
    assert_eq!(entries[0].message, "editor created About entry \"Our mission\"");
}

#[tokio::test]
async fn test_activity_outage_does_not_fail_mutation() {
    let (backend, url) = spawn_backend().await;
    backend.activity_down.store(true, Ordering::SeqCst);
    let ctx = AdminContext::new(&ClientConfig::new(url)).unwrap();
    ctx.login("editor", "secret").await.unwrap();

    let result = ctx
        .pipeline()
        .run(Change::delete(Section::Blog), async { Ok::<_, ClientError>(7) })
        .await;
    assert_eq!(result.unwrap(), 7);

    ctx.shutdown().await;
    assert!(backend.activity.lock().is_empty());
}

#[tokio::test]
async fn test_persisted_session_restores_login() {
    let (backend, url) = spawn_backend().await;
    let temp_dir = TempDir::new().unwrap();
    let config = ClientConfig::new(url).with_session_dir(temp_dir.path());

    let first = AdminContext::new(&config).unwrap();
    first.login("editor", "secret").await.unwrap();
    first.shutdown().await;

    let second = AdminContext::new(&config).unwrap();
    assert_eq!(second.session().current_user().unwrap().role, "EDITOR");
    second.ensure_rights_loaded().await.unwrap();
    assert!(!second.resolver().resolve(pages::BLOG_LIST).is_form_disabled);
    assert_eq!(backend.rights_calls.load(Ordering::SeqCst), 2);

    second.logout().unwrap();
    let third = AdminContext::new(&config).unwrap();
    assert!(third.session().current_user().is_none());
}
