use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use edulink::{
    api::ApiClient,
    auth::{
        error::UNEXPECTED_RESPONSE, AuthClient, AuthError, FileStorage, GuardState, MemoryStorage,
        Role, RoleOracle, Storage, UserId,
    },
    config::{AppConfig, Overrides},
    navigation::RecordingNavigator,
    shell::{PageContent, ProtectedShell, ShellView},
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, sync::Notify};

const SLOW_EMAIL: &str = "slow@x.com";
const PARTIAL_EMAIL: &str = "partial@x.com";

struct Account {
    id: i64,
    name: String,
    password: String,
    role: String,
}

#[derive(Default)]
struct Backend {
    users: Mutex<HashMap<String, Account>>,
    release: Notify,
}

type Shared = Arc<Backend>;

fn reply(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

async fn signup(
    State(backend): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let role = field(&body, "role");
    if role != "STUDENT" && role != "TUTOR" {
        return reply(StatusCode::BAD_REQUEST, "Error: Role must be STUDENT or TUTOR");
    }

    let mut users = backend.users.lock().unwrap();
    let email = field(&body, "email").to_string();
    if users.contains_key(&email) {
        return reply(StatusCode::BAD_REQUEST, "Error: Email is already in use!");
    }

    let id = i64::try_from(users.len()).unwrap() + 1;
    users.insert(
        email,
        Account {
            id,
            name: field(&body, "name").to_string(),
            password: field(&body, "password").to_string(),
            role: role.to_string(),
        },
    );
    reply(StatusCode::OK, "User registered successfully!")
}

async fn signin(
    State(backend): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = field(&body, "email");
    if email == SLOW_EMAIL {
        backend.release.notified().await;
    }
    if email == PARTIAL_EMAIL {
        return (StatusCode::OK, Json(json!({ "id": 99, "email": email })));
    }

    let users = backend.users.lock().unwrap();
    let Some(account) = users.get(email) else {
        return reply(StatusCode::BAD_REQUEST, "Error: User not found");
    };
    if account.password != field(&body, "password") {
        return reply(StatusCode::BAD_REQUEST, "Error: Invalid password");
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": account.id,
            "email": email,
            "name": account.name,
            "role": account.role,
            "token": "not-a-session-credential",
        })),
    )
}

async fn spawn_backend() -> (AppConfig, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .with_state(Arc::clone(&backend));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = AppConfig::load(Overrides {
        api_base_url: Some(format!("http://{addr}/api")),
        timeout_secs: Some(5),
        ..Overrides::default()
    })
    .unwrap();
    (config, backend)
}

fn memory_client(config: &AppConfig) -> AuthClient<MemoryStorage> {
    memory_client_with(config, MemoryStorage::new())
}

/// `storage` is shared with the client, so the test can inspect or seed it.
fn memory_client_with(config: &AppConfig, storage: MemoryStorage) -> AuthClient<MemoryStorage> {
    AuthClient::new(ApiClient::new(config).unwrap(), storage)
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

struct DirGuard(PathBuf);

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[tokio::test]
async fn signup_then_login_establishes_the_session() {
    let (config, _backend) = spawn_backend().await;
    let storage = MemoryStorage::new();
    let client = memory_client_with(&config, storage.clone());

    let account = client
        .signup("Jane", "jane@x.com", secret("pw123456"), Role::Student)
        .await
        .unwrap();
    assert_eq!(account.message.as_deref(), Some("User registered successfully!"));
    assert_eq!(client.store().read(), None);

    let identity = client.login("jane@x.com", secret("pw123456")).await.unwrap();
    assert_eq!(identity.id, UserId::Number(1));
    assert_eq!(identity.name, "Jane");
    assert_eq!(identity.role, Role::Student);

    assert_eq!(client.store().read(), Some(identity.clone()));
    assert_eq!(client.context().identity(), Some(identity));
    assert!(!client.is_loading());

    let raw = storage.get_item("user").unwrap().unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert!(stored.get("token").is_none());
}

#[tokio::test]
async fn wrong_password_leaves_the_session_absent() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);
    client
        .signup("Jane", "jane@x.com", secret("pw123456"), Role::Student)
        .await
        .unwrap();

    let err = client.login("jane@x.com", secret("nope")).await.unwrap_err();
    assert_eq!(
        err,
        AuthError::Credentials {
            status: 400,
            message: "Error: Invalid password".to_string(),
        }
    );
    assert_eq!(client.store().read(), None);
    assert!(!client.context().is_authenticated());
}

#[tokio::test]
async fn failed_login_keeps_the_previous_session() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);
    client
        .signup("Tom", "tom@x.com", secret("pw-tom"), Role::Tutor)
        .await
        .unwrap();
    client
        .signup("Jane", "jane@x.com", secret("pw-jane"), Role::Student)
        .await
        .unwrap();
    let tom = client.login("tom@x.com", secret("pw-tom")).await.unwrap();

    let err = client.login("jane@x.com", secret("wrong")).await.unwrap_err();
    assert!(matches!(err, AuthError::Credentials { status: 400, .. }));
    assert_eq!(client.store().read(), Some(tom.clone()));
    assert_eq!(client.context().identity(), Some(tom));
    assert!(client.context().has_role(Role::Tutor));
}

#[tokio::test]
async fn incomplete_login_answer_is_rejected_without_a_session() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);

    let err = client.login(PARTIAL_EMAIL, secret("pw")).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.to_string(), UNEXPECTED_RESPONSE);
    assert_eq!(client.store().read(), None);
}

#[tokio::test]
async fn duplicate_signup_reports_the_backend_message() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);
    client
        .signup("Jane", "jane@x.com", secret("pw123456"), Role::Student)
        .await
        .unwrap();

    let err = client
        .signup("Jane Again", "jane@x.com", secret("other"), Role::Tutor)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error: Email is already in use!");
    assert!(matches!(err, AuthError::Signup { status: 400, .. }));
}

#[tokio::test]
async fn second_login_replaces_the_identity() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);
    client
        .signup("Jane", "jane@x.com", secret("pw1"), Role::Student)
        .await
        .unwrap();
    client
        .signup("Tom", "tom@x.com", secret("pw2"), Role::Tutor)
        .await
        .unwrap();

    client.login("jane@x.com", secret("pw1")).await.unwrap();
    let tom = client.login("tom@x.com", secret("pw2")).await.unwrap();

    assert_eq!(client.store().read(), Some(tom));
    assert!(client.context().has_role(Role::Tutor));
    assert!(!client.context().has_role(Role::Student));
}

#[tokio::test]
async fn logout_revokes_every_role() {
    let (config, _backend) = spawn_backend().await;
    let client = memory_client(&config);
    client
        .signup("Tom", "tom@x.com", secret("pw"), Role::Tutor)
        .await
        .unwrap();
    client.login("tom@x.com", secret("pw")).await.unwrap();

    let held: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| client.context().has_role(*role))
        .collect();
    assert_eq!(held, vec![Role::Tutor]);

    client.logout();
    assert_eq!(client.store().read(), None);
    assert!(Role::ALL
        .into_iter()
        .all(|role| !client.context().has_role(role)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = AppConfig::load(Overrides {
        api_base_url: Some("http://127.0.0.1:9/api".to_string()),
        timeout_secs: Some(2),
        ..Overrides::default()
    })
    .unwrap();
    let client = memory_client(&config);

    let err = client.login("jane@x.com", secret("pw")).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(client.store().read(), None);
}

#[tokio::test]
async fn login_response_after_logout_is_discarded() {
    let (config, backend) = spawn_backend().await;
    let client = Arc::new(memory_client(&config));
    client
        .signup("Slow", SLOW_EMAIL, secret("pw"), Role::Student)
        .await
        .unwrap();

    let pending = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.login(SLOW_EMAIL, secret("pw")).await })
    };

    while !client.is_loading() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    client.logout();
    backend.release.notify_one();

    assert_eq!(pending.await.unwrap(), Err(AuthError::Superseded));
    assert_eq!(client.store().read(), None);
    assert!(!client.context().is_authenticated());
}

#[tokio::test]
async fn shell_login_moves_to_the_dashboard() {
    let (config, _backend) = spawn_backend().await;
    let client = Arc::new(memory_client(&config));
    client
        .signup("Tom", "tom@x.com", secret("pw"), Role::Tutor)
        .await
        .unwrap();

    let recorder = RecordingNavigator::new();
    let mut shell = ProtectedShell::new(Arc::clone(&client), Arc::new(recorder.clone()));
    assert!(matches!(shell.mount("/login"), ShellView::Public { .. }));
    assert_eq!(shell.state(), GuardState::Unauthenticated);

    shell.login("tom@x.com", secret("pw")).await.unwrap();
    assert_eq!(recorder.last().as_deref(), Some("/"));
    assert_eq!(shell.state(), GuardState::Authenticated);

    match shell.render("/students") {
        ShellView::Framed {
            sidebar, content, ..
        } => {
            assert_eq!(content, PageContent::Page);
            assert!(sidebar.contains("/statistics"));
        }
        other => panic!("expected framed view, got {other:?}"),
    }
}

#[tokio::test]
async fn file_session_survives_a_restart() {
    let (config, _backend) = spawn_backend().await;
    let dir = std::env::temp_dir().join(format!("edulink-flow-{}", uuid::Uuid::new_v4()));
    let _guard = DirGuard(dir.clone());
    let config = AppConfig {
        session_dir: dir,
        ..config
    };

    let first = AuthClient::<FileStorage>::from_config(&config).unwrap();
    first
        .signup("Jane", "jane@x.com", secret("pw"), Role::Student)
        .await
        .unwrap();
    let identity = first.login("jane@x.com", secret("pw")).await.unwrap();

    let second = AuthClient::<FileStorage>::from_config(&config).unwrap();
    assert_eq!(second.bootstrap(), Some(identity));
    assert_eq!(second.context().current_role(), Some(Role::Student));

    second.logout();
    let third = AuthClient::<FileStorage>::from_config(&config).unwrap();
    assert_eq!(third.bootstrap(), None);
}

#[tokio::test]
async fn corrupted_session_bootstraps_signed_out() {
    let (config, _backend) = spawn_backend().await;
    let storage = MemoryStorage::new();
    storage.set_item("user", r#"{"id":1,"email":"x@y.z"}"#).unwrap();
    let client = memory_client_with(&config, storage);

    assert_eq!(client.bootstrap(), None);
    assert!(!client.context().has_role(Role::Student));
}
