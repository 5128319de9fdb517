//! Integration tests for the FilaDB API client against a mock server.

use std::sync::Arc;

use filadb::domain::ports::KeyValueStore;
use filadb::domain::{ApiError, AuthToken, EntityRecord, QueryParams, RecordId};
use filadb::infrastructure::{ApiClient, ClientSettings, MemoryStore, Resource, TOKEN_KEY};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_client(server: &MockServer, store: Arc<MemoryStore>) -> ApiClient {
    ApiClient::new(ClientSettings::new(server.uri()), store).unwrap()
}

#[tokio::test]
async fn test_success_body_is_returned_unchanged() {
    let server = MockServer::start().await;
    let body = json!([{"id": 1, "name": "PLA Basic", "material": "PLA"}]);

    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/filaments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let filaments = client.get_filaments(&QueryParams::new()).await.unwrap();

    let as_value = Value::Array(filaments.into_iter().map(Value::from).collect());
    assert_eq!(as_value, body);
}

#[tokio::test]
async fn test_detail_becomes_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/spools/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Spool not found"})))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let err = client.get_spool(&RecordId::Int(42)).await.unwrap_err();

    assert_eq!(err.to_string(), "Spool not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_non_json_error_uses_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let err = client.get_files(&QueryParams::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/inventory/spools"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "filament_id"], "msg": "field required", "type": "missing"},
                {"loc": ["body", "weight"], "msg": "value is not a valid float", "type": "float_parsing"}
            ]
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let err = client.create_spool(EntityRecord::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "field required; value is not a valid float");
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ApiClient::new(
        ClientSettings::new(format!("http://127.0.0.1:{port}")),
        Arc::new(MemoryStore::new()),
    )
    .unwrap();
    let err = client.health_check().await.unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.status(), None);
    let ApiError::Transport(source) = &err else {
        panic!("expected a transport error, got {err:?}");
    };
    assert_eq!(err.to_string(), source.to_string());
    assert!(err.to_string().starts_with("error sending request"));
}

#[tokio::test]
async fn test_bearer_header_follows_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    client
        .set_token(AuthToken::new("abc").unwrap())
        .await
        .unwrap();
    client.get_users().await.unwrap();

    client.clear_token().await.unwrap();
    client.get_users().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer abc"
    );
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_posts_form_and_persists_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .and(body_string_contains("name=\"username\""))
        .and(body_string_contains("a@b.com"))
        .and(body_string_contains("name=\"password\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "xyz", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer xyz"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com", "role": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let client = make_client(&server, store.clone());

    let grant = client.login("a@b.com", "secret").await.unwrap();
    assert_eq!(grant.access_token, "xyz");
    assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("xyz"));

    let user = client.get_current_user().await.unwrap();
    assert!(user.is_admin());

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn test_rejected_login_keeps_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let client = make_client(&server, store.clone());

    let err = client.login("a@b.com", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Incorrect email or password");
    assert!(!client.has_token());
    assert!(store.get(TOKEN_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/filaments"))
        .and(query_param("material", "PLA"))
        .and(query_param("color", "Jade White"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let params = QueryParams::from([("material", "PLA"), ("color", "Jade White")]);

    assert!(client.get_filaments(&params).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_json_body_and_update_methods() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/inventory/spools/7"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("\"remaining_weight\":250"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "remaining_weight": 250})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/printers/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "X1C"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let spool = client
        .update_spool(
            &RecordId::Int(7),
            EntityRecord::new().with("remaining_weight", 250),
        )
        .await
        .unwrap();
    assert_eq!(spool.id(), Some(RecordId::Int(7)));

    let printer = client
        .update(
            Resource::Printers,
            &RecordId::Int(3),
            EntityRecord::new().with("name", "X1C"),
        )
        .await
        .unwrap();
    assert_eq!(printer.get("name"), Some(&json!("X1C")));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/inventory/spools/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    assert_eq!(
        client.delete_spool(&RecordId::Int(7)).await.unwrap(),
        Value::Null
    );
}

#[tokio::test]
async fn test_printer_status_and_health() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/printers/3/status"))
        .and(query_param("status", "printing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "printing"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    client
        .update_printer_status(&RecordId::Int(3), "printing")
        .await
        .unwrap();
    let health = client.health_check().await.unwrap();
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_decode_error_on_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/materials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let err = client.get_materials(&QueryParams::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_text_ids_stay_inside_their_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files/..%2Fauth%2Fusers"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "File not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let err = client
        .fetch(Resource::Files, &RecordId::from("../auth/users"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "File not found");

    let err = client
        .fetch(Resource::Files, &RecordId::from(".."))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.path().contains("/auth/"));
}
