/// Integration tests for the accounts API
///
/// These drive the full router (extractors, handlers, services and the
/// in-memory store) through HTTP requests:
/// - User create/read/update/delete
/// - Address lifecycle nested under a user
/// - Ownership checks between users
/// - Error bodies and status codes

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{address_body, user_body, TestContext};
use serde_json::json;

const ANA: &str = "11111111-1";
const BEA: &str = "22222222-2";

#[tokio::test]
async fn test_create_and_get_user() {
    let ctx = TestContext::new();

    let response = ctx.post("/api/v1/users", user_body(ANA, "Ana", "ana@x.com")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.location(), Some("/api/v1/users/11111111-1"));
    assert_eq!(response.body["rut"], ANA);
    assert_eq!(response.body["first_name"], "Ana");
    assert_eq!(response.body["email"], "ana@x.com");
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());

    let fetched = ctx.get("/api/v1/users/11111111-1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, response.body);
}

#[tokio::test]
async fn test_location_leads_to_created_user() {
    let ctx = TestContext::new();

    let created = ctx
        .post("/api/v1/users", user_body("12.345-6", "Ana", "ana@x.com"))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let location = created.location().unwrap().to_string();
    let fetched = ctx.get(&location).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
}

#[tokio::test]
async fn test_rut_with_url_characters_is_rejected() {
    let ctx = TestContext::new();

    for rut in ["a?b#c", "a/b", "a b"] {
        let response = ctx.post("/api/v1/users", user_body(rut, "Ana", "ana@x.com")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{} accepted", rut);
        assert_eq!(response.body["details"][0]["field"], "rut");
        assert!(response.location().is_none());
    }

    assert_eq!(ctx.get("/api/v1/users").await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_missing_user() {
    let ctx = TestContext::new();

    let response = ctx.get("/api/v1/users/99999999-9").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not_found");
}

#[tokio::test]
async fn test_duplicate_rut_is_conflict() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx
        .post("/api/v1/users", user_body(ANA, "Other", "other@x.com"))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "conflict");

    // Existing record is untouched
    let fetched = ctx.get("/api/v1/users/11111111-1").await;
    assert_eq!(fetched.body["first_name"], "Ana");
    assert_eq!(fetched.body["email"], "ana@x.com");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx.post("/api/v1/users", user_body(BEA, "Bea", "ana@x.com")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let missing = ctx.get("/api/v1/users/22222222-2").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_validation() {
    let ctx = TestContext::new();

    let response = ctx
        .post(
            "/api/v1/users",
            json!({
                "rut": "",
                "first_name": "",
                "last_name": "Rojas",
                "email": "not-an-email",
                "password": "secret"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "validation_error");

    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"rut"));
    assert!(fields.contains(&"first_name"));
    assert!(fields.contains(&"email"));
    assert!(!fields.contains(&"last_name"));

    let list = ctx.get("/api/v1/users").await;
    assert_eq!(list.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_rut_longer_than_ten_characters() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/v1/users", user_body("123456789-01", "Ana", "ana@x.com"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/v1/users", json!({ "rut": ANA, "first_name": "Ana" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = ctx.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn test_overlong_email_is_rejected() {
    let ctx = TestContext::new();
    let email = format!("{}@{}.com", "a".repeat(60), vec!["b".repeat(60); 4].join("."));

    let response = ctx.post("/api/v1/users", user_body(ANA, "Ana", &email)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_list_users() {
    let ctx = TestContext::new();

    let empty = ctx.get("/api/v1/users").await;
    assert_eq!(empty.status, StatusCode::NO_CONTENT);
    assert!(empty.body.is_null());

    ctx.create_user(BEA, "Bea", "bea@x.com").await;
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx.get("/api/v1/users").await;
    assert_eq!(response.status, StatusCode::OK);

    let mut ruts: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["rut"].as_str().unwrap())
        .collect();
    ruts.sort();
    assert_eq!(ruts, vec![ANA, BEA]);
}

#[tokio::test]
async fn test_update_user_changes_only_names() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx
        .put(
            "/api/v1/users/11111111-1",
            json!({
                "first_name": "Ana María",
                "last_name": "Soto",
                "email": "changed@x.com",
                "password": "changed"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["first_name"], "Ana María");
    assert_eq!(response.body["last_name"], "Soto");
    assert_eq!(response.body["email"], "ana@x.com");

    let fetched = ctx.get("/api/v1/users/11111111-1").await;
    assert_eq!(fetched.body, response.body);
}

#[tokio::test]
async fn test_update_missing_user() {
    let ctx = TestContext::new();

    let response = ctx
        .put(
            "/api/v1/users/99999999-9",
            json!({ "first_name": "Ana", "last_name": "Rojas" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx.delete("/api/v1/users/11111111-1").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let fetched = ctx.get("/api/v1/users/11111111-1").await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = ctx.delete("/api/v1/users/11111111-1").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_address_lifecycle() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let empty = ctx.get("/api/v1/users/11111111-1/addresses").await;
    assert_eq!(empty.status, StatusCode::NO_CONTENT);

    let created = ctx
        .post("/api/v1/users/11111111-1/addresses", address_body("Main"))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(
        created.location(),
        Some(format!("/api/v1/users/11111111-1/addresses/{}", id).as_str())
    );
    assert_eq!(created.body["street"], "Main");
    assert_eq!(created.body["city"], "C1");

    let list = ctx.get("/api/v1/users/11111111-1/addresses").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body, json!([created.body.clone()]));

    let uri = format!("/api/v1/users/11111111-1/addresses/{}", id);

    let fetched = ctx.get(&uri).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);

    let updated = ctx.put(&uri, address_body("Second")).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], id);
    assert_eq!(updated.body["street"], "Second");

    let deleted = ctx.delete(&uri).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(ctx.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get("/api/v1/users/11111111-1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_address_for_missing_user() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/v1/users/99999999-9/addresses", address_body("Main"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let list = ctx.get("/api/v1/users/99999999-9/addresses").await;
    assert_eq!(list.status, StatusCode::NOT_FOUND);

    // Nothing was stored for a user created later with that rut
    ctx.create_user("99999999-9", "Late", "late@x.com").await;
    let list = ctx.get("/api/v1/users/99999999-9/addresses").await;
    assert_eq!(list.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_address_validation() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx
        .post(
            "/api/v1/users/11111111-1/addresses",
            json!({ "street": "", "number": "10", "district": "D1", "city": "" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"].as_array().unwrap().len(), 2);

    let list = ctx.get("/api/v1/users/11111111-1/addresses").await;
    assert_eq!(list.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_non_numeric_address_id() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;

    let response = ctx.get("/api/v1/users/11111111-1/addresses/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn test_addresses_are_scoped_to_owner() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;
    ctx.create_user(BEA, "Bea", "bea@x.com").await;

    let id = ctx.add_address(ANA, "Main").await;
    let foreign = format!("/api/v1/users/22222222-2/addresses/{}", id);

    assert_eq!(ctx.get(&foreign).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        ctx.put(&foreign, address_body("Hijacked")).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(ctx.delete(&foreign).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        ctx.get("/api/v1/users/22222222-2/addresses").await.status,
        StatusCode::NO_CONTENT
    );

    let own = ctx
        .get(&format!("/api/v1/users/11111111-1/addresses/{}", id))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["street"], "Main");
}

#[tokio::test]
async fn test_delete_user_cascades_to_addresses() {
    let ctx = TestContext::new();
    ctx.create_user(ANA, "Ana", "ana@x.com").await;
    ctx.create_user(BEA, "Bea", "bea@x.com").await;

    let first = ctx.add_address(ANA, "Main").await;
    let second = ctx.add_address(ANA, "Second").await;
    let kept = ctx.add_address(BEA, "Other").await;
    assert!(second > first);

    assert_eq!(
        ctx.delete("/api/v1/users/11111111-1").await.status,
        StatusCode::NO_CONTENT
    );

    for id in [first, second] {
        let response = ctx
            .get(&format!("/api/v1/users/11111111-1/addresses/{}", id))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    // Re-registering the rut starts with no addresses
    ctx.create_user(ANA, "Ana", "ana@x.com").await;
    assert_eq!(
        ctx.get("/api/v1/users/11111111-1/addresses").await.status,
        StatusCode::NO_CONTENT
    );

    let other = ctx
        .get(&format!("/api/v1/users/22222222-2/addresses/{}", kept))
        .await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["storage"], "memory");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(ctx.config.storage.backend_name(), "memory");
}
