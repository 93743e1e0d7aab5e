use std::env;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use contact_api::errors::AppError;
use contact_api::geocoding::GeocodingClient;
use contact_api::handlers::{router, AppState};
use contact_api::models::ContactRequest;
use contact_api::store::ContactStore;

/// Storage smoke tests against a live PostgreSQL instance.
/// Marked ignored to avoid running against production by accident; set
/// TEST_DATABASE_URL (or DATABASE_URL) to a disposable database to run:
/// cargo test --test storage_integration -- --include-ignored
async fn test_store() -> anyhow::Result<ContactStore> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&db_url)
        .await?;

    // Schema application is idempotent
    sqlx::raw_sql(include_str!("../schema.sql"))
        .execute(&pool)
        .await?;

    Ok(ContactStore::new(pool))
}

/// Builds a valid creation payload whose name and email are unique per
/// call, so repeated runs never collide.
fn unique_request() -> ContactRequest {
    let tag = Uuid::new_v4().simple().to_string();
    ContactRequest {
        firstname: format!("Smoke{}", &tag[..8]),
        lastname: "Andersson".to_string(),
        email: format!("smoke.{}@example.com", tag),
        personal_number: "550713-1405".to_string(),
        address: "Testgatan 7".to_string(),
        zip_code: "12345".to_string(),
        city: "Teststad".to_string(),
        country: "Testland".to_string(),
    }
}

fn wire_payload(request: &ContactRequest) -> Value {
    json!({
        "firstname": request.firstname,
        "lastname": request.lastname,
        "email": request.email,
        "personalnumber": request.personal_number,
        "address": request.address,
        "zipCode": request.zip_code,
        "city": request.city,
        "country": request.country
    })
}

async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore]
async fn test_create_and_fetch_roundtrip() -> anyhow::Result<()> {
    let store = test_store().await?;
    let request = unique_request();

    let created = store.create(&request).await?;

    assert_eq!(created.firstname, request.firstname);
    assert_eq!(created.email, request.email);
    // Coordinates are never written by the API
    assert_eq!(created.lat, None);
    assert_eq!(created.lng, None);

    let fetched = store
        .find_by_id(&created.id.to_string())
        .await?
        .ok_or_else(|| anyhow::anyhow!("created contact missing"))?;

    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_create_rejects_invalid_field_before_writing() -> anyhow::Result<()> {
    let store = test_store().await?;

    let mut request = unique_request();
    request.email = "not-an-email".to_string();

    match store.create(&request).await {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid email"),
        other => anyhow::bail!("expected validation rejection, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_list_contains_created_contact() -> anyhow::Result<()> {
    let store = test_store().await?;
    let created = store.create(&unique_request()).await?;

    let all = store.list_all().await?;

    assert!(all.iter().any(|contact| contact.id == created.id));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_find_by_id_absent_uuid_is_none() -> anyhow::Result<()> {
    let store = test_store().await?;

    let result = store.find_by_id(&Uuid::new_v4().to_string()).await;

    assert!(matches!(result, Ok(None)));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_fetch_absent_contact_is_404_not_found() -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: test_store().await?,
        geocoder: GeocodingClient::new("http://127.0.0.1:9/api/geocoding".to_string()),
    });

    // Well-formed identifier with no record; never reaches the geocoder
    let (status, body) = send(
        state,
        Request::builder()
            .uri(format!("/contact/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact not found");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_list_endpoint_returns_array() -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: test_store().await?,
        geocoder: GeocodingClient::new("http://127.0.0.1:9/api/geocoding".to_string()),
    });

    let (status, body) = send(
        state,
        Request::builder()
            .uri("/contact")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_find_by_id_malformed_is_distinct_error() -> anyhow::Result<()> {
    let store = test_store().await?;

    let result = store.find_by_id("not-a-uuid").await;

    assert!(matches!(result, Err(AppError::MalformedId)));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_full_enrichment_roundtrip() -> anyhow::Result<()> {
    let store = test_store().await?;
    let mock_server = MockServer::start().await;
    let request = unique_request();

    Mock::given(method("GET"))
        .and(path("/api/geocoding"))
        .and(query_param("address", "Testgatan 7, Teststad, Testland"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": 59.3251172,
            "lng": 18.0710935
        })))
        .mount(&mock_server)
        .await;

    let state = Arc::new(AppState {
        store,
        geocoder: GeocodingClient::new(format!("{}/api/geocoding", mock_server.uri())),
    });

    // Create over HTTP; the stored record carries no coordinates
    let (status, created) = send(
        state.clone(),
        Request::builder()
            .method("POST")
            .uri("/contact")
            .header("content-type", "application/json")
            .body(Body::from(wire_payload(&request).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing _id in creation response"))?
        .to_string();
    assert!(created.get("lat").is_none());
    assert!(created.get("lng").is_none());

    // Fetch enriches from the mock geocoder
    let (status, first) = send(
        state.clone(),
        Request::builder()
            .uri(format!("/contact/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["_id"], id.as_str());
    assert_eq!(first["lat"], 59.3251172);
    assert_eq!(first["lng"], 18.0710935);

    // Enrichment happens on every read and stays stable
    let (status, second) = send(
        state,
        Request::builder()
            .uri(format!("/contact/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_fetch_without_coordinates_fails_with_fixed_message() -> anyhow::Result<()> {
    let store = test_store().await?;
    let mock_server = MockServer::start().await;

    let created = store.create(&unique_request()).await?;

    // Geocoder answers but has nothing for this address
    Mock::given(method("GET"))
        .and(path("/api/geocoding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let state = Arc::new(AppState {
        store,
        geocoder: GeocodingClient::new(format!("{}/api/geocoding", mock_server.uri())),
    });

    let (status, body) = send(
        state,
        Request::builder()
            .uri(format!("/contact/{}", created.id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve coordinates");
    Ok(())
}
