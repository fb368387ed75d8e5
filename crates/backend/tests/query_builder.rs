use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use backend::{BackendClient, BackendError};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
struct Captured {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: String,
}

impl Captured {
    fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }
}

type Responder = fn(&Captured) -> Response;

#[derive(Clone)]
struct FakeStore {
    seen: Arc<Mutex<Vec<Captured>>>,
    respond: Responder,
}

async fn record(
    State(store): State<FakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Response {
    let captured = Captured { method, path: uri.path().to_string(), query, headers, body };
    let resp = (store.respond)(&captured);
    store.seen.lock().unwrap().push(captured);
    resp
}

async fn spawn(respond: Responder) -> (BackendClient, Arc<Mutex<Vec<Captured>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record).with_state(FakeStore { seen: Arc::clone(&seen), respond });
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("fake store error: {}", e); }
    });
    (BackendClient::new(format!("http://{addr}"), "anon-key"), seen)
}

fn last(seen: &Arc<Mutex<Vec<Captured>>>) -> Captured {
    seen.lock().unwrap().last().cloned().expect("a request reached the fake store")
}

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    id: String,
}

#[tokio::test]
async fn select_sends_filters_and_auth() {
    let (client, seen) = spawn(|_| (StatusCode::OK, axum::Json(json!([{ "id": "b" }, { "id": "a" }]))).into_response()).await;

    let rows: Vec<Row> = client.table("products").select("*").order("created_at", false).execute().await.unwrap();
    assert_eq!(rows, vec![Row { id: "b".into() }, Row { id: "a".into() }]);

    let req = last(&seen);
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/rest/v1/products");
    assert_eq!(req.param("select"), Some("*"));
    assert_eq!(req.param("order"), Some("created_at.desc"));
    assert_eq!(req.header("apikey"), Some("anon-key"));
    assert_eq!(req.header("authorization"), Some("Bearer anon-key"));
}

#[tokio::test]
async fn single_requests_object_and_surfaces_store_error() {
    let (client, seen) = spawn(|_| {
        (
            StatusCode::NOT_ACCEPTABLE,
            axum::Json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })),
        )
            .into_response()
    })
    .await;

    let err = client.table("products").select("*").eq("id", "missing").single::<Row>().await.unwrap_err();
    match &err {
        BackendError::Api(e) => {
            assert_eq!(e.status, 406);
            assert_eq!(e.code.as_deref(), Some("PGRST116"));
            assert_eq!(e.details.as_deref(), Some("The result contains 0 rows"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_not_found());

    let req = last(&seen);
    assert_eq!(req.param("id"), Some("eq.missing"));
    assert_eq!(req.header("accept"), Some("application/vnd.pgrst.object+json"));
}

#[tokio::test]
async fn insert_posts_array_and_returns_representation() {
    let (client, seen) = spawn(|req| {
        let rows: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        (StatusCode::CREATED, axum::Json(rows)).into_response()
    })
    .await;

    let row: Row = client.table("products").insert(&json!({ "id": "p-9" })).execute_first().await.unwrap();
    assert_eq!(row.id, "p-9");

    let req = last(&seen);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.header("prefer"), Some("return=representation"));
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, json!([{ "id": "p-9" }]));
}

#[tokio::test]
async fn update_with_no_matching_rows_is_empty_result() {
    let (client, seen) = spawn(|_| (StatusCode::OK, axum::Json(json!([]))).into_response()).await;

    let err = client
        .table("products")
        .update(&json!({ "stock": 2 }))
        .eq("id", "ghost")
        .execute_first::<Row>()
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::EmptyResult { ref table } if table == "products"));

    let req = last(&seen);
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.param("id"), Some("eq.ghost"));
    assert_eq!(req.body, r#"{"stock":2}"#);
}

#[tokio::test]
async fn delete_filters_by_id() {
    let (client, seen) = spawn(|_| StatusCode::NO_CONTENT.into_response()).await;

    client.table("reviews").delete().eq("id", "r-1").execute_empty().await.unwrap();

    let req = last(&seen);
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/rest/v1/reviews");
    assert_eq!(req.param("id"), Some("eq.r-1"));
    assert_eq!(req.header("prefer"), None);
}

#[tokio::test]
async fn count_reads_content_range() {
    let (client, seen) = spawn(|_| (StatusCode::OK, [(header::CONTENT_RANGE, "0-24/25")]).into_response()).await;

    assert_eq!(client.table("products").count().exact_count().await.unwrap(), 25);

    let req = last(&seen);
    assert_eq!(req.method, Method::HEAD);
    assert_eq!(req.header("prefer"), Some("count=exact"));
}

#[tokio::test]
async fn count_without_total_is_zero() {
    let (client, _seen) = spawn(|_| (StatusCode::OK, [(header::CONTENT_RANGE, "*/*")]).into_response()).await;
    assert_eq!(client.table("reviews").count().exact_count().await.unwrap(), 0);
}

#[tokio::test]
async fn schema_profile_headers_are_sent() {
    let (client, seen) = spawn(|_| (StatusCode::OK, axum::Json(json!([]))).into_response()).await;
    let client = client.with_schema("shop");

    let _: Vec<Row> = client.table("products").select("*").execute().await.unwrap();
    assert_eq!(last(&seen).header("accept-profile"), Some("shop"));
}

#[tokio::test]
async fn unreachable_store_is_network_error() {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BackendClient::new(format!("http://{addr}"), "k");
    let err = client.table("products").select("*").execute::<Row>().await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
}
