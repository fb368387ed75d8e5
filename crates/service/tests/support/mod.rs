//! Stateful stand-in for the hosted store's REST endpoint.
//! Understands `eq.` filters, `order=<col>.<dir>`, the `rating` projection,
//! the `products(title)` embed, single-object reads and exact counts.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use backend::BackendClient;
use chrono::{Duration, SecondsFormat, TimeZone, Utc};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

#[derive(Default)]
struct Tables {
    products: Vec<Value>,
    reviews: Vec<Value>,
    failing: Option<String>,
    clock: i64,
}

impl Tables {
    fn rows_mut(&mut self, table: &str) -> Option<&mut Vec<Value>> {
        match table {
            "products" => Some(&mut self.products),
            "reviews" => Some(&mut self.reviews),
            _ => None,
        }
    }

    fn next_created_at(&mut self) -> String {
        self.clock += 1;
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        (base + Duration::seconds(self.clock)).to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[derive(Clone, Default)]
pub struct FakeStore {
    tables: Arc<Mutex<Tables>>,
}

impl FakeStore {
    pub async fn spawn() -> (Self, BackendClient) {
        let store = Self::default();
        let app = Router::new().fallback(handle).with_state(store.clone());
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await { eprintln!("fake store error: {}", e); }
        });
        (store, BackendClient::new(format!("http://{addr}"), "anon-key"))
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Append rows verbatim, bypassing primary-key checks.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.lock().rows_mut(table).expect("known table").extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().rows_mut(table).expect("known table").clone()
    }

    /// Every request against `table` answers 500 from now on.
    pub fn fail_table(&self, table: &str) {
        self.lock().failing = Some(table.to_string());
    }
}

fn pg_error(status: StatusCode, code: &str, message: &str, details: Option<String>) -> Response {
    (status, Json(json!({ "code": code, "message": message, "details": details, "hint": null }))).into_response()
}

fn text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(col, val)| text(row.get(col)) == *val)
}

fn param<'q>(query: &'q [(String, String)], key: &str) -> Option<&'q str> {
    query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

async fn handle(
    State(store): State<FakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Response {
    let Some(table) = uri.path().strip_prefix("/rest/v1/").map(str::to_string) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut tables = store.lock();
    if tables.failing.as_deref() == Some(table.as_str()) {
        return pg_error(StatusCode::INTERNAL_SERVER_ERROR, "XX000", "boom", None);
    }
    let products = tables.products.clone();
    let created_at = tables.next_created_at();
    let Some(rows) = tables.rows_mut(&table) else {
        return pg_error(StatusCode::NOT_FOUND, "42P01", &format!("relation \"public.{table}\" does not exist"), None);
    };

    let filters: Vec<(String, String)> = query
        .iter()
        .filter(|(k, _)| k != "select" && k != "order")
        .filter_map(|(k, v)| v.strip_prefix("eq.").map(|v| (k.clone(), v.to_string())))
        .collect();

    match method {
        Method::GET => {
            let mut out: Vec<Value> = rows.iter().filter(|r| matches(r, &filters)).cloned().collect();
            if let Some((col, dir)) = param(&query, "order").and_then(|o| o.split_once('.')) {
                // ascending puts NULLs last, so descending puts them first
                let key = |row: &Value| (row.get(col).map_or(true, Value::is_null), text(row.get(col)));
                out.sort_by_key(key);
                if dir == "desc" {
                    out.reverse();
                }
            }
            let select = param(&query, "select").unwrap_or("*");
            let out: Vec<Value> = out.into_iter().map(|row| project(row, select, &products)).collect();

            let wants_object = headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains("vnd.pgrst.object"));
            if wants_object {
                return match out.as_slice() {
                    [one] => Json(one.clone()).into_response(),
                    _ => pg_error(
                        StatusCode::NOT_ACCEPTABLE,
                        "PGRST116",
                        "JSON object requested, multiple (or no) rows returned",
                        Some(format!("The result contains {} rows", out.len())),
                    ),
                };
            }
            Json(out).into_response()
        }
        Method::HEAD => {
            let n = rows.iter().filter(|r| matches(r, &filters)).count();
            let range = if n == 0 { "*/0".to_string() } else { format!("0-{}/{}", n - 1, n) };
            (StatusCode::OK, [(header::CONTENT_RANGE, range)]).into_response()
        }
        Method::POST => {
            let incoming: Vec<Value> = match serde_json::from_str(&body) {
                Ok(Value::Array(items)) => items,
                Ok(obj @ Value::Object(_)) => vec![obj],
                _ => return pg_error(StatusCode::BAD_REQUEST, "PGRST102", "Empty or invalid json", None),
            };
            let mut stored = Vec::new();
            for mut row in incoming {
                let id = text(row.get("id"));
                if rows.iter().any(|r| text(r.get("id")) == id) {
                    return pg_error(
                        StatusCode::CONFLICT,
                        "23505",
                        &format!("duplicate key value violates unique constraint \"{table}_pkey\""),
                        Some(format!("Key (id)=({id}) already exists.")),
                    );
                }
                row["created_at"] = Value::String(created_at.clone());
                rows.push(row.clone());
                stored.push(row);
            }
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Method::PATCH => {
            let patch: Map<String, Value> = match serde_json::from_str(&body) {
                Ok(Value::Object(map)) => map,
                _ => return pg_error(StatusCode::BAD_REQUEST, "PGRST102", "Empty or invalid json", None),
            };
            let mut updated = Vec::new();
            for row in rows.iter_mut().filter(|r| matches(r, &filters)) {
                if let Value::Object(fields) = row {
                    for (k, v) in &patch {
                        fields.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
            Json(updated).into_response()
        }
        Method::DELETE => {
            rows.retain(|r| !matches(r, &filters));
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

fn project(row: Value, select: &str, products: &[Value]) -> Value {
    match select {
        "*" => row,
        "rating" => json!({ "rating": row.get("rating").cloned().unwrap_or(Value::Null) }),
        s if s.contains("products(title)") => {
            let product_id = text(row.get("product_id"));
            let embedded = products
                .iter()
                .find(|p| text(p.get("id")) == product_id)
                .map(|p| json!({ "title": p.get("title").cloned().unwrap_or(Value::Null) }))
                .unwrap_or(Value::Null);
            let mut row = row;
            row["products"] = embedded;
            row
        }
        _ => row,
    }
}
