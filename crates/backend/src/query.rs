use std::fmt::Display;

use reqwest::{
    header::{HeaderValue, ACCEPT, CONTENT_RANGE},
    Method, Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::BackendClient;
use crate::errors::{BackendError, PostgrestError};
use crate::observability::{BACKEND_ERRORS_TOTAL, BACKEND_REQUESTS_TOTAL, BACKEND_REQUEST_DURATION};

/// Media type asking the store for exactly one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// One pending request. Built by [`crate::client::TableRef`], sent by a terminal method.
pub struct QueryBuilder<'a> {
    client: &'a BackendClient,
    table: String,
    method: Method,
    params: Vec<(String, String)>,
    prefer: Vec<&'static str>,
    body: Option<Result<Value, String>>,
    single: bool,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a BackendClient, table: String, method: Method) -> Self {
        Self { client, table, method, params: Vec::new(), prefer: Vec::new(), body: None, single: false }
    }

    pub(crate) fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub(crate) fn prefer(mut self, pref: &'static str) -> Self {
        self.prefer.push(pref);
        self
    }

    pub(crate) fn json_body(mut self, body: Result<Value, serde_json::Error>) -> Self {
        self.body = Some(body.map_err(|e| e.to_string()));
        self
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".into(), format!("{column}.{dir}")));
        self
    }

    /// Query parameters in the order they will be sent.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// All matching rows.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let resp = self.send().await?;
        resp.json::<Vec<T>>().await.map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Exactly one row; the store answers with an error when zero or several match.
    pub async fn single<T: DeserializeOwned>(mut self) -> Result<T, BackendError> {
        self.single = true;
        let resp = self.send().await?;
        resp.json::<T>().await.map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// First row of a mutation's returned representation.
    pub async fn execute_first<T: DeserializeOwned>(self) -> Result<T, BackendError> {
        let table = self.table.clone();
        self.execute::<T>()
            .await?
            .into_iter()
            .next()
            .ok_or(BackendError::EmptyResult { table })
    }

    /// Send and discard any body.
    pub async fn execute_empty(self) -> Result<(), BackendError> {
        self.send().await.map(|_| ())
    }

    /// Total reported in `Content-Range`; a missing or unknown total reads as 0.
    pub async fn exact_count(self) -> Result<u64, BackendError> {
        let resp = self.send().await?;
        Ok(resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(0))
    }

    async fn send(self) -> Result<Response, BackendError> {
        let QueryBuilder { client, table, method, params, prefer, body, single } = self;
        let labels = [table.as_str(), method.as_str()];
        BACKEND_REQUESTS_TOTAL.with_label_values(&labels).inc();
        let timer = BACKEND_REQUEST_DURATION.with_label_values(&labels).start_timer();

        let url = format!("{}/{}", client.rest_url(), table);
        let mut headers = client.default_headers(&method);
        if !prefer.is_empty() {
            if let Ok(v) = HeaderValue::from_str(&prefer.join(",")) {
                headers.insert("prefer", v);
            }
        }
        if single {
            headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        }

        let mut req = client.http().request(method.clone(), &url).headers(headers).query(&params);
        if let Some(body) = body {
            let body = body.map_err(BackendError::Parse)?;
            req = req.json(&body);
        }

        debug!(%table, %method, ?params, "backend request");
        let sent = req.send().await;
        timer.observe_duration();

        let resp = match sent {
            Ok(resp) => resp,
            Err(e) => {
                BACKEND_ERRORS_TOTAL.with_label_values(&labels).inc();
                warn!(%table, %method, error = %e, "backend unreachable");
                return Err(BackendError::Network(e.to_string()));
            }
        };

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        BACKEND_ERRORS_TOTAL.with_label_values(&labels).inc();
        let text = resp.text().await.unwrap_or_default();
        let err = PostgrestError::from_body(status.as_u16(), &text);
        warn!(%table, %method, status = status.as_u16(), code = ?err.code, message = %err.message, "backend returned error");
        Err(BackendError::Api(err))
    }
}

/// `0-24/25` → 25, `*/0` → 0, `*/*` → None.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/').and_then(|(_, total)| total.trim().parse().ok())
}
