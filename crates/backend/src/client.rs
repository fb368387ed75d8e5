use reqwest::{header::HeaderMap, header::HeaderValue, Client, Method};

use crate::query::QueryBuilder;

const REST_PREFIX: &str = "/rest/v1";

/// Handle on the hosted store. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: Client,
    rest_url: String,
    api_key: String,
    schema: Option<String>,
}

impl BackendClient {
    /// `project_url` is the project root (`https://xyz.supabase.co`); the REST prefix is added here.
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let project_url = project_url.into();
        Self {
            http: Client::new(),
            rest_url: format!("{}{}", project_url.trim_end_matches('/'), REST_PREFIX),
            api_key: api_key.into(),
            schema: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn from_config(cfg: &configs::BackendConfig) -> Self {
        let client = Self::new(cfg.url.clone(), cfg.api_key.clone());
        match &cfg.schema {
            Some(schema) => client.with_schema(schema.clone()),
            None => client,
        }
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Start a query against one table.
    pub fn table(&self, name: &str) -> TableRef<'_> {
        TableRef { client: self, table: name.to_string() }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Auth headers plus the schema profile header matching the request direction.
    pub(crate) fn default_headers(&self, method: &Method) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(v) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", v);
        }
        if let Ok(v) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(reqwest::header::AUTHORIZATION, v);
        }
        if let Some(schema) = &self.schema {
            let name = if *method == Method::GET || *method == Method::HEAD { "accept-profile" } else { "content-profile" };
            if let Ok(v) = HeaderValue::from_str(schema) {
                headers.insert(name, v);
            }
        }
        headers
    }
}

/// A table picked by [`BackendClient::table`]; choose the verb next.
pub struct TableRef<'a> {
    client: &'a BackendClient,
    table: String,
}

impl<'a> TableRef<'a> {
    /// `columns` uses the store's select syntax, e.g. `*` or `*,products(title)`.
    pub fn select(self, columns: &str) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, self.table, Method::GET).select(columns)
    }

    /// Insert one row and read back its stored representation.
    pub fn insert<T: serde::Serialize>(self, row: &T) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, self.table, Method::POST)
            .json_body(serde_json::to_value([row]))
            .prefer("return=representation")
    }

    /// Partial update of the matching rows; only the serialized fields change.
    pub fn update<T: serde::Serialize>(self, patch: &T) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, self.table, Method::PATCH)
            .json_body(serde_json::to_value(patch))
            .prefer("return=representation")
    }

    pub fn delete(self) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, self.table, Method::DELETE)
    }

    /// Row count only; no bodies are transferred.
    pub fn count(self) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, self.table, Method::HEAD)
            .select("*")
            .prefer("count=exact")
    }
}
