use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const BACKEND_URL_ENV: &str = "SUPABASE_URL";
pub const BACKEND_KEY_ENV: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Connection settings for the hosted store.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. The REST prefix is appended by the client.
    #[serde(default)]
    pub url: String,
    /// Public (anon) or service key, sent as `apikey` and bearer token.
    #[serde(default)]
    pub api_key: String,
    /// Non-default Postgres schema; `None` uses the store's default (`public`).
    #[serde(default)]
    pub schema: Option<String>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to an all-default
    /// config when the file is missing so that environment variables alone suffice.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.backend.normalize_from_env();
        self.backend.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl BackendConfig {
    /// Fill empty fields from `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn normalize_from_env(&mut self) {
        self.normalize_with(|key| std::env::var(key).ok());
    }

    fn normalize_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.url.trim().is_empty() {
            if let Some(url) = lookup(BACKEND_URL_ENV) {
                self.url = url;
            }
        }
        if self.api_key.trim().is_empty() {
            if let Some(key) = lookup(BACKEND_KEY_ENV) {
                self.api_key = key;
            }
        }
        self.url = self.url.trim().trim_end_matches('/').to_string();
        if matches!(self.schema.as_deref(), Some(s) if s.trim().is_empty()) {
            self.schema = None;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(anyhow!("backend.url is empty; set it in config.toml or {BACKEND_URL_ENV}"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.url must start with http:// or https://"));
        }
        if self.api_key.trim().is_empty() {
            return Err(anyhow!("backend.api_key is empty; set it in config.toml or {BACKEND_KEY_ENV}"));
        }
        Ok(())
    }
}
