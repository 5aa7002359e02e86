/*
 * Responsibility
 * - Agent 設定 (callback URL, logout URL, skip URIs, index page) の読み込み
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動時に一度だけ組み立て、以降は Arc で共有する (setter は持たない)
 */
use std::collections::HashSet;
use std::fmt;

use url::Url;

pub const DEFAULT_LOGOUT_URL: &str = "logout";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Static relying-party settings consulted by `RequestResolver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    callback_url: String,
    callback_path: String,
    logout_url: String,
    skip_uris: HashSet<String>,
    index_page: String,
}

impl AgentConfig {
    pub fn builder(callback_url: impl Into<String>) -> AgentConfigBuilder {
        AgentConfigBuilder::new(callback_url)
    }

    /// Load from the process environment (and `.env` when present).
    ///
    /// - `OIDC_CALLBACK_URL` (required): absolute URL or path
    /// - `OIDC_LOGOUT_URL`: logout path suffix, defaults to `logout`
    /// - `OIDC_SKIP_URIS`: comma separated paths
    /// - `OIDC_INDEX_PAGE`: landing page after login, empty means context root
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let callback_url = lookup("OIDC_CALLBACK_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("OIDC_CALLBACK_URL"))?;

        let logout_url =
            lookup("OIDC_LOGOUT_URL").unwrap_or_else(|| DEFAULT_LOGOUT_URL.to_string());

        let skip_uris = lookup("OIDC_SKIP_URIS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<_>>();

        let index_page = lookup("OIDC_INDEX_PAGE").unwrap_or_default();

        let config = Self::builder(callback_url.trim())
            .logout_url(logout_url.trim())
            .skip_uris(skip_uris)
            .index_page(index_page.trim())
            .build()?;

        tracing::info!(
            callback_path = %config.callback_path,
            logout_url = %config.logout_url,
            skip_uris = config.skip_uris.len(),
            "loaded agent configuration"
        );

        Ok(config)
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Path component of `callback_url`; this is what requests are matched against.
    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }

    pub fn logout_url(&self) -> &str {
        &self.logout_url
    }

    pub fn skip_uris(&self) -> &HashSet<String> {
        &self.skip_uris
    }

    pub fn index_page(&self) -> &str {
        &self.index_page
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfigBuilder {
    callback_url: String,
    logout_url: String,
    skip_uris: HashSet<String>,
    index_page: String,
}

impl AgentConfigBuilder {
    fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
            logout_url: DEFAULT_LOGOUT_URL.to_string(),
            skip_uris: HashSet::new(),
            index_page: String::new(),
        }
    }

    pub fn logout_url(mut self, logout_url: impl Into<String>) -> Self {
        self.logout_url = logout_url.into();
        self
    }

    pub fn skip_uri(mut self, uri: impl Into<String>) -> Self {
        self.skip_uris.insert(uri.into());
        self
    }

    pub fn skip_uris<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_uris.extend(uris.into_iter().map(Into::into));
        self
    }

    pub fn index_page(mut self, index_page: impl Into<String>) -> Self {
        self.index_page = index_page.into();
        self
    }

    pub fn build(self) -> Result<AgentConfig, ConfigError> {
        if self.callback_url.trim().is_empty() {
            return Err(ConfigError::Missing("OIDC_CALLBACK_URL"));
        }
        let callback_path = callback_path(&self.callback_url)?;

        Ok(AgentConfig {
            callback_url: self.callback_url,
            callback_path,
            logout_url: self.logout_url,
            skip_uris: self.skip_uris,
            index_page: self.index_page,
        })
    }
}

// Accepts both `https://rp.example.com/app/callback` and `/app/callback`.
fn callback_path(callback_url: &str) -> Result<String, ConfigError> {
    let url = match Url::parse(callback_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(callback_url))
            .map_err(|_| ConfigError::Invalid("OIDC_CALLBACK_URL"))?,
        Err(_) => return Err(ConfigError::Invalid("OIDC_CALLBACK_URL")),
    };

    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid("OIDC_CALLBACK_URL"));
    }
    Ok(url.path().to_string())
}
