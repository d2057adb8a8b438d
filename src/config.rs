use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app_base_path: String,
    pub tracks_directory: PathBuf,
    pub token: String,
    pub http: HttpConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("app_base_path must be empty or start with '/', got {0:?}")]
    InvalidBasePath(String),

    #[error("token must not be empty")]
    EmptyToken,

    #[error("token may only contain A-Z a-z 0-9 - . _ ~, found {0:?}")]
    InvalidTokenCharacter(char),

    #[error("tls is enabled but `tls.{0}` is not set")]
    MissingTlsField(&'static str),
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let cfg: Config = toml::from_str(contents).context("Failed to parse config TOML")?;
        Ok(cfg.validate()?)
    }

    /// Checks invariants serde cannot express and normalizes the base path.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if !self.app_base_path.is_empty() && !self.app_base_path.starts_with('/') {
            return Err(ConfigError::InvalidBasePath(self.app_base_path));
        }
        let trimmed = self.app_base_path.trim_end_matches('/').len();
        self.app_base_path.truncate(trimmed);

        if self.token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        // the token is written into query strings verbatim
        if let Some(c) = self.token.chars().find(|c| !is_unreserved(*c)) {
            return Err(ConfigError::InvalidTokenCharacter(c));
        }

        if self.tls.enabled {
            if self.tls.certificate.is_none() {
                return Err(ConfigError::MissingTlsField("certificate"));
            }
            if self.tls.key.is_none() {
                return Err(ConfigError::MissingTlsField("key"));
            }
        }

        Ok(self)
    }

    /// Port to embed in track URLs for the given scheme, if any.
    pub fn port_in_url(&self, scheme: Scheme) -> Option<u16> {
        match scheme {
            Scheme::Http => self.http.port_in_url,
            Scheme::Https => self.tls.port_in_url,
        }
    }
}

/// RFC 3986 unreserved characters
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
    pub port_in_url: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,
    pub certificate: Option<PathBuf>,
    pub key: Option<PathBuf>,
    #[serde(default = "default_tls_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_tls_port")]
    pub port: u16,
    pub port_in_url: Option<u16>,
}

fn default_tls_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_tls_port() -> u16 {
    8443
}

impl TlsConfig {
    /// `bind_addr:port` of the HTTPS listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            certificate: None,
            key: None,
            bind_addr: default_tls_bind_addr(),
            port: default_tls_port(),
            port_in_url: None,
        }
    }
}
