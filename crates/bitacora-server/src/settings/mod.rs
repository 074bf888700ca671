//! Configuration layer: typed settings loaded from files, then environment.
//!
//! Sources, lowest precedence first:
//! - `config/default.{toml,yaml,json}` (optional)
//! - `bitacora.{toml,yaml,json}` in the working directory (optional)
//! - `BITACORA_*` environment variables, `__` between sections
//!   (`BITACORA_SERVER__PORT=8080`, `BITACORA_CACHE__TTL_MS=5000`)
//!
//! The raw layer is deserialized leniently and then validated into [`Settings`];
//! any invalid value aborts startup with a [`LoadError`] naming the key.

use std::{fmt, net::SocketAddr, num::NonZeroU32, str::FromStr, time::Duration};

use bitacora_store::PgConnectOptions;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "bitacora";
const ENV_PREFIX: &str = "BITACORA";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

const DEFAULT_API_PREFIX: &str = "api";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_DOCS_PATH: &str = "docs";

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_TEST_PORT: u16 = 5433;
const DEFAULT_DB_USERNAME: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "blog";
const DEFAULT_DB_TEST_NAME: &str = "blog_test";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

const DEFAULT_CACHE_HOST: &str = "localhost";
const DEFAULT_CACHE_PORT: u16 = 6379;
const DEFAULT_CACHE_TEST_PORT: u16 = 6380;
const DEFAULT_CACHE_TTL_MS: u64 = 60_000;
const DEFAULT_CACHE_TEST_TTL_MS: u64 = 1_000;
const DEFAULT_CACHE_NAMESPACE: &str = "bitacora";
const DEFAULT_CACHE_MAX_CAPACITY: u64 = 10_000;

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "unknown environment `{other}` (expected development, production or test)"
            )),
        }
    }
}

/// Fully validated application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
}

/// Route layout of the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub prefix: String,
    pub version: String,
    pub docs_path: String,
}

impl ApiSettings {
    /// Base path of the versioned API, e.g. `/api/v1`.
    pub fn base_path(&self) -> String {
        format!("/{}/{}", self.prefix, self.version)
    }

    /// Collection path of the blog resource, e.g. `/api/v1/blog`.
    pub fn blog_path(&self) -> String {
        format!("{}/blog", self.base_path())
    }

    /// Path of the OpenAPI document, e.g. `/docs`.
    pub fn docs_route(&self) -> String {
        format!("/{}", self.docs_path)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_API_PREFIX.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            docs_path: DEFAULT_DOCS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    pub connect_options: PgConnectOptions,
    pub max_connections: NonZeroU32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// Connection URL for the Redis backend.
    pub url: String,
    /// Default time-to-live for cache entries.
    pub ttl: Duration,
    /// Logical partition; every key is stored under `{namespace}:`.
    pub namespace: String,
    /// Entry bound of the in-process backend.
    pub max_capacity: u64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings from the configured sources (files, then environment).
pub fn load() -> Result<Settings, LoadError> {
    let config = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Settings::from_config(config)
}

impl Settings {
    /// Validates an already built [`Config`].
    pub fn from_config(config: Config) -> Result<Self, LoadError> {
        let raw: RawSettings = config.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            environment,
            server,
            api,
            logging,
            database,
            cache,
        } = raw;

        let environment = match environment {
            Some(value) => Environment::from_str(&value)
                .map_err(|reason| LoadError::invalid("environment", reason))?,
            None => Environment::default(),
        };

        let server = build_server_settings(server)?;
        let api = build_api_settings(api)?;
        let logging = build_logging_settings(logging)?;
        let database = build_database_settings(database, environment)?;
        let cache = build_cache_settings(cache, environment)?;

        Ok(Self {
            environment,
            server,
            api,
            logging,
            database,
            cache,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.host", reason))?;

    let max_body_bytes = server.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
    if max_body_bytes == 0 {
        return Err(LoadError::invalid(
            "server.max_body_bytes",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        max_body_bytes,
    })
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    Ok(ApiSettings {
        prefix: path_segment(api.prefix, DEFAULT_API_PREFIX, "api.prefix")?,
        version: path_segment(api.version, DEFAULT_API_VERSION, "api.version")?,
        docs_path: path_segment(api.docs_path, DEFAULT_DOCS_PATH, "api.docs_path")?,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = match logging.format.as_deref().map(str::trim) {
        None | Some("compact") => LogFormat::Compact,
        Some("json") => LogFormat::Json,
        Some(other) => {
            return Err(LoadError::invalid(
                "logging.format",
                format!("unknown format `{other}` (expected compact or json)"),
            ));
        }
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(
    database: RawDatabaseSettings,
    environment: Environment,
) -> Result<DatabaseSettings, LoadError> {
    let backend = match database.backend.as_deref().map(str::trim) {
        None | Some("postgres") => DatabaseBackend::Postgres,
        Some("memory") => DatabaseBackend::Memory,
        Some(other) => {
            return Err(LoadError::invalid(
                "database.backend",
                format!("unknown backend `{other}` (expected postgres or memory)"),
            ));
        }
    };

    let url = non_blank(database.url);
    let connect_options = match url {
        Some(url) => PgConnectOptions::from_str(&url)
            .map_err(|err| LoadError::invalid("database.url", err.to_string()))?,
        None => {
            let (default_port, default_name) = match environment {
                Environment::Test => (DEFAULT_DB_TEST_PORT, DEFAULT_DB_TEST_NAME),
                _ => (DEFAULT_DB_PORT, DEFAULT_DB_NAME),
            };

            let port = database.port.unwrap_or(default_port);
            if port == 0 {
                return Err(LoadError::invalid(
                    "database.port",
                    "port must be greater than zero",
                ));
            }

            PgConnectOptions::new()
                .host(
                    non_blank(database.host)
                        .as_deref()
                        .unwrap_or(DEFAULT_DB_HOST),
                )
                .port(port)
                .username(
                    non_blank(database.username)
                        .as_deref()
                        .unwrap_or(DEFAULT_DB_USERNAME),
                )
                .password(database.password.as_deref().unwrap_or(DEFAULT_DB_PASSWORD))
                .database(non_blank(database.name).as_deref().unwrap_or(default_name))
        }
    };

    let max_connections = non_zero_u32(
        database
            .max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .into(),
        "database.max_connections",
    )?;

    let run_migrations = database
        .run_migrations
        .unwrap_or(environment != Environment::Production);

    Ok(DatabaseSettings {
        backend,
        connect_options,
        max_connections,
        run_migrations,
    })
}

fn build_cache_settings(
    cache: RawCacheSettings,
    environment: Environment,
) -> Result<CacheSettings, LoadError> {
    let backend = match cache.backend.as_deref().map(str::trim) {
        None | Some("redis") => CacheBackend::Redis,
        Some("memory") => CacheBackend::Memory,
        Some(other) => {
            return Err(LoadError::invalid(
                "cache.backend",
                format!("unknown backend `{other}` (expected redis or memory)"),
            ));
        }
    };

    let (default_port, default_ttl_ms) = match environment {
        Environment::Test => (DEFAULT_CACHE_TEST_PORT, DEFAULT_CACHE_TEST_TTL_MS),
        _ => (DEFAULT_CACHE_PORT, DEFAULT_CACHE_TTL_MS),
    };

    let url = match non_blank(cache.url) {
        Some(url) => {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(LoadError::invalid(
                    "cache.url",
                    "expected a redis:// or rediss:// URL",
                ));
            }
            url
        }
        None => {
            let host = non_blank(cache.host).unwrap_or_else(|| DEFAULT_CACHE_HOST.to_string());
            let port = cache.port.unwrap_or(default_port);
            if port == 0 {
                return Err(LoadError::invalid(
                    "cache.port",
                    "port must be greater than zero",
                ));
            }
            format!("redis://{host}:{port}")
        }
    };

    let ttl_ms = cache.ttl_ms.unwrap_or(default_ttl_ms);
    if ttl_ms == 0 {
        return Err(LoadError::invalid(
            "cache.ttl_ms",
            "must be greater than zero",
        ));
    }

    let namespace = non_blank(cache.namespace).unwrap_or_else(|| DEFAULT_CACHE_NAMESPACE.into());
    if namespace.contains(char::is_whitespace) {
        return Err(LoadError::invalid(
            "cache.namespace",
            "must not contain whitespace",
        ));
    }

    let max_capacity = cache.max_capacity.unwrap_or(DEFAULT_CACHE_MAX_CAPACITY);
    if max_capacity == 0 {
        return Err(LoadError::invalid(
            "cache.max_capacity",
            "must be greater than zero",
        ));
    }

    Ok(CacheSettings {
        backend,
        url,
        ttl: Duration::from_millis(ttl_ms),
        namespace,
        max_capacity,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    environment: Option<String>,
    server: RawServerSettings,
    api: RawApiSettings,
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    cache: RawCacheSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    prefix: Option<String>,
    version: Option<String>,
    docs_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    backend: Option<String>,
    url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
    max_connections: Option<u32>,
    run_migrations: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    backend: Option<String>,
    url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    ttl_ms: Option<u64>,
    namespace: Option<String>,
    max_capacity: Option<u64>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn path_segment(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    let segment = match value {
        Some(value) => value.trim().trim_matches('/').to_string(),
        None => return Ok(default.to_string()),
    };

    if segment.is_empty() {
        return Err(LoadError::invalid(key, "must not be empty"));
    }
    if segment.contains('/') || segment.contains(char::is_whitespace) {
        return Err(LoadError::invalid(
            key,
            "must be a single path segment without `/` or whitespace",
        ));
    }

    Ok(segment)
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}
