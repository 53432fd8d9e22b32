use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Fallback signing secret for local runs; production refuses to start with it.
const DEVELOPMENT_SECRET: &str = "mars-mission-development-secret-key-change-me";

/// Minimum length accepted for the flash cookie signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub secret_key: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("APP_PORT"))?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let storage = StorageConfig {
            roster_path: env_path("APP_ROSTER_PATH", "members/crew.json"),
            static_dir: env_path("APP_STATIC_DIR", "static"),
            gallery_dir: env_path("APP_GALLERY_DIR", "static/galery"),
            temp_dir: env_path("APP_TEMP_DIR", "temp"),
            max_upload_bytes: env::var("APP_MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (16 * 1024 * 1024).to_string())
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidUploadLimit)?,
        };

        let mail = MailConfig::from_env(environment)?;

        let secret_key = match env::var("APP_SECRET_KEY") {
            Ok(secret) => secret,
            Err(_) if environment == AppEnvironment::Production => {
                return Err(ConfigError::Missing("APP_SECRET_KEY"));
            }
            Err(_) => DEVELOPMENT_SECRET.to_string(),
        };
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage,
            mail,
            secret_key,
        })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Filesystem locations shared across requests.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub roster_path: PathBuf,
    pub static_dir: PathBuf,
    pub gallery_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// SMTP relay used to forward astronaut applications.
#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl MailConfig {
    fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let host = env::var("APP_MAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = env::var("APP_MAIL_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("APP_MAIL_PORT"))?;

        let username = env::var("APP_MAIL_USERNAME").unwrap_or_default();
        let password = env::var("APP_MAIL_PASSWORD").unwrap_or_default();
        if environment == AppEnvironment::Production {
            if username.is_empty() {
                return Err(ConfigError::Missing("APP_MAIL_USERNAME"));
            }
            if password.is_empty() {
                return Err(ConfigError::Missing("APP_MAIL_PASSWORD"));
            }
        }

        let from = env::var("APP_MAIL_FROM").unwrap_or_else(|_| {
            if username.is_empty() {
                "mission@example.com".to_string()
            } else {
                username.clone()
            }
        });

        Ok(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }
}

// Keeps the relay password out of startup logs.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(&'static str),
    InvalidHost { source: std::net::AddrParseError },
    InvalidUploadLimit,
    Missing(&'static str),
    SecretTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(key) => write!(f, "{key} must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUploadLimit => {
                write!(f, "APP_MAX_UPLOAD_BYTES must be a byte count")
            }
            ConfigError::Missing(key) => write!(f, "{key} must be set in production"),
            ConfigError::SecretTooShort => write!(
                f,
                "APP_SECRET_KEY must be at least {MIN_SECRET_LEN} bytes long"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort(_)
            | ConfigError::InvalidUploadLimit
            | ConfigError::Missing(_)
            | ConfigError::SecretTooShort => None,
        }
    }
}
