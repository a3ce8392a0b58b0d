//! Configuration module
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! first when present). Every value except `DATABASE_URL` has a default.

use std::env;
use std::path::{Path, PathBuf};

use crate::models::FileKind;

const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_MB: u64 = 10;
const UPLOAD_ROOT: &str = "uploads";

/// Server and database settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Upload limits and per-kind storage directories
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_upload_mb: u64,
    pub excel_dir: PathBuf,
    pub image_dir: PathBuf,
    pub video_dir: PathBuf,
}

impl UploadConfig {
    /// Defaults rooted at `root`: `excels/`, `images/` and `videos/`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            max_upload_mb: MAX_UPLOAD_MB,
            excel_dir: root.join("excels"),
            image_dir: root.join("images"),
            video_dir: root.join("videos"),
        }
    }

    pub fn dir_for(&self, kind: FileKind) -> &Path {
        match kind {
            FileKind::Spreadsheet => &self.excel_dir,
            FileKind::Image => &self.image_dir,
            FileKind::Video => &self.video_dir,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let root = lookup("UPLOAD_ROOT").unwrap_or_else(|| UPLOAD_ROOT.to_string());
        let defaults = UploadConfig::with_root(&root);

        let upload = UploadConfig {
            max_upload_mb: match lookup("MAX_UPLOAD_MB") {
                Some(mb) => mb
                    .parse()
                    .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_MB must be a whole number"))?,
                None => MAX_UPLOAD_MB,
            },
            excel_dir: lookup("EXCEL_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.excel_dir),
            image_dir: lookup("IMAGE_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
            video_dir: lookup("VIDEO_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_dir),
        };

        Ok(Config { base, upload })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload.max_upload_mb == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_MB must be greater than 0"));
        }
        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }
        if self.base.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("Database timeout cannot be 0"));
        }
        for kind in FileKind::ALL {
            if self.upload.dir_for(kind).as_os_str().is_empty() {
                return Err(anyhow::anyhow!("Upload directory for {} is empty", kind));
            }
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_upload_mb(&self) -> u64 {
        self.upload.max_upload_mb
    }
}
