//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use intake_core::{Config, FileKind};
use std::collections::HashSet;

/// Validate critical configuration values
///
/// Runs the checks of [`Config::validate`] plus the ones that only matter
/// for a running server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        tracing::info!("Production mode: error details are hidden from clients");
    }

    // Two kinds sharing a directory would let one kind overwrite the other's files.
    let mut seen = HashSet::new();
    for kind in FileKind::ALL {
        let dir = config.upload.dir_for(kind);
        if !seen.insert(dir) {
            return Err(anyhow::anyhow!(
                "Upload directory {} is configured for more than one file type",
                dir.display()
            ));
        }
    }

    if config.max_upload_mb() > 1024 {
        tracing::warn!(
            max_upload_mb = config.max_upload_mb(),
            "MAX_UPLOAD_MB is very high - uploads are buffered in memory before being written"
        );
    }

    Ok(())
}
