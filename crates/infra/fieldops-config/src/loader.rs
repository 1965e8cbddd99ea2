//! Configuration loader with two-layer merge and env overrides.
//!
//! 1. Read global config from `~/.config/fieldops/fieldops.json`
//! 2. Read local config from `./fieldops.json`
//! 3. Deep merge at the JSON value level (RFC 7396)
//! 4. Deserialize once into [`FieldOpsConfig`]
//! 5. Apply env var overrides (highest precedence)
//! 6. Run advisory validation

use crate::{merge::merge_patch, types::FieldOpsConfig, validation::AdvisoryWarning};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filename for local config.
pub const LOCAL_FILE: &str = "fieldops.json";

/// Directory name under the platform config dir for global config.
pub const GLOBAL_DIR: &str = "fieldops";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "fieldops.json";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct FieldOpsConfigPaths {
    /// Path to local config (`./fieldops.json`).
    pub local: PathBuf,

    /// Path to global config (`~/.config/fieldops/fieldops.json`).
    pub global: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedFieldOpsConfig {
    /// The merged configuration.
    pub config: FieldOpsConfig,

    /// Advisory warnings from validation.
    pub warnings: Vec<AdvisoryWarning>,

    /// Resolved config file paths.
    pub paths: FieldOpsConfigPaths,
}

/// Get the global config file path.
pub fn global_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from the global file and `local_dir/fieldops.json`.
pub fn load_merged(local_dir: &Path) -> Result<LoadedFieldOpsConfig> {
    let global_path = global_config_path()?;
    load_from_paths(&global_path, &local_config_path(local_dir))
}

/// Load and merge configuration from explicit file paths.
///
/// Missing files count as empty objects.
pub fn load_from_paths(global_path: &Path, local_path: &Path) -> Result<LoadedFieldOpsConfig> {
    let global_v = read_json_object_or_empty(global_path)?;
    let local_v = read_json_object_or_empty(local_path)?;

    let merged = merge_patch(global_v, local_v);

    let mut cfg: FieldOpsConfig =
        serde_json::from_value(merged).context("Failed to deserialize merged fieldops config")?;

    apply_env_overrides(&mut cfg);

    let warnings = crate::validation::validate(&cfg);

    Ok(LoadedFieldOpsConfig {
        config: cfg,
        warnings,
        paths: FieldOpsConfigPaths {
            local: local_path.to_path_buf(),
            global: global_path.to_path_buf(),
        },
    })
}

fn apply_env_overrides(cfg: &mut FieldOpsConfig) {
    if let Some(v) = env_trimmed("FIELDOPS_API_BASE_URL") {
        cfg.services.api.base_url = v;
    }
    if let Some(k) = env_trimmed("FIELDOPS_API_KEY") {
        cfg.services.api.api_key = Some(secrecy::SecretString::from(k));
    }

    if let Some(v) = env_trimmed("FIELDOPS_GEOCODER_URL") {
        cfg.services.geocoder.base_url = v;
    }
    if let Some(v) = env_trimmed("FIELDOPS_GEOCODER_USER_AGENT") {
        cfg.services.geocoder.user_agent = Some(v);
    }

    if let Some(v) = env_trimmed("FIELDOPS_COVERAGE_CONCURRENCY") {
        match v.parse::<usize>() {
            Ok(n) => cfg.coverage.concurrency = n,
            Err(e) => {
                tracing::warn!(value = %v, error = %e, "ignoring FIELDOPS_COVERAGE_CONCURRENCY");
            }
        }
    }

    if let Some(v) = env_trimmed("FIELDOPS_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_trimmed("FIELDOPS_LOG_JSON") {
        cfg.logging.json = v.eq_ignore_ascii_case("true") || v == "1";
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(_) => Ok(v),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}
