//! Configuration loader
//!
//! Loads reporter configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `APPLAUSE_API_KEY`: API key (required)
//! - `APPLAUSE_PRODUCT_ID`: Product id (required)
//! - `APPLAUSE_AUTO_API_URL`: Automation API base URL (optional)
//! - `APPLAUSE_PUBLIC_API_URL`: Public API base URL (optional)
//! - `APPLAUSE_TEST_CYCLE_ID`: Applause test cycle id (optional)
//!
//! TestRail options are only loadable from a config file.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./applause.json` or `./applause.toml` (current working directory)
//! 2. `../applause.json` or `../applause.toml` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use applause_domain::{ApplauseConfig, ApplauseError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ApplauseError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ApplauseConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `APPLAUSE_API_KEY` and `APPLAUSE_PRODUCT_ID` must both be present.
///
/// # Errors
/// Returns `ApplauseError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ApplauseConfig> {
    let api_key = env_var("APPLAUSE_API_KEY")?;
    let product_id = env_var("APPLAUSE_PRODUCT_ID").and_then(|s| {
        s.parse::<i64>().map_err(|e| ApplauseError::Config(format!("Invalid product id: {}", e)))
    })?;

    let mut config = ApplauseConfig::new(api_key, product_id);

    if let Ok(url) = std::env::var("APPLAUSE_AUTO_API_URL") {
        config.auto_api_base_url = url;
    }
    if let Ok(url) = std::env::var("APPLAUSE_PUBLIC_API_URL") {
        config.public_api_base_url = url;
    }
    if let Ok(cycle) = std::env::var("APPLAUSE_TEST_CYCLE_ID") {
        let cycle_id = cycle
            .parse::<i64>()
            .map_err(|e| ApplauseError::Config(format!("Invalid test cycle id: {}", e)))?;
        config.applause_test_cycle_id = Some(cycle_id);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ApplauseError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ApplauseConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApplauseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApplauseError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApplauseError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ApplauseConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApplauseError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApplauseError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ApplauseError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("applause.json"),
            cwd.join("applause.toml"),
            cwd.join("../applause.json"),
            cwd.join("../applause.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("applause.json"),
                exe_dir.join("applause.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ApplauseError::Config(format!("Missing required environment variable: {}", key))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("APPLAUSE_API_KEY", "env-key");
        std::env::set_var("APPLAUSE_PRODUCT_ID", "12345");
        std::env::set_var("APPLAUSE_AUTO_API_URL", "https://auto.example.test/");
        std::env::set_var("APPLAUSE_TEST_CYCLE_ID", "99");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.product_id, 12345);
        assert_eq!(config.auto_api_base_url, "https://auto.example.test/");
        assert_eq!(config.applause_test_cycle_id, Some(99));

        std::env::remove_var("APPLAUSE_API_KEY");
        std::env::remove_var("APPLAUSE_PRODUCT_ID");
        std::env::remove_var("APPLAUSE_AUTO_API_URL");
        std::env::remove_var("APPLAUSE_TEST_CYCLE_ID");
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        let saved_api_key = std::env::var("APPLAUSE_API_KEY").ok();
        let saved_product_id = std::env::var("APPLAUSE_PRODUCT_ID").ok();

        std::env::remove_var("APPLAUSE_API_KEY");
        std::env::remove_var("APPLAUSE_PRODUCT_ID");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with missing env var");
        assert!(matches!(result.unwrap_err(), ApplauseError::Config(_)));

        if let Some(val) = saved_api_key {
            std::env::set_var("APPLAUSE_API_KEY", val);
        }
        if let Some(val) = saved_product_id {
            std::env::set_var("APPLAUSE_PRODUCT_ID", val);
        }
    }

    #[test]
    fn test_load_from_env_invalid_product_id() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("APPLAUSE_API_KEY", "env-key");
        std::env::set_var("APPLAUSE_PRODUCT_ID", "not-a-number");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with invalid product id");
        assert!(matches!(result.unwrap_err(), ApplauseError::Config(_)));

        std::env::remove_var("APPLAUSE_API_KEY");
        std::env::remove_var("APPLAUSE_PRODUCT_ID");
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api_key": "file-key",
            "product_id": 54321,
            "test_rail_options": {
                "project_id": 10,
                "suite_id": 20,
                "plan_name": "Plan",
                "run_name": "Run"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from JSON file");

        let config = result.unwrap();
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.product_id, 54321);
        let test_rail = config.test_rail_options.expect("test rail options");
        assert_eq!(test_rail.project_id, 10);
        assert_eq!(test_rail.plan_name, "Plan");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
api_key = "file-key"
product_id = 54321
applause_test_cycle_id = 7
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from TOML file");

        let config = result.unwrap();
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.applause_test_cycle_id, Some(7));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/applause.json")));
        assert!(result.is_err(), "Should fail when file not found");
        assert!(matches!(result.unwrap_err(), ApplauseError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let invalid_json = r#"{ "this is": "not valid json" "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_json.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let content = "some content";
        let path = PathBuf::from("applause.yaml");
        let result = parse_config(content, &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_file_config_uses_default_urls() {
        let json_content = r#"{"api_key": "k", "product_id": 1}"#;
        let path = PathBuf::from("applause.json");
        let config = parse_config(json_content, &path).expect("valid config");
        assert!(config.auto_api_base_url.contains("prod-auto-api"));
        assert!(config.public_api_base_url.contains("prod-public-api"));
    }
}
