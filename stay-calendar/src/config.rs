//! Calendar configuration stored as YAML (or JSON for `.json` files).
//!
//! Missing files and missing keys fall back to [`CalendarConfig::default`].

use anyhow::{anyhow, Result};
use log::{info, warn};
use shared::CalendarConfig;
use std::fs;
use std::path::Path;

/// Load the calendar config from `path`, using defaults when the file is absent
pub fn load_config(path: &Path) -> Result<CalendarConfig> {
    if !path.exists() {
        info!("📋 No calendar config at {:?}, using defaults", path);
        return Ok(CalendarConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = if is_json(path) {
        serde_json::from_str::<CalendarConfig>(&content)
            .map_err(anyhow::Error::from)
            .and_then(sanitize)
    } else {
        parse_config(&content)
    }
    .map_err(|e| anyhow!("Failed to parse calendar config {:?}: {}", path, e))?;

    info!(
        "📋 Loaded calendar config: min stay {} nights, blocking {:?}",
        config.min_stay_nights, config.blocking_statuses
    );
    Ok(config)
}

/// Parse YAML config text. An empty document yields the defaults.
pub fn parse_config(yaml_content: &str) -> Result<CalendarConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(CalendarConfig::default());
    }

    sanitize(serde_yaml::from_str(yaml_content)?)
}

fn sanitize(mut config: CalendarConfig) -> Result<CalendarConfig> {
    if config.min_stay_nights == 0 {
        warn!("⚠️ min_stay_nights of 0 is not allowed, using 1");
        config.min_stay_nights = 1;
    }
    for status in config.blocking_statuses.iter_mut() {
        *status = status.trim().to_lowercase();
    }
    Ok(config)
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Write the config to `path`
pub fn save_config(path: &Path, config: &CalendarConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        serde_yaml::to_string(config)?
    };

    // Atomic write using temp file
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    info!("📝 Saved calendar config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(&temp_dir.path().join("calendar.yaml")).unwrap();
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(config.min_stay_nights, 2);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("calendar.yaml");
        fs::write(&path, "min_stay_nights: 3\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.min_stay_nights, 3);
        assert_eq!(
            config.blocking_statuses,
            vec!["pending".to_string(), "confirmed".to_string()]
        );
        assert!(!config.enable_debug_logging);
    }

    #[test]
    fn test_zero_min_stay_is_raised_to_one() {
        let config = parse_config("min_stay_nights: 0").unwrap();
        assert_eq!(config.min_stay_nights, 1);
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(parse_config("  \n").unwrap(), CalendarConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("calendar.yaml");
        fs::write(&path, "min_stay_nights: [not, a, number]").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings").join("calendar.yaml");
        let config = CalendarConfig {
            min_stay_nights: 4,
            blocking_statuses: vec!["confirmed".to_string()],
            enable_debug_logging: true,
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_json_config_is_supported() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("calendar.json");
        fs::write(&path, r#"{ "blocking_statuses": ["Confirmed"], "min_stay_nights": 0 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.blocking_statuses, vec!["confirmed".to_string()]);
        assert_eq!(config.min_stay_nights, 1);
        assert!(!config.enable_debug_logging);
    }
}
