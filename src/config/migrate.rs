//! Configuration file upgrades: detect keys added by newer versions and
//! write them with their default values, keeping the user's settings.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every current configuration file is expected to contain.
pub const KNOWN_KEYS: [&str; 5] = [
    "database",
    "default_user",
    "catalog_page_size",
    "warn_unbound_achievements",
    "separator_char",
];

/// Return the known keys absent from a YAML configuration document.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let map = yaml
        .as_mapping()
        .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add every missing key to `content`, with its default value.
/// Returns the updated document and the keys that were added.
pub fn fill_missing_keys(content: &str) -> AppResult<(String, Vec<&'static str>)> {
    let mut yaml: Value = serde_yaml::from_str(content)?;
    let defaults = serde_yaml::to_value(Config::default())?;

    let (Some(map), Some(default_map)) = (yaml.as_mapping_mut(), defaults.as_mapping()) else {
        return Err(AppError::Config(
            "configuration root is not a mapping".into(),
        ));
    };

    let added = insert_defaults(map, default_map);
    let serialized = serde_yaml::to_string(&yaml)?;
    Ok((serialized, added))
}

fn insert_defaults(map: &mut Mapping, defaults: &Mapping) -> Vec<&'static str> {
    let mut added = Vec::new();

    for key in KNOWN_KEYS {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k)
            && let Some(v) = defaults.get(&k)
        {
            map.insert(k, v.clone());
            added.push(key);
        }
    }

    added
}

/// `config --check`: report missing keys of the file at `path`.
pub fn check_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;

    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        for key in &missing {
            info(format!("Missing configuration key: {}", key));
        }
    }

    Ok(missing)
}

/// `config --migrate`: rewrite the file at `path` with missing keys added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let (updated, added) = fill_missing_keys(&content)?;

    if added.is_empty() {
        info("Configuration already up to date.");
        return Ok(added);
    }

    fs::write(path, updated).map_err(|_| AppError::ConfigSave)?;
    success(format!(
        "Configuration migrated: added {}",
        added.join(", ")
    ));

    Ok(added)
}
