//! Lookup configuration, read from JSON or TOML.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Append the `--- Code ---` snapshot section to found responses
    pub include_code: bool,
    /// Root handed to the snapshot source for on-disk reads
    pub workspace_root: PathBuf,
    pub max_case_hints: usize,
    pub max_path_hints: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            include_code: true,
            workspace_root: PathBuf::from("."),
            max_case_hints: 10,
            max_path_hints: 10,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLookupConfig {
    #[serde(default)]
    schema_version: Option<u32>,
    include_code: Option<bool>,
    workspace_root: Option<String>,
    max_case_hints: Option<usize>,
    max_path_hints: Option<usize>,
}

impl LookupConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read lookup config {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid lookup config {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes).context("Lookup config is not valid JSON/TOML")?;
        Self::from_raw(raw)
    }

    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    #[must_use]
    pub fn without_code(mut self) -> Self {
        self.include_code = false;
        self
    }

    fn from_raw(raw: RawLookupConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != 1 {
                return Err(anyhow!(
                    "lookup.schema_version {schema_version} is not supported (expected 1)"
                ));
            }
        }

        let mut cfg = Self::default();
        if let Some(include_code) = raw.include_code {
            cfg.include_code = include_code;
        }
        if let Some(root) = raw.workspace_root.filter(|v| !v.trim().is_empty()) {
            cfg.workspace_root = PathBuf::from(root);
        }
        if let Some(cap) = raw.max_case_hints {
            cfg.max_case_hints = validate_cap("max_case_hints", cap)?;
        }
        if let Some(cap) = raw.max_path_hints {
            cfg.max_path_hints = validate_cap("max_path_hints", cap)?;
        }
        Ok(cfg)
    }
}

fn validate_cap(key: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(anyhow!("lookup.{key} must be at least 1"));
    }
    Ok(value)
}

fn parse_raw(bytes: &[u8]) -> Result<RawLookupConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };
    serde_json::from_value(value).map_err(|err| anyhow!("Lookup config parse error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = LookupConfig::from_bytes(b"{}").unwrap();
        assert_eq!(cfg, LookupConfig::default());
    }

    #[test]
    fn json_overrides_merge_over_defaults() {
        let cfg = LookupConfig::from_bytes(br#"{"include_code": false, "max_case_hints": 3}"#)
            .unwrap();
        assert!(!cfg.include_code);
        assert_eq!(cfg.max_case_hints, 3);
        assert_eq!(cfg.max_path_hints, 10);
        assert_eq!(cfg.workspace_root, PathBuf::from("."));
    }

    #[test]
    fn toml_is_accepted() {
        let cfg = LookupConfig::from_bytes(
            b"schema_version = 1\nworkspace_root = \"/srv/app\"\nmax_path_hints = 2\n",
        )
        .unwrap();
        assert_eq!(cfg.workspace_root, PathBuf::from("/srv/app"));
        assert_eq!(cfg.max_path_hints, 2);
    }

    #[test]
    fn rejects_unknown_schema_and_zero_caps() {
        assert!(LookupConfig::from_bytes(br#"{"schema_version": 2}"#).is_err());
        assert!(LookupConfig::from_bytes(br#"{"max_case_hints": 0}"#).is_err());
        assert!(LookupConfig::from_bytes(br#"{"surprise": true}"#).is_err());
        assert!(LookupConfig::from_bytes(b"not [valid").is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.toml");
        std::fs::write(&path, "include_code = false\n").unwrap();
        let cfg = LookupConfig::from_file(&path).unwrap();
        assert!(!cfg.include_code);

        let missing = dir.path().join("absent.toml");
        let err = LookupConfig::from_file(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read lookup config"));
    }
}
