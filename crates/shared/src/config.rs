//! Configuration types for Praxis

use serde::{Deserialize, Serialize};

use crate::role::RoleDefinition;

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSettings {
    /// Default TTL in seconds for entries stored without an explicit TTL
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// Maximum number of entries before LRU eviction (0 = unbounded)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> usize {
    500
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

/// Audit log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSettings {
    /// Maximum retained entries; oldest are dropped first
    #[serde(default = "default_audit_entries")]
    pub max_entries: usize,
}

fn default_audit_entries() -> usize {
    10_000
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            max_entries: default_audit_entries(),
        }
    }
}

/// Session configuration (praxis.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Response cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// Audit log settings
    #[serde(default)]
    pub audit: AuditSettings,

    /// Extra role definitions registered alongside the builtin matrix
    #[serde(default)]
    pub extra_roles: Vec<RoleDefinition>,
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();

        assert_eq!(config.cache.default_ttl_secs, 300);
        assert_eq!(config.cache.max_entries, 500);
        assert_eq!(config.audit.max_entries, 10_000);
        assert!(config.extra_roles.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
            "cache": { "defaultTtlSecs": 60 }
        }"#;

        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cache.default_ttl_secs, 60);
        // Unspecified fields fall back to defaults
        assert_eq!(config.cache.max_entries, 500);
        assert_eq!(config.audit.max_entries, 10_000);
    }

    #[test]
    fn test_parse_extra_roles() {
        let json = r#"{
            "extraRoles": [
                {
                    "name": "researcher",
                    "displayName": "Researcher",
                    "permissions": ["reports_access"]
                }
            ]
        }"#;

        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extra_roles.len(), 1);
        assert_eq!(config.extra_roles[0].name, "researcher");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cache": {{"maxEntries": 32}}, "audit": {{"maxEntries": 100}}}}"#
        )
        .unwrap();

        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cache.max_entries, 32);
        assert_eq!(config.audit.max_entries, 100);
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = SessionConfig::from_file(std::path::Path::new("/nonexistent/praxis.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = SessionConfig::from_file(file.path());
        assert!(result.is_err());
    }
}
