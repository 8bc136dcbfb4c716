use crate::{broadphase::BroadPhaseKind, error::ConfigError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub broadphase: BroadPhaseKind,
    /// Seed the dispatch table with the built in direct tests. Without them
    /// every pair of kinds resolves through the generic test.
    pub register_default_tests: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            broadphase: BroadPhaseKind::Aabb,
            register_default_tests: true,
        }
    }
}

impl CollisionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path.as_ref())
    }
}

/// Reads a json file into any deserializable type.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CollisionConfig = serde_json::from_str(r#"{ "broadphase": "cbb" }"#).unwrap();
        assert_eq!(BroadPhaseKind::Cbb, config.broadphase);
        assert!(config.register_default_tests);
    }

    #[test]
    fn test_missing_file() {
        let err = CollisionConfig::load("/nonexistent/collision.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/collision.json"));
    }
}
