//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use crate::registry::Registry;
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };
        schema.validate()?;

        tracing::debug!(path = ?config_path, "Configuration loaded");

        Ok(Self { schema, path: config_path })
    }

    /// The station table this configuration points at.
    ///
    /// A relative `registry.path` is resolved against the config file's
    /// directory. Without one, the embedded La Rioja table is used.
    pub fn registry(&self) -> Result<Registry> {
        match &self.schema.registry.path {
            Some(table) => {
                let resolved = match self.path.as_deref().and_then(Path::parent) {
                    Some(dir) if table.is_relative() => dir.join(table),
                    _ => table.clone(),
                };
                Registry::load(resolved)
            }
            None => Ok(Registry::la_rioja().clone()),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".ambumap.toml", "ambumap.toml", ".config/ambumap.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    toml::from_str(&content).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest::NearestScope;
    use std::fs;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.map.initial_zoom, 10);
        assert_eq!(config.schema.coverage.rings.len(), 2);
        assert_eq!(config.schema.nearest.scope, NearestScope::AllStations);
        assert_eq!(config.schema.logging.level, "info");
        assert_eq!(config.registry().unwrap().len(), 18);
    }

    #[test]
    fn test_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ambumap.toml");
        fs::write(&path, "[nearest]\nscope = \"visible\"\n\n[map]\nuser_zoom = 13\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.schema.nearest.scope, NearestScope::VisibleOnly);
        assert_eq!(config.schema.map.user_zoom, 13);
        assert_eq!(config.schema.map.focus_zoom, 14);
    }

    #[test]
    fn test_config_custom_rings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ambumap.toml");
        fs::write(
            &path,
            "[[coverage.rings]]\nradius_km = 5.0\ncolor = \"green\"\nfill_opacity = 0.2\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.schema.coverage.rings.len(), 1);
        assert_eq!(config.schema.coverage.rings[0].radius_km, 5.0);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ambumap.toml");

        fs::write(&path, "[map]\ninitial_zoom = 30\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));

        fs::write(
            &path,
            "[[coverage.rings]]\nradius_km = -1.0\ncolor = \"red\"\nfill_opacity = 0.1\n",
        )
        .unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));

        fs::write(&path, "[nearest]\nscope = \"closest\"\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::Toml(_))));
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/no/such/ambumap.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_registry_path_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("stations.toml"),
            "[center]\nlatitude = 40.0\nlongitude = -3.7\n\n[[stations]]\nname = \"Madrid SVA\"\ncategory = \"SVA\"\nschedule = \"24 h\"\nlatitude = 40.41\nlongitude = -3.70\n",
        )
        .unwrap();
        let path = dir.path().join("ambumap.toml");
        fs::write(&path, "[registry]\npath = \"stations.toml\"\n").unwrap();

        let registry = Config::load(Some(&path)).unwrap().registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.find_by_name("Madrid SVA").is_some());
    }
}
