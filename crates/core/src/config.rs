//! Generator configuration.
//!
//! Settings come from two layers: an optional TOML file and explicit
//! overrides (the command line). Both are expressed as [`ConfigFile`], merged
//! with overrides winning, then resolved into a [`GeneratorConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Base URL used by the generated client in development builds.
pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8000";

/// What to do with query parameters on an operation that also has a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryWithBodyPolicy {
    /// Keep the parameters in the signature, do not send them, warn.
    #[default]
    Drop,
    /// Send them as query options after the body.
    Combine,
    /// Leave the operation out of the module and record an error.
    Reject,
}

/// Options that shape the rendered code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Base URL returned by `getApiBase()` in production builds.
    pub api_prefix: String,
    /// Base URL returned by `getApiBase()` in development builds.
    pub dev_base_url: String,
    /// Query-with-body handling.
    pub query_with_body: QueryWithBodyPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            api_prefix: String::new(),
            dev_base_url: DEFAULT_DEV_BASE_URL.to_string(),
            query_with_body: QueryWithBodyPolicy::default(),
        }
    }
}

/// Fully resolved settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// URL or path of the API description.
    pub input: String,
    /// Output root directory.
    pub output: PathBuf,
    /// Rendering options.
    pub render: RenderOptions,
}

/// One configuration layer; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// URL or path of the API description.
    pub input: Option<String>,
    /// Output root directory.
    pub output: Option<PathBuf>,
    /// Production API prefix.
    pub prefix: Option<String>,
    /// Development base URL.
    pub dev_base_url: Option<String>,
    /// Query-with-body handling.
    pub query_with_body: Option<QueryWithBodyPolicy>,
}

impl ConfigFile {
    /// Read a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of `self`; set keys of `overrides` win.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            prefix: overrides.prefix.or(self.prefix),
            dev_base_url: overrides.dev_base_url.or(self.dev_base_url),
            query_with_body: overrides.query_with_body.or(self.query_with_body),
        }
    }

    /// Rendering options, with defaults for unset keys.
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            api_prefix: self.prefix.clone().unwrap_or(defaults.api_prefix),
            dev_base_url: self.dev_base_url.clone().unwrap_or(defaults.dev_base_url),
            query_with_body: self.query_with_body.unwrap_or(defaults.query_with_body),
        }
    }

    /// The input location, which every command needs.
    pub fn input(&self) -> Result<&str, ConfigError> {
        self.input.as_deref().ok_or(ConfigError::Missing("input"))
    }

    /// Resolve into the settings of a full generation run.
    pub fn into_generator_config(self) -> Result<GeneratorConfig, ConfigError> {
        let render = self.render_options();
        let input = self.input.ok_or(ConfigError::Missing("input"))?;
        let output = self.output.ok_or(ConfigError::Missing("output"))?;
        Ok(GeneratorConfig {
            input,
            output,
            render,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let file = ConfigFile {
            input: Some("http://localhost:8000/openapi.json".into()),
            output: Some("src/client".into()),
            prefix: Some("/api".into()),
            dev_base_url: None,
            query_with_body: Some(QueryWithBodyPolicy::Combine),
        };
        let overrides = ConfigFile {
            output: Some("out".into()),
            query_with_body: Some(QueryWithBodyPolicy::Reject),
            ..ConfigFile::default()
        };

        let config = file.merge(overrides).into_generator_config().unwrap();
        assert_eq!(config.input, "http://localhost:8000/openapi.json");
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.render.api_prefix, "/api");
        assert_eq!(config.render.dev_base_url, DEFAULT_DEV_BASE_URL);
        assert_eq!(config.render.query_with_body, QueryWithBodyPolicy::Reject);
    }

    #[test]
    fn test_missing_output() {
        let config = ConfigFile {
            input: Some("spec.json".into()),
            ..ConfigFile::default()
        };
        let err = config.into_generator_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("output")));
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apigen.toml");
        fs::write(
            &path,
            "input = \"openapi.yaml\"\noutput = \"client\"\nprefix = \"/api\"\nquery_with_body = \"combine\"\n",
        )
        .unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.input.as_deref(), Some("openapi.yaml"));
        assert_eq!(config.query_with_body, Some(QueryWithBodyPolicy::Combine));
        assert_eq!(config.render_options().api_prefix, "/api");
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apigen.toml");
        fs::write(&path, "inptu = \"typo\"\n").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
