use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use graphql_typed_resolvers::{ContextType, GeneratorConfig, ModelMap};
use serde::Deserialize;

/// Contents of `typed-resolvers.toml`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct ProjectConfig {
    /// Path to the GraphQL SDL, relative to the configuration file.
    pub schema: PathBuf,
    /// Directory receiving the generated units, relative to the configuration file.
    pub output: PathBuf,
    #[serde(flatten)]
    pub generator: GeneratorConfig,
    /// Type of the resolver context. Resolvers get an `any` context when left out.
    pub context: Option<ContextType>,
    #[serde(default)]
    pub models: ModelMap,
}

impl ProjectConfig {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading configuration from {}", path.display()))?;

        let mut config: ProjectConfig =
            toml::from_str(&content).with_context(|| format!("parsing configuration at {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.schema = base.join(&config.schema);
            config.output = base.join(&config.output);
        }

        tracing::debug!(schema = %config.schema.display(), output = %config.output.display(), "loaded configuration");

        Ok(config)
    }
}
