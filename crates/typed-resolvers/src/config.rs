use serde::Deserialize;

/// Switches for the optional parts of the generated output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Emit a `<Entity>DefaultResolvers` constant with trivial resolvers for the fields carried
    /// by the model of each object type.
    #[serde(rename = "default-resolvers")]
    pub default_resolvers_enabled: bool,
    /// Merge the root `Resolvers` map into the `IResolvers` interface of `graphql-tools`.
    #[serde(rename = "iresolvers-augmentation")]
    pub iresolvers_augmentation_enabled: bool,
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_default_resolvers(mut self, enabled: bool) -> Self {
        self.default_resolvers_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_iresolvers_augmentation(mut self, enabled: bool) -> Self {
        self.iresolvers_augmentation_enabled = enabled;
        self
    }
}
