//! The caller-supplied association between schema types and the TypeScript types backing them.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::schema::RootTypes;

/// A TypeScript type backing a schema type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Model {
    /// Name of the exported TypeScript type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Module specifier the type is imported from, e.g. `../models`.
    pub module: String,
    /// Properties carried by the model. Only used to derive default resolvers.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelEntry {
    External(Model),
    /// The schema enum is declared by the generated enums unit, never imported.
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLookup<'a> {
    External(&'a Model),
    EnumBacked,
    Unmapped,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelMap {
    /// Module assumed to export a same-named model for every object type without an explicit
    /// entry.
    #[serde(default)]
    pub default_module: Option<String>,
    #[serde(flatten)]
    pub entries: IndexMap<String, ModelEntry>,
}

impl ModelMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_module(mut self, module: impl Into<String>) -> Self {
        self.default_module = Some(module.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, schema_name: impl Into<String>, model: Model) -> Self {
        self.entries.insert(schema_name.into(), ModelEntry::External(model));
        self
    }

    #[must_use]
    pub fn with_enum(mut self, schema_name: impl Into<String>) -> Self {
        self.entries.insert(schema_name.into(), ModelEntry::Enum);
        self
    }

    pub fn lookup(&self, schema_name: &str) -> ModelLookup<'_> {
        match self.entries.get(schema_name) {
            Some(ModelEntry::External(model)) => ModelLookup::External(model),
            Some(ModelEntry::Enum) => ModelLookup::EnumBacked,
            None => ModelLookup::Unmapped,
        }
    }

    /// Resolves the model of an object type, falling back to the default module. Root operation
    /// types only have a model when mapped explicitly.
    pub(crate) fn object_model(&self, schema_name: &str, roots: &RootTypes) -> Option<Model> {
        match self.lookup(schema_name) {
            ModelLookup::External(model) => Some(model.clone()),
            ModelLookup::EnumBacked => None,
            ModelLookup::Unmapped if roots.contains(schema_name) => None,
            ModelLookup::Unmapped => self.default_module.as_ref().map(|module| Model {
                type_name: schema_name.to_owned(),
                module: module.clone(),
                fields: None,
            }),
        }
    }
}

impl Model {
    pub fn new(type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module: module.into(),
            fields: None,
        }
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// The type of the `context` argument every resolver receives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContextType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub module: String,
}

impl ContextType {
    pub fn new(type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module: module.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_module_only_covers_unmapped_names() {
        let models = ModelMap::new()
            .with_default_module("./models")
            .with_model("User", Model::new("UserModel", "./user"))
            .with_enum("Role");

        let roots = RootTypes::default();

        assert_eq!(models.object_model("User", &roots).unwrap().type_name, "UserModel");
        assert_eq!(models.object_model("Post", &roots).unwrap(), Model::new("Post", "./models"));
        assert_eq!(models.object_model("Role", &roots), None);
        assert_eq!(models.object_model("Query", &roots), None);
        assert_eq!(models.lookup("Post"), ModelLookup::Unmapped);
    }
}
