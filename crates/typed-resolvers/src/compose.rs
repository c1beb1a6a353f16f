//! Assembles rendered declarations into output units.

use std::fmt::Write;

use crate::{
    associations::Associations,
    config::GeneratorConfig,
    dependencies::{group_by_module, needed_models},
    error::CodegenError,
    formatter::Formatter,
    models::{ContextType, ModelMap},
    render::{
        render_entity, render_enum, render_iresolvers_augmentation, render_root_map, Projection, IS_TYPE_OF_FN,
        RESOLVE_INFO,
    },
    schema::{Entity, SchemaListing},
    typescript::{Import, StaticType, TypeKind},
};

pub(crate) const ENUMS_UNIT: &str = "enums";
pub(crate) const ROOT_UNIT: &str = "index";

const CONTEXT_PLACEHOLDER: &str = "Context";

const DO_NOT_EDIT: &str = "// Code generated by typed-resolvers. DO NOT EDIT.\n";

const EDITABLE: &str = "// Generated by typed-resolvers. This file is only written when it does not exist yet,\n\
// edit it freely.\n";

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Path relative to the output directory.
    pub path: String,
    /// Units that are pure projections of the schema are always regenerated. The others may
    /// carry user edits and should be left alone when they already exist.
    pub force_overwrite: bool,
    pub content: String,
}

pub(crate) struct Composer<'a> {
    pub(crate) schema: &'a SchemaListing,
    pub(crate) models: &'a ModelMap,
    pub(crate) context: Option<&'a ContextType>,
    pub(crate) config: GeneratorConfig,
    pub(crate) formatter: &'a dyn Formatter,
}

impl Composer<'_> {
    pub(crate) fn compose(&self) -> Result<Vec<OutputUnit>, CodegenError> {
        let associations = Associations::build(self.schema)?;
        let projection = Projection {
            associations: &associations,
            models: self.models,
            roots: &self.schema.roots,
        };

        let mut units = Vec::new();

        for entity in self.schema.entities() {
            let content = self.entity_unit(&projection, entity)?;
            units.push(self.unit(format!("{}.ts", entity.name()), true, content));
        }

        let mut enums = String::new();
        for r#enum in self.schema.enums() {
            if !enums.is_empty() {
                enums.push('\n');
            }
            writeln!(enums, "{}", render_enum(r#enum))?;
        }

        if !enums.is_empty() {
            units.push(self.unit(format!("{ENUMS_UNIT}.ts"), false, format!("{EDITABLE}\n{enums}")));
        }

        units.push(self.unit(format!("{ROOT_UNIT}.ts"), false, self.root_unit()?));

        tracing::info!(units = units.len(), "generated resolver types");

        Ok(units)
    }

    fn entity_unit<'a>(&self, projection: &Projection<'a>, entity: Entity<'a>) -> Result<String, CodegenError> {
        let context = match self.context {
            Some(context) => StaticType::ident(context.type_name.clone()),
            None => StaticType::ident(CONTEXT_PLACEHOLDER),
        };

        let rendered = render_entity(projection, TypeKind::from(context), entity, &self.config)?;

        let needed = needed_models(entity, projection.associations)?;
        let mut groups = group_by_module(&needed, self.models, &self.schema.roots)?;

        if let Some(context) = self.context {
            groups.push(&context.module, &context.type_name);
        }

        let mut out = String::from(DO_NOT_EDIT);
        out.push('\n');

        let graphql = if rendered.has_is_type_of {
            Import::items("graphql", [RESOLVE_INFO, IS_TYPE_OF_FN])
        } else {
            Import::items("graphql", [RESOLVE_INFO])
        };
        writeln!(out, "{graphql}")?;

        for (module, names) in groups.iter() {
            let names: Vec<String> = names.map(str::to_owned).collect();
            writeln!(out, "{}", Import::items(module.to_owned(), names))?;
        }

        if !rendered.enums.is_empty() {
            let enums: Vec<String> = rendered.enums.iter().map(|name| (*name).to_owned()).collect();
            writeln!(out, "{}", Import::items(format!("./{ENUMS_UNIT}"), enums))?;
        }

        if self.context.is_none() {
            write!(out, "\ntype {CONTEXT_PLACEHOLDER} = any\n")?;
        }

        for declaration in &rendered.declarations {
            write!(out, "\n{declaration}\n")?;
        }

        Ok(out)
    }

    fn root_unit(&self) -> Result<String, CodegenError> {
        let (imports, root_map) = render_root_map(self.schema);

        let mut out = String::from(EDITABLE);
        out.push('\n');

        for import in imports {
            writeln!(out, "{import}")?;
        }

        write!(out, "\n{root_map}\n")?;

        if self.config.iresolvers_augmentation_enabled {
            write!(out, "\n{}\n", render_iresolvers_augmentation())?;
        }

        Ok(out)
    }

    /// Formatting failures never fail the generation: the unformatted text is kept instead.
    fn unit(&self, path: String, force_overwrite: bool, content: String) -> OutputUnit {
        let content = match self.formatter.format(&path, &content) {
            Ok(formatted) => formatted,
            Err(error) => {
                tracing::warn!(path = %path, error = ?error, "failed to format generated code, keeping it unformatted");
                content
            }
        };

        OutputUnit {
            path,
            force_overwrite,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{formatter::Passthrough, models::Model, sdl::parse_schema};

    struct Failing;

    impl Formatter for Failing {
        fn format(&self, _path: &str, _code: &str) -> anyhow::Result<String> {
            anyhow::bail!("unexpected token")
        }
    }

    fn compose(schema: &SchemaListing, models: &ModelMap, formatter: &dyn Formatter) -> Vec<OutputUnit> {
        Composer {
            schema,
            models,
            context: None,
            config: GeneratorConfig::default(),
            formatter,
        }
        .compose()
        .unwrap()
    }

    #[test]
    fn formatting_failures_keep_the_raw_output() {
        let schema = parse_schema("type Query { ok: Boolean }").unwrap();
        let models = ModelMap::new();

        let raw = compose(&schema, &models, &Passthrough);
        let unformatted = compose(&schema, &models, &Failing);

        assert_eq!(raw, unformatted);
    }

    #[test]
    fn enum_unit_only_when_enums_exist() {
        let models = ModelMap::new().with_model("User", Model::new("User", "./models"));
        let without = parse_schema("type User { id: ID! }").unwrap();
        let with = parse_schema("enum Role { ADMIN }\ntype User { role: Role }").unwrap();

        let paths = |schema: &SchemaListing| -> Vec<String> {
            compose(schema, &models, &Passthrough)
                .into_iter()
                .map(|unit| unit.path)
                .collect()
        };

        assert_eq!(paths(&without), ["User.ts", "index.ts"]);
        assert_eq!(paths(&with), ["User.ts", "enums.ts", "index.ts"]);
    }
}
