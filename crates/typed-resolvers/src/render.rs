//! Projection of schema entities into TypeScript resolver declarations.

mod aggregate;
mod defaults;
mod fields;
mod projection;
mod root;

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::instrument;

use crate::{
    config::GeneratorConfig,
    error::CodegenError,
    schema::{Entity, TypeCategory},
    typescript::TypeKind,
};

pub(crate) use fields::ResolverParams;
pub(crate) use projection::Projection;
pub(crate) use root::{render_enum, render_iresolvers_augmentation, render_root_map};

pub(crate) const RESOLVE_INFO: &str = "GraphQLResolveInfo";
pub(crate) const IS_TYPE_OF_FN: &str = "GraphQLIsTypeOfFn";

/// Declarations of one entity, in the order they are written out.
pub(crate) struct RenderedEntity<'a> {
    pub(crate) declarations: Vec<String>,
    pub(crate) has_is_type_of: bool,
    /// Enums referenced by the declarations, to be imported from the enums unit.
    pub(crate) enums: IndexSet<&'a str>,
}

#[instrument(skip_all, fields(entity = entity.name()))]
pub(crate) fn render_entity<'a>(
    projection: &Projection<'a>,
    context: TypeKind,
    entity: Entity<'a>,
    config: &GeneratorConfig,
) -> Result<RenderedEntity<'a>, CodegenError> {
    let mut declarations = Vec::new();
    let mut enums = IndexSet::new();
    let mut names = DeclaredNames::new(entity.name());

    if let Entity::Object(_) | Entity::Interface(_) = entity {
        enums.extend(projection.associations.enums_of(entity.name())?.iter().copied());

        for name in projection.associations.input_types_of(entity.name())? {
            let input = projection.associations.input_type(name)?;

            enums.extend(
                input
                    .fields
                    .iter()
                    .filter(|field| field.r#type.category == TypeCategory::Enum)
                    .map(|field| field.r#type.name.as_str()),
            );

            names.declare(&input.name)?;
            declarations.push(fields::render_input_type(projection, input)?.to_string());
        }
    }

    for field in entity.fields() {
        if let Some(arguments) = fields::render_arguments(projection, field)? {
            names.declare(&fields::arguments_interface_name(field))?;
            declarations.push(arguments.to_string());
        }
    }

    let params = ResolverParams {
        parent: projection.parent(entity)?,
        context,
    };

    let is_subscription = matches!(entity, Entity::Object(object) if object.name == projection.roots.subscription);

    for field in entity.fields() {
        names.declare(&fields::resolver_type_name(field))?;

        let resolver = if is_subscription {
            fields::render_subscription_resolver(projection, &params, field)?
        } else {
            fields::render_resolver(projection, &params, field)?
        };

        declarations.push(resolver.to_string());
    }

    names.declare(&aggregate::aggregate_interface_name(entity.name()))?;
    let aggregate = aggregate::render_aggregate(projection, &params, entity)?;
    declarations.push(aggregate.export.to_string());

    if let Entity::Object(object) = entity {
        let model = projection.models.object_model(&object.name, projection.roots);

        if let Some(model) = model.filter(|_| config.default_resolvers_enabled) {
            if let Some(defaults) = defaults::render_default_resolvers(object, &model) {
                names.declare(&defaults::default_resolvers_name(&object.name))?;
                declarations.push(defaults.to_string());
            }
        }
    }

    tracing::debug!(declarations = declarations.len(), "rendered entity");

    Ok(RenderedEntity {
        declarations,
        has_is_type_of: aggregate.has_is_type_of,
        enums,
    })
}

/// Names exported by one unit, which must be unique.
struct DeclaredNames<'a> {
    entity: &'a str,
    names: HashSet<String>,
}

impl<'a> DeclaredNames<'a> {
    fn new(entity: &'a str) -> Self {
        Self {
            entity,
            names: HashSet::new(),
        }
    }

    fn declare(&mut self, name: &str) -> Result<(), CodegenError> {
        if self.names.insert(name.to_owned()) {
            return Ok(());
        }

        Err(CodegenError::DuplicateDeclaration {
            entity: self.entity.to_owned(),
            name: name.to_owned(),
        })
    }
}
