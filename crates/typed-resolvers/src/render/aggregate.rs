use crate::{
    dependencies::possible_types,
    error::CodegenError,
    schema::{Entity, TypeCategory},
    typescript::{Export, FunctionType, Interface, Property, StaticType, TypeKind},
};

use super::{
    fields::resolver_type_name,
    projection::{maybe_promise, Projection},
    ResolverParams, IS_TYPE_OF_FN, RESOLVE_INFO,
};

pub(crate) fn aggregate_interface_name(entity_name: &str) -> String {
    format!("{entity_name}Resolvers")
}

pub(crate) struct Aggregate {
    pub(crate) export: Export,
    /// Whether an `__isTypeOf` member was emitted.
    pub(crate) has_is_type_of: bool,
}

/// `export interface UserResolvers { ... }` with one member per field, plus the members resolving
/// abstract types where the entity takes part in one.
pub(crate) fn render_aggregate(
    projection: &Projection<'_>,
    params: &ResolverParams,
    entity: Entity<'_>,
) -> Result<Aggregate, CodegenError> {
    let mut interface = Interface::new(aggregate_interface_name(entity.name()));
    let mut has_is_type_of = false;

    for field in entity.fields() {
        interface.push_property(Property::new(
            field.name.clone(),
            StaticType::ident(resolver_type_name(field)),
        ));
    }

    match entity {
        Entity::Object(object) => {
            let possible = possible_types(&object.name, &object.implements, projection.associations)?;

            if !possible.is_empty() {
                let values = possible
                    .iter()
                    .map(|name| projection.object_model(name))
                    .collect::<Result<Vec<_>, _>>()?;

                let mut is_type_of = StaticType::ident(IS_TYPE_OF_FN);
                is_type_of.push_param(TypeKind::union(values));
                is_type_of.push_param(params.context.clone());

                interface.push_property(Property::new("__isTypeOf", is_type_of).optional());
                has_is_type_of = true;
            }
        }
        Entity::Interface(interface_type) => {
            let resolve_type = resolve_type(projection, params, &interface_type.name, TypeCategory::Interface)?;
            interface.push_property(Property::new("__resolveType", resolve_type));
        }
        Entity::Union(union) => {
            let resolve_type = resolve_type(projection, params, &union.name, TypeCategory::Union)?;
            interface.push_property(Property::new("__resolveType", resolve_type).optional());
        }
    }

    Ok(Aggregate {
        export: Export::new(interface),
        has_is_type_of,
    })
}

/// `(value: User | Post, context, info) => 'User' | 'Post' | Promise<'User' | 'Post'>`
fn resolve_type(
    projection: &Projection<'_>,
    params: &ResolverParams,
    abstract_type: &str,
    category: TypeCategory,
) -> Result<FunctionType, CodegenError> {
    let objects = match category {
        TypeCategory::Interface => projection.associations.implementors(abstract_type)?,
        _ => projection.associations.members(abstract_type)?,
    };

    let type_names = TypeKind::union(objects.iter().map(|object| StaticType::string(object.name.clone())));

    Ok(FunctionType::new(
        vec![
            Property::new("value", projection.implementor_models(abstract_type, category)?),
            Property::new("context", params.context.clone()),
            Property::new("info", StaticType::ident(RESOLVE_INFO)),
        ],
        maybe_promise(type_names),
    ))
}
