use crate::{
    schema::{Entity, EnumType, SchemaListing},
    typescript::{DeclareModule, Export, Import, Interface, Property, StaticType, Type, TypeKind},
};

use super::aggregate::aggregate_interface_name;

pub(crate) const ROOT_MAP: &str = "Resolvers";

/// Import of every aggregate interface, followed by the root map referencing them.
///
/// Object types must be resolved, interfaces and unions may be left out.
pub(crate) fn render_root_map(schema: &SchemaListing) -> (Vec<Import>, Export) {
    let mut imports = Vec::new();
    let mut interface = Interface::new(ROOT_MAP);

    for entity in schema.entities() {
        let name = entity.name();
        let aggregate = aggregate_interface_name(name);

        imports.push(Import::items(format!("./{name}"), [aggregate.clone()]));

        let property = Property::new(name.to_owned(), StaticType::ident(aggregate));
        let is_object = matches!(entity, Entity::Object(_));
        interface.push_property(property.optional_if(!is_object));
    }

    (imports, Export::new(interface))
}

/// Makes the root map usable wherever `graphql-tools` expects its own loosely typed
/// `IResolvers`, through declaration merging.
pub(crate) fn render_iresolvers_augmentation() -> DeclareModule {
    let mut module = DeclareModule::new("graphql-tools");
    module.push_interface(Interface::new("IResolvers").extends(StaticType::ident(ROOT_MAP)));
    module
}

/// `export type Role = 'ADMIN' | 'USER'`
pub(crate) fn render_enum(r#enum: &EnumType) -> Export {
    let values = TypeKind::union(r#enum.values.iter().map(|value| StaticType::string(value.clone())));

    Export::new(Type::new(StaticType::ident(r#enum.name.clone()), values))
}
