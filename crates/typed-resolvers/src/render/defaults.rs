use crate::{
    models::Model,
    schema::{Field, ObjectType, TypeCategory},
    typescript::{Const, Export},
};

pub(crate) fn default_resolvers_name(object_name: &str) -> String {
    format!("{object_name}DefaultResolvers")
}

/// `export const UserDefaultResolvers = { id: (parent: User) => parent.id, ... }`.
///
/// Only fields the model carries get a default resolver. Without an explicit field list on the
/// model, its scalar and enum fields are assumed to be present.
pub(crate) fn render_default_resolvers(object: &ObjectType, model: &Model) -> Option<Export> {
    let carried = |field: &Field| match &model.fields {
        Some(fields) => fields.iter().any(|name| *name == field.name),
        None => matches!(field.r#type.category, TypeCategory::Scalar | TypeCategory::Enum),
    };

    let mut constant = Const::new(default_resolvers_name(&object.name));
    let mut empty = true;

    for field in object.fields.iter().filter(|field| carried(field)) {
        let parent = &model.type_name;
        let name = &field.name;

        let expression = if field.r#type.is_nullable() {
            format!("(parent: {parent}) => (parent.{name} === undefined ? null : parent.{name})")
        } else {
            format!("(parent: {parent}) => parent.{name}")
        };

        constant.push_entry(field.name.clone(), expression);
        empty = false;
    }

    (!empty).then(|| Export::new(constant))
}
