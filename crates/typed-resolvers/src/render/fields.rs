use crate::{
    error::CodegenError,
    schema::{Argument, Field, InputType},
    typescript::{Export, FunctionType, Interface, ObjectTypeDef, Property, StaticType, Type, TypeKind},
};

use super::{
    projection::{maybe_promise, Projection},
    RESOLVE_INFO,
};

pub(crate) fn arguments_interface_name(field: &Field) -> String {
    format!("{}Args", capitalize(&field.name))
}

pub(crate) fn resolver_type_name(field: &Field) -> String {
    format!("{}Resolver", capitalize(&field.name))
}

/// Upper-cases the first letter only: `userId` and `user_id` stay distinct.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `export interface PostFilter { ... }` mirroring the fields of an input type.
pub(crate) fn render_input_type(projection: &Projection<'_>, input: &InputType) -> Result<Export, CodegenError> {
    let mut interface = Interface::new(input.name.clone());

    for property in members(projection, &input.fields)? {
        interface.push_property(property);
    }

    Ok(Export::new(interface))
}

/// `export interface PostsArgs { ... }`, or nothing for fields without arguments.
pub(crate) fn render_arguments(projection: &Projection<'_>, field: &Field) -> Result<Option<Export>, CodegenError> {
    if field.arguments.is_empty() {
        return Ok(None);
    }

    let mut interface = Interface::new(arguments_interface_name(field));

    for property in members(projection, &field.arguments)? {
        interface.push_property(property);
    }

    Ok(Some(Export::new(interface)))
}

/// Nullable arguments and input fields may be omitted altogether.
fn members(projection: &Projection<'_>, arguments: &[Argument]) -> Result<Vec<Property>, CodegenError> {
    arguments
        .iter()
        .map(|argument| {
            let r#type = projection.project(&argument.r#type)?;
            Ok(Property::new(argument.name.clone(), r#type).optional_if(argument.r#type.is_nullable()))
        })
        .collect()
}

/// Parameters shared by every function a field resolver is made of.
pub(crate) struct ResolverParams {
    pub(crate) parent: TypeKind,
    pub(crate) context: TypeKind,
}

impl ResolverParams {
    fn function(&self, field: &Field, returns: TypeKind) -> FunctionType {
        let args = if field.arguments.is_empty() {
            TypeKind::from(ObjectTypeDef::new())
        } else {
            StaticType::ident(arguments_interface_name(field)).into()
        };

        FunctionType::new(
            vec![
                Property::new("parent", self.parent.clone()),
                Property::new("args", args),
                Property::new("context", self.context.clone()),
                Property::new("info", StaticType::ident(RESOLVE_INFO)),
            ],
            returns,
        )
    }
}

/// `export type PostsResolver = ((parent, args, context, info) => ...) | { fragment, resolve }`.
pub(crate) fn render_resolver(
    projection: &Projection<'_>,
    params: &ResolverParams,
    field: &Field,
) -> Result<Export, CodegenError> {
    let returns = maybe_promise(projection.project(&field.r#type)?);
    let function = params.function(field, returns);

    let mut delegated = ObjectTypeDef::new();
    delegated.push_property(Property::new("fragment", StaticType::ident("string")));
    delegated.push_property(Property::new("resolve", function.clone()));

    let definition = TypeKind::union([TypeKind::from(function), delegated.into()]);

    Ok(Export::new(Type::new(
        StaticType::ident(resolver_type_name(field)),
        definition,
    )))
}

/// Subscription fields produce a stream in `subscribe` and may post-process each event in
/// `resolve`.
pub(crate) fn render_subscription_resolver(
    projection: &Projection<'_>,
    params: &ResolverParams,
    field: &Field,
) -> Result<Export, CodegenError> {
    let payload = projection.project(&field.r#type)?;

    let stream = TypeKind::from(StaticType::generic("AsyncIterator", payload.clone()));
    let subscribe = params.function(field, maybe_promise(stream));
    let resolve = params.function(field, maybe_promise(payload));

    let mut definition = ObjectTypeDef::new();
    definition.push_property(Property::new("subscribe", subscribe));
    definition.push_property(Property::new("resolve", resolve).optional());

    Ok(Export::new(Type::new(
        StaticType::ident(resolver_type_name(field)),
        definition,
    )))
}
