//! Builds a [`SchemaListing`] out of GraphQL SDL.

use std::collections::HashMap;

use graphql_parser::schema::{self as ast, Definition as AstDefinition, TypeDefinition};

use crate::{
    error::CodegenError,
    schema::{
        Argument, Definition, EnumType, Field, InputType, InterfaceType, ObjectType, RootTypes, SchemaListing,
        TypeCategory, TypeReference, UnionType,
    },
};

const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

pub fn parse_schema(sdl: &str) -> Result<SchemaListing, CodegenError> {
    let document = graphql_parser::parse_schema::<String>(sdl)?;

    let mut categories: HashMap<&str, TypeCategory> = BUILTIN_SCALARS
        .iter()
        .map(|name| (*name, TypeCategory::Scalar))
        .collect();
    let mut roots = RootTypes::default();

    for definition in &document.definitions {
        match definition {
            AstDefinition::TypeDefinition(type_definition) => {
                let (name, category) = match type_definition {
                    TypeDefinition::Scalar(scalar) => (&scalar.name, TypeCategory::Scalar),
                    TypeDefinition::Object(object) => (&object.name, TypeCategory::Object),
                    TypeDefinition::Interface(interface) => (&interface.name, TypeCategory::Interface),
                    TypeDefinition::Union(union) => (&union.name, TypeCategory::Union),
                    TypeDefinition::Enum(r#enum) => (&r#enum.name, TypeCategory::Enum),
                    TypeDefinition::InputObject(input) => (&input.name, TypeCategory::Input),
                };
                categories.insert(name.as_str(), category);
            }
            AstDefinition::SchemaDefinition(schema) => {
                if let Some(query) = &schema.query {
                    roots.query.clone_from(query);
                }
                if let Some(mutation) = &schema.mutation {
                    roots.mutation.clone_from(mutation);
                }
                if let Some(subscription) = &schema.subscription {
                    roots.subscription.clone_from(subscription);
                }
            }
            AstDefinition::TypeExtension(_) | AstDefinition::DirectiveDefinition(_) => {}
        }
    }

    let converter = Converter { categories };
    let mut definitions = Vec::new();
    let mut implementors: HashMap<&str, Vec<String>> = HashMap::new();

    for definition in &document.definitions {
        let AstDefinition::TypeDefinition(type_definition) = definition else {
            continue;
        };

        match type_definition {
            TypeDefinition::Scalar(_) => {}
            TypeDefinition::Object(object) => {
                for interface in &object.implements_interfaces {
                    converter.expect_category(interface, TypeCategory::Interface)?;
                    implementors
                        .entry(interface.as_str())
                        .or_default()
                        .push(object.name.clone());
                }

                definitions.push(Definition::Object(ObjectType {
                    name: object.name.clone(),
                    fields: converter.fields(&object.fields)?,
                    implements: object.implements_interfaces.clone(),
                }));
            }
            TypeDefinition::Interface(interface) => {
                if !interface.implements_interfaces.is_empty() {
                    tracing::debug!(
                        interface = %interface.name,
                        implements = ?interface.implements_interfaces,
                        "ignoring interface conformance"
                    );
                }

                definitions.push(Definition::Interface(InterfaceType {
                    name: interface.name.clone(),
                    fields: converter.fields(&interface.fields)?,
                    implementors: Vec::new(),
                }));
            }
            TypeDefinition::Union(union) => {
                for member in &union.types {
                    converter.expect_category(member, TypeCategory::Object)?;
                }

                definitions.push(Definition::Union(UnionType {
                    name: union.name.clone(),
                    members: union.types.clone(),
                }));
            }
            TypeDefinition::Enum(r#enum) => {
                definitions.push(Definition::Enum(EnumType {
                    name: r#enum.name.clone(),
                    values: r#enum.values.iter().map(|value| value.name.clone()).collect(),
                }));
            }
            TypeDefinition::InputObject(input) => {
                definitions.push(Definition::Input(InputType {
                    name: input.name.clone(),
                    fields: converter.arguments(&input.fields)?,
                }));
            }
        }
    }

    for definition in &mut definitions {
        if let Definition::Interface(interface) = definition {
            if let Some(names) = implementors.remove(interface.name.as_str()) {
                interface.implementors = names;
            }
        }
    }

    tracing::debug!(definitions = definitions.len(), "parsed schema");

    Ok(SchemaListing { definitions, roots })
}

struct Converter<'a> {
    categories: HashMap<&'a str, TypeCategory>,
}

impl Converter<'_> {
    fn category(&self, name: &str) -> Result<TypeCategory, CodegenError> {
        self.categories
            .get(name)
            .copied()
            .ok_or_else(|| CodegenError::UnknownType { name: name.to_owned() })
    }

    fn expect_category(&self, name: &str, expected: TypeCategory) -> Result<(), CodegenError> {
        let category = self.category(name)?;

        if category == expected {
            return Ok(());
        }

        let name = name.to_owned();
        Err(match expected {
            TypeCategory::Interface => CodegenError::NotAnInterface { name },
            TypeCategory::Union => CodegenError::NotAUnion { name },
            _ => CodegenError::NotAnObject { name },
        })
    }

    fn fields(&self, fields: &[ast::Field<'_, String>]) -> Result<Vec<Field>, CodegenError> {
        fields
            .iter()
            .map(|field| {
                Ok(Field {
                    name: field.name.clone(),
                    r#type: self.type_reference(&field.field_type)?,
                    arguments: self.arguments(&field.arguments)?,
                })
            })
            .collect()
    }

    fn arguments(&self, arguments: &[ast::InputValue<'_, String>]) -> Result<Vec<Argument>, CodegenError> {
        arguments
            .iter()
            .map(|argument| {
                Ok(Argument {
                    name: argument.name.clone(),
                    r#type: self.type_reference(&argument.value_type)?,
                })
            })
            .collect()
    }

    fn type_reference(&self, r#type: &ast::Type<'_, String>) -> Result<TypeReference, CodegenError> {
        Ok(match r#type {
            ast::Type::NamedType(name) => TypeReference::named(name.clone(), self.category(name)?),
            ast::Type::ListType(inner) => self.type_reference(inner)?.list(),
            ast::Type::NonNullType(inner) => self.type_reference(inner)?.non_null(),
        })
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::schema::ListWrapper;

    #[test]
    fn resolves_categories_and_wrappers() {
        let schema = parse_schema(indoc! {r#"
            enum Role { ADMIN USER }
            input PostFilter { title: String }
            interface Node { id: ID! }

            type User implements Node {
              id: ID!
              role: Role
              posts(filter: PostFilter, limit: Int): [Post!]!
            }

            type Post implements Node {
              id: ID!
            }
        "#})
        .unwrap();

        let user = schema.objects().find(|object| object.name == "User").unwrap();
        assert_eq!(user.implements, vec!["Node".to_owned()]);

        let posts = &user.fields[2];
        assert_eq!(posts.r#type.category, TypeCategory::Object);
        assert!(!posts.r#type.inner_nullable);
        assert_eq!(posts.r#type.wrappers, vec![ListWrapper::NonNullList]);
        assert_eq!(posts.arguments[0].r#type.category, TypeCategory::Input);
        assert!(posts.arguments[1].r#type.is_nullable());
        assert_eq!(user.fields[1].r#type.category, TypeCategory::Enum);

        let node = schema.interfaces().next().unwrap();
        assert_eq!(node.implementors, vec!["User".to_owned(), "Post".to_owned()]);
    }

    #[test]
    fn schema_definition_overrides_roots() {
        let schema = parse_schema(indoc! {r#"
            schema { query: RootQuery subscription: Events }
            type RootQuery { ok: Boolean }
            type Events { tick: Int }
        "#})
        .unwrap();

        assert_eq!(schema.roots.query, "RootQuery");
        assert_eq!(schema.roots.mutation, "Mutation");
        assert_eq!(schema.roots.subscription, "Events");
    }

    #[test]
    fn interfaces_implementing_interfaces_are_accepted() {
        let schema = parse_schema(indoc! {r#"
            interface Node { id: ID! }
            interface Resource implements Node { id: ID! url: String! }
            type Image implements Resource & Node { id: ID! url: String! }
        "#})
        .unwrap();

        let resource = schema.interfaces().find(|interface| interface.name == "Resource").unwrap();
        assert_eq!(resource.fields.len(), 2);
        assert_eq!(resource.implementors, vec!["Image".to_owned()]);

        let node = schema.interfaces().find(|interface| interface.name == "Node").unwrap();
        assert_eq!(node.implementors, vec!["Image".to_owned()]);
    }

    #[test]
    fn undefined_types_are_rejected() {
        let error = parse_schema("type Query { user: User }").unwrap_err();
        assert!(matches!(error, CodegenError::UnknownType { name } if name == "User"));
    }
}
