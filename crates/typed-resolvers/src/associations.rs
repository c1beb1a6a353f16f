//! Lookup structures derived once from a [`SchemaListing`].

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::{
    error::CodegenError,
    schema::{Argument, Field, InputType, ObjectType, SchemaListing, TypeCategory},
};

/// Read-only indices over a schema listing.
///
/// Every object, interface and union of the listing has an entry in the indices that concern it,
/// even when empty, so a failed lookup always means the caller asked for a name that is not
/// part of the schema.
#[derive(Debug)]
pub struct Associations<'a> {
    input_types_by_name: IndexMap<&'a str, &'a InputType>,
    input_types_per_object: IndexMap<&'a str, IndexSet<&'a str>>,
    implementors_by_interface: IndexMap<&'a str, Vec<&'a ObjectType>>,
    members_by_union: IndexMap<&'a str, Vec<&'a ObjectType>>,
    unions_by_member: IndexMap<&'a str, Vec<&'a str>>,
    enums_by_object: IndexMap<&'a str, IndexSet<&'a str>>,
}

impl<'a> Associations<'a> {
    pub fn build(schema: &'a SchemaListing) -> Result<Self, CodegenError> {
        let objects_by_name: HashMap<&str, &ObjectType> =
            schema.objects().map(|object| (object.name.as_str(), object)).collect();

        let object_named = |name: &str| -> Result<&'a ObjectType, CodegenError> {
            match objects_by_name.get(name) {
                Some(object) => Ok(*object),
                None if schema.definitions.iter().any(|definition| definition.name() == name) => {
                    Err(CodegenError::NotAnObject { name: name.to_owned() })
                }
                None => Err(CodegenError::UnknownType { name: name.to_owned() }),
            }
        };

        let input_types_by_name: IndexMap<&str, &InputType> =
            schema.inputs().map(|input| (input.name.as_str(), input)).collect();

        let mut implementors_by_interface = IndexMap::new();

        for interface in schema.interfaces() {
            let implementors = interface
                .implementors
                .iter()
                .map(|name| object_named(name))
                .collect::<Result<Vec<_>, _>>()?;

            implementors_by_interface.insert(interface.name.as_str(), implementors);
        }

        for object in schema.objects() {
            for interface in &object.implements {
                let implementors: &mut Vec<&ObjectType> = implementors_by_interface
                    .get_mut(interface.as_str())
                    .ok_or_else(|| CodegenError::NotAnInterface { name: interface.clone() })?;

                if !implementors.iter().any(|implementor| implementor.name == object.name) {
                    implementors.push(object);
                }
            }
        }

        let mut members_by_union = IndexMap::new();
        let mut unions_by_member: IndexMap<&str, Vec<&str>> = schema
            .objects()
            .map(|object| (object.name.as_str(), Vec::new()))
            .collect();

        for union in schema.unions() {
            let mut members = Vec::with_capacity(union.members.len());

            for member in &union.members {
                let member = object_named(member)?;
                members.push(member);

                if let Some(unions) = unions_by_member.get_mut(member.name.as_str()) {
                    unions.push(union.name.as_str());
                }
            }

            members_by_union.insert(union.name.as_str(), members);
        }

        let mut input_types_per_object = IndexMap::new();
        let mut enums_by_object = IndexMap::new();

        let field_owners = schema
            .objects()
            .map(|object| (object.name.as_str(), object.fields.as_slice()))
            .chain(
                schema
                    .interfaces()
                    .map(|interface| (interface.name.as_str(), interface.fields.as_slice())),
            );

        for (owner, fields) in field_owners {
            input_types_per_object.insert(owner, reachable_input_types(fields, &input_types_by_name)?);
            enums_by_object.insert(owner, referenced_enums(fields));
        }

        Ok(Self {
            input_types_by_name,
            input_types_per_object,
            implementors_by_interface,
            members_by_union,
            unions_by_member,
            enums_by_object,
        })
    }

    pub fn input_type(&self, name: &str) -> Result<&'a InputType, CodegenError> {
        self.input_types_by_name
            .get(name)
            .copied()
            .ok_or_else(|| unknown(name))
    }

    /// Input types reachable from the arguments of the fields of `owner`, nested input types
    /// included, in first-occurrence order.
    pub fn input_types_of(&self, owner: &str) -> Result<&IndexSet<&'a str>, CodegenError> {
        self.input_types_per_object.get(owner).ok_or_else(|| unknown(owner))
    }

    pub fn implementors(&self, interface: &str) -> Result<&[&'a ObjectType], CodegenError> {
        self.implementors_by_interface
            .get(interface)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown(interface))
    }

    pub fn members(&self, union: &str) -> Result<&[&'a ObjectType], CodegenError> {
        self.members_by_union
            .get(union)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown(union))
    }

    /// The unions `object` is a member of.
    pub fn unions_containing(&self, object: &str) -> Result<&[&'a str], CodegenError> {
        self.unions_by_member
            .get(object)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown(object))
    }

    /// Enums referenced by the fields and arguments declared on `owner`.
    pub fn enums_of(&self, owner: &str) -> Result<&IndexSet<&'a str>, CodegenError> {
        self.enums_by_object.get(owner).ok_or_else(|| unknown(owner))
    }
}

fn unknown(name: &str) -> CodegenError {
    CodegenError::UnknownType { name: name.to_owned() }
}

fn reachable_input_types<'a>(
    fields: &'a [Field],
    input_types_by_name: &IndexMap<&'a str, &'a InputType>,
) -> Result<IndexSet<&'a str>, CodegenError> {
    let mut reachable = IndexSet::new();
    let mut stack: Vec<&'a Argument> = Vec::new();

    for field in fields {
        // Each argument is explored depth-first before the next one so nested input types
        // follow the type that introduced them.
        for argument in &field.arguments {
            stack.push(argument);

            while let Some(argument) = stack.pop() {
                if argument.r#type.category != TypeCategory::Input {
                    continue;
                }

                let name = argument.r#type.name.as_str();
                if !reachable.insert(name) {
                    continue;
                }

                let input: &'a InputType = input_types_by_name.get(name).copied().ok_or_else(|| unknown(name))?;
                stack.extend(input.fields.iter().rev());
            }
        }
    }

    Ok(reachable)
}

fn referenced_enums(fields: &[Field]) -> IndexSet<&str> {
    fields
        .iter()
        .flat_map(|field| {
            std::iter::once(&field.r#type).chain(field.arguments.iter().map(|argument| &argument.r#type))
        })
        .filter(|reference| reference.category == TypeCategory::Enum)
        .map(|reference| reference.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::sdl::parse_schema;

    const SCHEMA: &str = indoc! {r#"
        enum Role { ADMIN USER }
        enum Order { ASC DESC }

        input PostFilter { title: String, author: AuthorFilter }
        input AuthorFilter { role: Role }
        input Page { first: Int }

        interface Node { id: ID! }

        type User implements Node {
          id: ID!
          role: Role!
          posts(filter: PostFilter, page: Page, again: PostFilter): [Post!]!
          sorted(order: Order): [Post!]!
        }

        type Post implements Node {
          id: ID!
        }

        union SearchResult = User | Post
    "#};

    #[test]
    fn input_types_are_distinct_and_transitive() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();

        let inputs: Vec<_> = associations.input_types_of("User").unwrap().iter().copied().collect();
        assert_eq!(inputs, vec!["PostFilter", "AuthorFilter", "Page"]);
        assert!(associations.input_types_of("Post").unwrap().is_empty());
    }

    #[test]
    fn enums_are_keyed_by_declaring_type() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();

        let enums: Vec<_> = associations.enums_of("User").unwrap().iter().copied().collect();
        assert_eq!(enums, vec!["Role", "Order"]);
        assert!(associations.enums_of("Role").is_err());
    }

    #[test]
    fn abstract_types_are_indexed() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();

        let implementors: Vec<_> = associations
            .implementors("Node")
            .unwrap()
            .iter()
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(implementors, vec!["User", "Post"]);

        let members: Vec<_> = associations
            .members("SearchResult")
            .unwrap()
            .iter()
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(members, vec!["User", "Post"]);
        assert_eq!(associations.unions_containing("Post").unwrap(), &["SearchResult"]);
    }

    #[test]
    fn lookups_with_the_wrong_name_fail() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();

        assert!(matches!(
            associations.implementors("User"),
            Err(CodegenError::UnknownType { name }) if name == "User"
        ));
        assert!(associations.members("Node").is_err());
        assert!(associations.input_type("Role").is_err());
    }
}
