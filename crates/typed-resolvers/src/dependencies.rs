//! Works out which model types the declarations of an entity refer to, and where to import
//! them from.

use indexmap::{IndexMap, IndexSet};

use crate::{
    associations::Associations,
    error::CodegenError,
    models::{ModelLookup, ModelMap},
    schema::{Entity, RootTypes, TypeCategory, TypeReference},
};

/// Schema names referenced by the declarations of `entity`, in discovery order, with the category
/// they were referenced as.
///
/// Interface and union references are expanded to their implementors and members, which is what
/// the projected TypeScript types are made of.
pub fn needed_models<'a>(
    entity: Entity<'a>,
    associations: &Associations<'a>,
) -> Result<IndexMap<&'a str, TypeCategory>, CodegenError> {
    let mut needed = IndexMap::new();

    match entity {
        Entity::Object(object) => {
            needed.insert(object.name.as_str(), TypeCategory::Object);
        }
        Entity::Interface(interface) => {
            for implementor in associations.implementors(&interface.name)? {
                needed.entry(implementor.name.as_str()).or_insert(TypeCategory::Object);
            }
        }
        Entity::Union(union) => {
            for member in associations.members(&union.name)? {
                needed.entry(member.name.as_str()).or_insert(TypeCategory::Object);
            }
        }
    }

    for field in entity.fields() {
        add_reference(&mut needed, &field.r#type, associations)?;

        for argument in &field.arguments {
            needed.entry(argument.r#type.name.as_str()).or_insert(argument.r#type.category);
        }
    }

    // Input types reachable from the arguments are declared in the same unit.
    if let Entity::Object(_) | Entity::Interface(_) = entity {
        for name in associations.input_types_of(entity.name())? {
            for field in &associations.input_type(name)?.fields {
                needed.entry(field.r#type.name.as_str()).or_insert(field.r#type.category);
            }
        }
    }

    if let Entity::Object(object) = entity {
        for name in possible_types(object.name.as_str(), &object.implements, associations)? {
            needed.entry(name).or_insert(TypeCategory::Object);
        }
    }

    Ok(needed)
}

/// Object types a value checked by the `__isTypeOf` of `object` may be: every implementor of the
/// interfaces it implements and every member of the unions it belongs to.
///
/// Empty when the object implements no interface, as such objects get no `__isTypeOf`.
pub fn possible_types<'a>(
    object: &'a str,
    implements: &'a [String],
    associations: &Associations<'a>,
) -> Result<IndexSet<&'a str>, CodegenError> {
    let mut possible = IndexSet::new();

    if implements.is_empty() {
        return Ok(possible);
    }

    for interface in implements {
        for implementor in associations.implementors(interface)? {
            possible.insert(implementor.name.as_str());
        }
    }

    for union in associations.unions_containing(object)? {
        for member in associations.members(union)? {
            possible.insert(member.name.as_str());
        }
    }

    Ok(possible)
}

fn add_reference<'a>(
    needed: &mut IndexMap<&'a str, TypeCategory>,
    reference: &'a TypeReference,
    associations: &Associations<'a>,
) -> Result<(), CodegenError> {
    let expanded = match reference.category {
        TypeCategory::Interface => associations.implementors(&reference.name)?,
        TypeCategory::Union => associations.members(&reference.name)?,
        category => {
            needed.entry(reference.name.as_str()).or_insert(category);
            return Ok(());
        }
    };

    for object in expanded {
        needed.entry(object.name.as_str()).or_insert(TypeCategory::Object);
    }

    Ok(())
}

/// Import statements to emit, keyed by module specifier.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportGroups {
    groups: IndexMap<String, IndexSet<String>>,
}

impl ImportGroups {
    pub fn push(&mut self, module: &str, type_name: &str) {
        match self.groups.get_mut(module) {
            Some(names) => {
                names.insert(type_name.to_owned());
            }
            None => {
                self.groups
                    .insert(module.to_owned(), IndexSet::from([type_name.to_owned()]));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, impl Iterator<Item = &str>)> {
        self.groups
            .iter()
            .map(|(module, names)| (module.as_str(), names.iter().map(String::as_str)))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partitions the needed models by the module declaring them.
///
/// Enums and input types are declared by the generated code itself and never imported. An object
/// type without a model is an error, except for the root operation types, whose parent value is
/// `undefined`.
pub fn group_by_module(
    needed: &IndexMap<&str, TypeCategory>,
    models: &ModelMap,
    roots: &RootTypes,
) -> Result<ImportGroups, CodegenError> {
    let mut groups = ImportGroups::default();

    for (name, category) in needed {
        match category {
            TypeCategory::Enum | TypeCategory::Input => continue,
            TypeCategory::Object => match models.object_model(name, roots) {
                Some(model) => groups.push(&model.module, &model.type_name),
                None if roots.contains(name) => continue,
                None => return Err(CodegenError::MissingModel { name: (*name).to_owned() }),
            },
            TypeCategory::Scalar | TypeCategory::Interface | TypeCategory::Union => match models.lookup(name) {
                ModelLookup::External(model) => groups.push(&model.module, &model.type_name),
                ModelLookup::EnumBacked | ModelLookup::Unmapped => continue,
            },
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::{models::Model, sdl::parse_schema};

    const SCHEMA: &str = indoc! {r#"
        scalar DateTime
        enum Role { ADMIN USER }

        interface Node { id: ID! }

        type Query {
          node(id: ID!): Node
          search(text: String!): [SearchResult!]!
        }

        type User implements Node {
          id: ID!
          role: Role!
          createdAt: DateTime!
          posts(since: DateTime): [Post!]!
        }

        type Post implements Node {
          id: ID!
          author: User!
        }

        type Comment {
          body: String!
        }

        union SearchResult = Post | Comment
    "#};

    fn names(needed: &IndexMap<&str, TypeCategory>) -> Vec<String> {
        needed.keys().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn abstract_field_types_are_expanded() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();
        let query = schema.entities().find(|entity| entity.name() == "Query").unwrap();

        let needed = needed_models(query, &associations).unwrap();

        assert_eq!(names(&needed), ["Query", "User", "Post", "ID", "Comment", "String"]);
    }

    #[test]
    fn conforming_objects_need_their_siblings() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();
        let post = schema.entities().find(|entity| entity.name() == "Post").unwrap();

        let needed = needed_models(post, &associations).unwrap();

        assert_eq!(names(&needed), ["Post", "ID", "User", "Comment"]);
    }

    #[test]
    fn union_only_members_need_no_siblings() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();
        let comment = schema.entities().find(|entity| entity.name() == "Comment").unwrap();

        let needed = needed_models(comment, &associations).unwrap();

        assert_eq!(names(&needed), ["Comment", "String"]);
    }

    #[test]
    fn imports_are_grouped_per_module() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();
        let user = schema.entities().find(|entity| entity.name() == "User").unwrap();

        let models = ModelMap::new()
            .with_default_module("./models")
            .with_model("DateTime", Model::new("Date", "./scalars"))
            .with_enum("Role");

        let needed = needed_models(user, &associations).unwrap();
        let groups = group_by_module(&needed, &models, &schema.roots).unwrap();

        let rendered: Vec<(String, Vec<String>)> = groups
            .iter()
            .map(|(module, names)| (module.to_owned(), names.map(str::to_owned).collect()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("./models".to_owned(), vec!["User".to_owned(), "Post".to_owned()]),
                ("./scalars".to_owned(), vec!["Date".to_owned()]),
            ]
        );
    }

    #[test]
    fn unmapped_objects_are_rejected_unless_root() {
        let schema = parse_schema(SCHEMA).unwrap();
        let associations = Associations::build(&schema).unwrap();
        let models = ModelMap::new().with_model("User", Model::new("User", "./models"));

        let query = schema.entities().find(|entity| entity.name() == "Query").unwrap();
        let needed = needed_models(query, &associations).unwrap();

        let error = group_by_module(&needed, &models, &schema.roots).unwrap_err();
        assert!(matches!(error, CodegenError::MissingModel { name } if name == "Post"));
    }
}
