//! The abstract type system the generator projects from.
//!
//! A [`SchemaListing`] is built once per run, usually by [`crate::sdl::parse_schema`], and is
//! never mutated afterwards.

/// Every definition of a schema, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaListing {
    pub definitions: Vec<Definition>,
    pub roots: RootTypes,
}

#[derive(Debug, Clone)]
pub enum Definition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    Input(InputType),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Object(object) => &object.name,
            Definition::Interface(interface) => &interface.name,
            Definition::Union(union) => &union.name,
            Definition::Enum(r#enum) => &r#enum.name,
            Definition::Input(input) => &input.name,
        }
    }
}

/// Names of the root operation types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTypes {
    pub query: String,
    pub mutation: String,
    pub subscription: String,
}

impl Default for RootTypes {
    fn default() -> Self {
        Self {
            query: "Query".to_owned(),
            mutation: "Mutation".to_owned(),
            subscription: "Subscription".to_owned(),
        }
    }
}

impl RootTypes {
    pub fn contains(&self, name: &str) -> bool {
        self.query == name || self.mutation == name || self.subscription == name
    }
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<Field>,
    /// Names of the interfaces this type declares conformance to.
    pub implements: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InterfaceType {
    pub name: String,
    pub fields: Vec<Field>,
    /// Object types implementing this interface, in declaration order.
    pub implementors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InputType {
    pub name: String,
    pub fields: Vec<Argument>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub r#type: TypeReference,
    pub arguments: Vec<Argument>,
}

/// A field argument, also used for the fields of input types.
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: String,
    pub r#type: TypeReference,
}

/// What kind of definition a type reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListWrapper {
    NullableList,
    NonNullList,
}

/// A named type wrapped in list and nullability modifiers.
///
/// `[Post!]` is `name: "Post"`, `inner_nullable: false`, `wrappers: [NullableList]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub name: String,
    pub category: TypeCategory,
    pub inner_nullable: bool,
    /// List wrappers from the innermost to the outermost.
    pub wrappers: Vec<ListWrapper>,
}

impl TypeReference {
    pub fn named(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            inner_nullable: true,
            wrappers: Vec::new(),
        }
    }

    #[must_use]
    pub fn non_null(mut self) -> Self {
        match self.wrappers.last_mut() {
            Some(wrapper) => *wrapper = ListWrapper::NonNullList,
            None => self.inner_nullable = false,
        }
        self
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.wrappers.push(ListWrapper::NullableList);
        self
    }

    /// Whether the outermost layer accepts `null`.
    pub fn is_nullable(&self) -> bool {
        match self.wrappers.last() {
            Some(wrapper) => *wrapper == ListWrapper::NullableList,
            None => self.inner_nullable,
        }
    }

    pub fn iter_list_wrappers(&self) -> impl Iterator<Item = ListWrapper> + '_ {
        self.wrappers.iter().copied()
    }
}

/// One of the definitions that gets its own resolver unit.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Object(&'a ObjectType),
    Interface(&'a InterfaceType),
    Union(&'a UnionType),
}

impl<'a> Entity<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Entity::Object(object) => &object.name,
            Entity::Interface(interface) => &interface.name,
            Entity::Union(union) => &union.name,
        }
    }

    pub fn fields(&self) -> &'a [Field] {
        match self {
            Entity::Object(object) => &object.fields,
            Entity::Interface(interface) => &interface.fields,
            Entity::Union(_) => &[],
        }
    }
}

impl SchemaListing {
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Object(object) => Some(Entity::Object(object)),
            Definition::Interface(interface) => Some(Entity::Interface(interface)),
            Definition::Union(union) => Some(Entity::Union(union)),
            Definition::Enum(_) | Definition::Input(_) => None,
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectType> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceType> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Interface(interface) => Some(interface),
            _ => None,
        })
    }

    pub fn unions(&self) -> impl Iterator<Item = &UnionType> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Union(union) => Some(union),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumType> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Enum(r#enum) => Some(r#enum),
            _ => None,
        })
    }

    pub fn inputs(&self) -> impl Iterator<Item = &InputType> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Input(input) => Some(input),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_null_applies_to_the_outermost_layer() {
        let reference = TypeReference::named("Post", TypeCategory::Object)
            .non_null()
            .list()
            .non_null();

        assert!(!reference.inner_nullable);
        assert_eq!(reference.wrappers, vec![ListWrapper::NonNullList]);
        assert!(!reference.is_nullable());

        let nullable_list = TypeReference::named("Post", TypeCategory::Object).list();
        assert!(nullable_list.inner_nullable);
        assert!(nullable_list.is_nullable());
    }
}
