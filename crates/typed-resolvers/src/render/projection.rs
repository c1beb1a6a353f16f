use crate::{
    associations::Associations,
    error::CodegenError,
    models::{ModelLookup, ModelMap},
    schema::{Entity, ListWrapper, RootTypes, TypeCategory, TypeReference},
    typescript::{StaticType, TypeKind},
};

/// Maps schema type references to TypeScript types.
pub(crate) struct Projection<'a> {
    pub(crate) associations: &'a Associations<'a>,
    pub(crate) models: &'a ModelMap,
    pub(crate) roots: &'a RootTypes,
}

impl Projection<'_> {
    /// The model backing an object type. Root operation types without a model are `undefined`.
    pub(crate) fn object_model(&self, name: &str) -> Result<TypeKind, CodegenError> {
        match self.models.object_model(name, self.roots) {
            Some(model) => Ok(StaticType::ident(model.type_name).into()),
            None if self.roots.contains(name) => Ok(StaticType::ident("undefined").into()),
            None => Err(CodegenError::MissingModel { name: name.to_owned() }),
        }
    }

    /// Union of the models of every object type the value of an abstract type can be.
    pub(crate) fn implementor_models(&self, abstract_type: &str, category: TypeCategory) -> Result<TypeKind, CodegenError> {
        let objects = match category {
            TypeCategory::Interface => self.associations.implementors(abstract_type)?,
            _ => self.associations.members(abstract_type)?,
        };

        let models = objects
            .iter()
            .map(|object| self.object_model(&object.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TypeKind::union(models))
    }

    /// The type of the `parent` argument of the field resolvers of `entity`.
    pub(crate) fn parent(&self, entity: Entity<'_>) -> Result<TypeKind, CodegenError> {
        match entity {
            Entity::Object(object) => self.object_model(&object.name),
            Entity::Interface(interface) => self.implementor_models(&interface.name, TypeCategory::Interface),
            Entity::Union(union) => self.implementor_models(&union.name, TypeCategory::Union),
        }
    }

    /// Projects a type reference, mirroring its list and nullability modifiers.
    pub(crate) fn project(&self, reference: &TypeReference) -> Result<TypeKind, CodegenError> {
        let mut r#type = self.named(reference)?;

        if reference.inner_nullable {
            r#type = r#type.or(StaticType::ident("null"));
        }

        for wrapper in reference.iter_list_wrappers() {
            r#type = StaticType::generic("Array", r#type).into();

            if wrapper == ListWrapper::NullableList {
                r#type = r#type.or(StaticType::ident("null"));
            }
        }

        Ok(r#type)
    }

    fn named(&self, reference: &TypeReference) -> Result<TypeKind, CodegenError> {
        let name = reference.name.as_str();

        match reference.category {
            TypeCategory::Scalar => Ok(self.scalar(name)),
            TypeCategory::Object => self.object_model(name),
            TypeCategory::Interface | TypeCategory::Union => self.implementor_models(name, reference.category),
            TypeCategory::Enum | TypeCategory::Input => Ok(StaticType::ident(name.to_owned()).into()),
        }
    }

    fn scalar(&self, name: &str) -> TypeKind {
        let primitive = match name {
            "ID" | "String" => "string",
            "Int" | "Float" => "number",
            "Boolean" => "boolean",
            _ => match self.models.lookup(name) {
                ModelLookup::External(model) => return StaticType::ident(model.type_name.clone()).into(),
                ModelLookup::EnumBacked | ModelLookup::Unmapped => "any",
            },
        };

        StaticType::ident(primitive).into()
    }
}

/// `T | Promise<T>`: a resolver may answer synchronously or not.
pub(crate) fn maybe_promise(r#type: TypeKind) -> TypeKind {
    let promise = StaticType::generic("Promise", r#type.clone());
    r#type.or(promise)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use indoc::indoc;

    use super::*;
    use crate::{
        models::Model,
        schema::{Definition, SchemaListing},
        sdl::parse_schema,
    };

    fn field_type<'a>(schema: &'a SchemaListing, object: &str, field: &str) -> &'a TypeReference {
        schema
            .definitions
            .iter()
            .find_map(|definition| match definition {
                Definition::Object(o) if o.name == object => o.fields.iter().find(|f| f.name == field),
                _ => None,
            })
            .map(|field| &field.r#type)
            .unwrap()
    }

    #[test]
    fn projects_modifiers_recursively() {
        let schema = parse_schema(indoc! {r#"
            scalar DateTime
            scalar Json
            enum Role { ADMIN }
            interface Node { id: ID! }
            union Entry = User | Post

            type User implements Node {
              id: ID!
              role: Role
              matrix: [[Int!]]!
              nodes: [Node]
              entries: [Entry!]
              createdAt: DateTime!
              extra: Json
            }

            type Post implements Node { id: ID! }
        "#})
        .unwrap();

        let associations = Associations::build(&schema).unwrap();
        let models = ModelMap::new()
            .with_model("User", Model::new("UserModel", "./models"))
            .with_model("Post", Model::new("PostModel", "./models"))
            .with_model("DateTime", Model::new("Date", "./scalars"));

        let projection = Projection {
            associations: &associations,
            models: &models,
            roots: &schema.roots,
        };

        let render = |field: &str| {
            projection
                .project(field_type(&schema, "User", field))
                .unwrap()
                .to_string()
        };

        expect!["string"].assert_eq(&render("id"));
        expect!["Role | null"].assert_eq(&render("role"));
        expect!["Array<Array<number> | null>"].assert_eq(&render("matrix"));
        expect!["Array<UserModel | PostModel | null> | null"].assert_eq(&render("nodes"));
        expect!["Array<UserModel | PostModel> | null"].assert_eq(&render("entries"));
        expect!["Date"].assert_eq(&render("createdAt"));
        expect!["any | null"].assert_eq(&render("extra"));
    }

    #[test]
    fn promise_wraps_the_whole_union() {
        let r#type = TypeKind::from(StaticType::ident("Post")).or(StaticType::ident("null"));

        expect!["Post | null | Promise<Post | null>"].assert_eq(&maybe_promise(r#type).to_string());
    }
}
