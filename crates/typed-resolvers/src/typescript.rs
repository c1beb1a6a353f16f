//! Just enough of a TypeScript declaration AST to print resolver signatures.

use std::{
    borrow::Cow,
    fmt::{self, Write},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoted(Cow<'static, str>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(Cow<'static, str>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Ident(Identifier),
    String(Quoted),
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Ident(ident) => ident.fmt(f),
            TypeName::String(quoted) => quoted.fmt(f),
        }
    }
}

/// Any type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Static(StaticType),
    Object(ObjectTypeDef),
    Function(FunctionType),
    Union(Vec<TypeKind>),
}

impl TypeKind {
    /// Builds `A | B | ...`, flattening nested unions and dropping repeated members.
    ///
    /// An empty union is `never`, a single member is returned as is.
    pub fn union(members: impl IntoIterator<Item = impl Into<TypeKind>>) -> Self {
        let mut flattened: Vec<TypeKind> = Vec::new();

        for member in members {
            match member.into() {
                TypeKind::Union(nested) => {
                    for nested in nested {
                        if !flattened.contains(&nested) {
                            flattened.push(nested);
                        }
                    }
                }
                member => {
                    if !flattened.contains(&member) {
                        flattened.push(member);
                    }
                }
            }
        }

        match flattened.len() {
            0 => StaticType::ident("never").into(),
            1 => flattened.remove(0),
            _ => TypeKind::Union(flattened),
        }
    }

    #[must_use]
    pub fn or(self, other: impl Into<TypeKind>) -> Self {
        Self::union([self, other.into()])
    }
}

impl From<StaticType> for TypeKind {
    fn from(value: StaticType) -> Self {
        Self::Static(value)
    }
}

impl From<ObjectTypeDef> for TypeKind {
    fn from(value: ObjectTypeDef) -> Self {
        Self::Object(value)
    }
}

impl From<FunctionType> for TypeKind {
    fn from(value: FunctionType) -> Self {
        Self::Function(value)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Static(s) => s.fmt(f),
            TypeKind::Object(o) => o.fmt(f),
            TypeKind::Function(function) => function.fmt(f),
            TypeKind::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }

                    // The return type of an arrow function would swallow the rest of the union.
                    match member {
                        TypeKind::Function(function) => write!(f, "({function})")?,
                        member => member.fmt(f)?,
                    }
                }

                Ok(())
            }
        }
    }
}

/// A named type, optionally with type parameters: `Post`, `Promise<Post>`, `'User'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticType {
    name: TypeName,
    params: Vec<TypeKind>,
}

impl StaticType {
    pub fn ident(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: TypeName::Ident(Identifier::new(name)),
            params: Vec::new(),
        }
    }

    pub fn string(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: TypeName::String(Quoted::new(name)),
            params: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<Cow<'static, str>>, param: impl Into<TypeKind>) -> Self {
        let mut r#type = Self::ident(name);
        r#type.push_param(param);
        r#type
    }

    pub fn push_param(&mut self, param: impl Into<TypeKind>) {
        self.params.push(param.into());
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)?;

        if !self.params.is_empty() {
            f.write_char('<')?;

            for (i, param) in self.params.iter().enumerate() {
                param.fmt(f)?;

                if i < self.params.len() - 1 {
                    f.write_str(", ")?;
                }
            }

            f.write_char('>')?;
        }

        Ok(())
    }
}

impl Quoted {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }
}

impl Identifier {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Quoted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct Import {
    items: Vec<Identifier>,
    import_location: Quoted,
}

impl Import {
    pub fn items<I, S>(import_location: impl Into<Cow<'static, str>>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            import_location: Quoted::new(import_location),
            items: items.into_iter().map(Identifier::new).collect(),
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("import { ")?;

        for (i, ident) in self.items.iter().enumerate() {
            ident.fmt(f)?;

            if i < self.items.len() - 1 {
                f.write_str(", ")?;
            }
        }

        write!(f, " }} from {}", self.import_location)
    }
}

/// An inline object type: `{ fragment: string, resolve: ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectTypeDef {
    properties: Vec<Property>,
}

impl ObjectTypeDef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }
}

impl fmt::Display for ObjectTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            return f.write_str("{}");
        }

        f.write_str("{ ")?;

        for (i, prop) in self.properties.iter().enumerate() {
            prop.fmt(f)?;

            if i < self.properties.len() - 1 {
                f.write_str(", ")?;
            }
        }

        f.write_str(" }")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    key: Cow<'static, str>,
    value: TypeKind,
    optional: bool,
}

impl Property {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<TypeKind>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn optional_if(self, optional: bool) -> Self {
        if optional {
            self.optional()
        } else {
            self
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = if self.optional { "?" } else { "" };
        write!(f, "{}{optional}: {}", self.key, self.value)
    }
}

/// An arrow function type: `(parent: User, args: {}) => string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    params: Vec<Property>,
    returns: Box<TypeKind>,
}

impl FunctionType {
    pub fn new(params: Vec<Property>, returns: impl Into<TypeKind>) -> Self {
        Self {
            params,
            returns: Box::new(returns.into()),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;

        for (i, param) in self.params.iter().enumerate() {
            param.fmt(f)?;

            if i < self.params.len() - 1 {
                f.write_str(", ")?;
            }
        }

        write!(f, ") => {}", self.returns)
    }
}

#[derive(Debug)]
pub struct Interface {
    identifier: StaticType,
    extends: Option<StaticType>,
    properties: Vec<Property>,
}

impl Interface {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            identifier: StaticType::ident(name),
            extends: None,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: StaticType) -> Self {
        self.extends = Some(parent);
        self
    }

    pub fn push_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interface {}", self.identifier)?;

        if let Some(ref extends) = self.extends {
            write!(f, " extends {extends}")?;
        }

        if self.properties.is_empty() {
            return f.write_str(" {}");
        }

        f.write_str(" {\n")?;

        for prop in &self.properties {
            writeln!(f, "  {prop};")?;
        }

        f.write_char('}')
    }
}

#[derive(Debug)]
pub struct Type {
    identifier: StaticType,
    definition: TypeKind,
}

impl Type {
    pub fn new(identifier: StaticType, definition: impl Into<TypeKind>) -> Self {
        Self {
            identifier,
            definition: definition.into(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {} = {}", self.identifier, self.definition)
    }
}

/// `const name = { key: expression, ... }`, one entry per line.
#[derive(Debug)]
pub struct Const {
    name: Cow<'static, str>,
    entries: Vec<(Cow<'static, str>, String)>,
}

impl Const {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn push_entry(&mut self, key: impl Into<Cow<'static, str>>, expression: String) {
        self.entries.push((key.into(), expression));
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const {} = ", self.name)?;

        if self.entries.is_empty() {
            return f.write_str("{}");
        }

        f.write_str("{\n")?;

        for (key, expression) in &self.entries {
            writeln!(f, "  {key}: {expression},")?;
        }

        f.write_char('}')
    }
}

#[derive(Debug)]
pub enum ExportKind {
    Interface(Interface),
    Type(Type),
    Const(Const),
}

impl From<Interface> for ExportKind {
    fn from(value: Interface) -> Self {
        ExportKind::Interface(value)
    }
}

impl From<Type> for ExportKind {
    fn from(value: Type) -> Self {
        ExportKind::Type(value)
    }
}

impl From<Const> for ExportKind {
    fn from(value: Const) -> Self {
        ExportKind::Const(value)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Interface(i) => i.fmt(f),
            ExportKind::Type(t) => t.fmt(f),
            ExportKind::Const(c) => c.fmt(f),
        }
    }
}

#[derive(Debug)]
pub struct Export(ExportKind);

impl Export {
    pub fn new(kind: impl Into<ExportKind>) -> Self {
        Self(kind.into())
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export {}", self.0)
    }
}

/// `declare module 'name' { ... }`, used to merge declarations into a third-party module.
#[derive(Debug)]
pub struct DeclareModule {
    module: Quoted,
    interfaces: Vec<Interface>,
}

impl DeclareModule {
    pub fn new(module: impl Into<Cow<'static, str>>) -> Self {
        Self {
            module: Quoted::new(module),
            interfaces: Vec::new(),
        }
    }

    pub fn push_interface(&mut self, interface: Interface) {
        self.interfaces.push(interface);
    }
}

impl fmt::Display for DeclareModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "declare module {} {{", self.module)?;

        for interface in &self.interfaces {
            for line in interface.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
        }

        f.write_char('}')
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{expect, Expect};

    use super::*;

    fn expect_raw_ts(result: impl ToString, expected: &Expect) {
        expected.assert_eq(&result.to_string());
    }

    #[test]
    fn type_ident_with_params() {
        let mut ident = StaticType::ident("Record");
        ident.push_param(StaticType::ident("string"));
        ident.push_param(StaticType::ident("number"));

        expect_raw_ts(&ident, &expect!["Record<string, number>"]);
    }

    #[test]
    fn unions_are_flattened_and_deduplicated() {
        let union = TypeKind::union([
            TypeKind::from(StaticType::ident("User")),
            StaticType::ident("Post").into(),
            TypeKind::from(StaticType::ident("User")).or(StaticType::ident("null")),
        ]);

        expect_raw_ts(&union, &expect!["User | Post | null"]);
        expect_raw_ts(TypeKind::union(Vec::<TypeKind>::new()), &expect!["never"]);
    }

    #[test]
    fn functions_inside_unions_are_parenthesized() {
        let function = FunctionType::new(
            vec![Property::new("parent", StaticType::ident("User"))],
            TypeKind::from(StaticType::ident("string")).or(StaticType::ident("null")),
        );

        let mut record = ObjectTypeDef::new();
        record.push_property(Property::new("fragment", StaticType::ident("string")));
        record.push_property(Property::new("resolve", function.clone()));

        let union = TypeKind::union([TypeKind::from(function), record.into()]);

        expect_raw_ts(
            &union,
            &expect!["((parent: User) => string | null) | { fragment: string, resolve: (parent: User) => string | null }"],
        );
    }

    #[test]
    fn import_many() {
        let import = Import::items("graphql", ["GraphQLResolveInfo", "GraphQLIsTypeOfFn"]);

        expect_raw_ts(
            import,
            &expect!["import { GraphQLResolveInfo, GraphQLIsTypeOfFn } from 'graphql'"],
        );
    }

    #[test]
    fn export_interface() {
        let mut interface = Interface::new("PostsArgs");
        interface.push_property(Property::new("limit", StaticType::ident("number")).optional());
        interface.push_property(Property::new("after", StaticType::ident("string")));

        let expected = expect![[r#"
            export interface PostsArgs {
              limit?: number;
              after: string;
            }"#]];

        expect_raw_ts(Export::new(interface), &expected);
    }

    #[test]
    fn export_type_definition() {
        let r#type = Type::new(
            StaticType::ident("OrderByDirection"),
            TypeKind::from(StaticType::string("ASC")).or(StaticType::string("DESC")),
        );

        expect_raw_ts(
            Export::new(r#type),
            &expect!["export type OrderByDirection = 'ASC' | 'DESC'"],
        );
    }

    #[test]
    fn declare_module_with_empty_interface() {
        let mut module = DeclareModule::new("graphql-tools");
        module.push_interface(Interface::new("IResolvers").extends(StaticType::ident("Resolvers")));

        let expected = expect![[r#"
            declare module 'graphql-tools' {
              interface IResolvers extends Resolvers {}
            }"#]];

        expect_raw_ts(module, &expected);
    }

    #[test]
    fn const_object() {
        let mut constant = Const::new("UserDefaultResolvers");
        constant.push_entry("id", "(parent: User) => parent.id".to_owned());

        let expected = expect![[r#"
            export const UserDefaultResolvers = {
              id: (parent: User) => parent.id,
            }"#]];

        expect_raw_ts(Export::new(constant), &expected);
    }
}
