use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("Failed to parse the schema: {0}")]
    Parse(#[from] graphql_parser::schema::ParseError),
    #[error("Type `{name}` is referenced but never defined")]
    UnknownType { name: String },
    #[error("`{name}` is not an object type")]
    NotAnObject { name: String },
    #[error("`{name}` is not an interface")]
    NotAnInterface { name: String },
    #[error("`{name}` is not a union")]
    NotAUnion { name: String },
    #[error("No model is mapped to the object type `{name}`")]
    MissingModel { name: String },
    #[error("`{name}` is declared twice in the unit of `{entity}`")]
    DuplicateDeclaration { entity: String, name: String },
    #[error("Failed to render declarations: {0}")]
    Render(#[from] fmt::Error),
}
