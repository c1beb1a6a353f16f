#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Generates TypeScript declarations describing the resolvers of a GraphQL schema: their
//! arguments, parent values, return values and the maps collecting them.
//!
//! ```no_run
//! use graphql_typed_resolvers::{formatter::TypescriptFormatter, GenerateInput, GeneratorConfig, ModelMap};
//!
//! let schema = graphql_typed_resolvers::sdl::parse_schema("type Query { hello: String! }")?;
//! let models = ModelMap::new().with_default_module("../models");
//!
//! let units = graphql_typed_resolvers::generate(
//!     GenerateInput {
//!         schema: &schema,
//!         models: &models,
//!         context: None,
//!         config: GeneratorConfig::default(),
//!     },
//!     &TypescriptFormatter::default(),
//! )?;
//! # Ok::<(), graphql_typed_resolvers::CodegenError>(())
//! ```

mod associations;
mod compose;
mod config;
mod dependencies;
mod error;
mod models;
mod render;
mod typescript;

pub mod formatter;
pub mod schema;
pub mod sdl;

pub use self::{
    associations::Associations,
    compose::OutputUnit,
    config::GeneratorConfig,
    dependencies::{group_by_module, needed_models, possible_types, ImportGroups},
    error::CodegenError,
    models::{ContextType, Model, ModelEntry, ModelLookup, ModelMap},
};

use self::{compose::Composer, formatter::Formatter, schema::SchemaListing};

/// Everything a generation run depends on.
#[derive(Debug, Clone, Copy)]
pub struct GenerateInput<'a> {
    pub schema: &'a SchemaListing,
    pub models: &'a ModelMap,
    /// Type of the resolver context. When absent, a permissive `Context` type is declared
    /// locally.
    pub context: Option<&'a ContextType>,
    pub config: GeneratorConfig,
}

/// Generates one unit per object, interface and union of the schema, a unit declaring the enums
/// (when there are any) and a root unit with the map of every resolver.
///
/// The output only depends on the input: running it twice gives identical units.
pub fn generate(input: GenerateInput<'_>, formatter: &dyn Formatter) -> Result<Vec<OutputUnit>, CodegenError> {
    Composer {
        schema: input.schema,
        models: input.models,
        context: input.context,
        config: input.config,
        formatter,
    }
    .compose()
}
