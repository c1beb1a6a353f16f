#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::fs;

use anyhow::Context as _;
use graphql_typed_resolvers::{
    formatter::{Formatter, Passthrough, TypescriptFormatter},
    generate, sdl, GenerateInput,
};
use tracing_subscriber::EnvFilter;

use self::config::ProjectConfig;

mod args;
mod config;
mod writer;

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_level.as_filter_str()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    tracing::debug!("typed-resolvers {}", env!("CARGO_PKG_VERSION"));

    let config = ProjectConfig::load(&args.config)?;

    let sdl = fs::read_to_string(&config.schema)
        .with_context(|| format!("reading schema from {}", config.schema.display()))?;
    let schema = sdl::parse_schema(&sdl)?;

    let formatter: Box<dyn Formatter> = if args.no_format {
        Box::new(Passthrough)
    } else {
        Box::new(TypescriptFormatter::default())
    };

    let units = generate(
        GenerateInput {
            schema: &schema,
            models: &config.models,
            context: config.context.as_ref(),
            config: config.generator,
        },
        formatter.as_ref(),
    )?;

    let summary = writer::write_units(&config.output, &units)?;

    tracing::info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        output = %config.output.display(),
        "generated resolver types"
    );

    Ok(())
}
