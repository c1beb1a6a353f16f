use std::{fmt, path::PathBuf};

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "typed-resolvers", version)]
/// Generates TypeScript resolver signatures from a GraphQL schema
pub(crate) struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short, env = "TYPED_RESOLVERS_CONFIG", default_value = "./typed-resolvers.toml")]
    pub config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "TYPED_RESOLVERS_LOG", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
    /// Write the generated code as is, without running the formatter
    #[arg(long)]
    pub no_format: bool,
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warning and error messages
    #[default]
    Info,
    /// Debug messages from the generator, including one span per rendered entity
    Debug,
    /// Everything, dependencies included
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "typed_resolvers=error,graphql_typed_resolvers=error,off",
            LogLevel::Warn => "typed_resolvers=warn,graphql_typed_resolvers=warn,off",
            LogLevel::Info => "typed_resolvers=info,graphql_typed_resolvers=info,off",
            LogLevel::Debug => "typed_resolvers=debug,graphql_typed_resolvers=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
