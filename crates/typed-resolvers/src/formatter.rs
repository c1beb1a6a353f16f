use std::path::Path;

use dprint_plugin_typescript::configuration::{
    Configuration, ConfigurationBuilder, QuoteStyle, SemiColons, TrailingCommas,
};

/// Reformats generated source text before it is handed back to the caller.
pub trait Formatter {
    fn format(&self, path: &str, code: &str) -> anyhow::Result<String>;
}

/// Formats TypeScript with dprint.
pub struct TypescriptFormatter {
    config: Configuration,
}

impl Default for TypescriptFormatter {
    fn default() -> Self {
        Self {
            config: ConfigurationBuilder::new()
                .line_width(80)
                .prefer_hanging(true)
                .prefer_single_line(false)
                .trailing_commas(TrailingCommas::Never)
                .quote_style(QuoteStyle::PreferSingle)
                .indent_width(2)
                .semi_colons(SemiColons::Asi)
                .build(),
        }
    }
}

impl Formatter for TypescriptFormatter {
    fn format(&self, path: &str, code: &str) -> anyhow::Result<String> {
        let formatted = dprint_plugin_typescript::format_text(Path::new(path), code, &self.config)?;

        // dprint answers `None` when the input is already formatted.
        Ok(formatted.unwrap_or_else(|| code.to_owned()))
    }
}

/// Leaves the generated text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, _path: &str, code: &str) -> anyhow::Result<String> {
        Ok(code.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn formats_typescript() {
        let formatted = TypescriptFormatter::default()
            .format("enums.ts", "export type Role='ADMIN'|'USER'")
            .unwrap();

        expect![[r#"
            export type Role = 'ADMIN' | 'USER'
        "#]]
        .assert_eq(&formatted);
    }

    #[test]
    fn rejects_invalid_code() {
        assert!(TypescriptFormatter::default().format("User.ts", "export type = {").is_err());
    }
}
