use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use graphql_typed_resolvers::OutputUnit;

/// What happened to the units of a generation run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub written: Vec<PathBuf>,
    /// Units that may carry user edits and were already present.
    pub skipped: Vec<PathBuf>,
}

/// Writes every unit under `output`. Units that are not forced are only written when missing.
pub(crate) fn write_units(output: &Path, units: &[OutputUnit]) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();

    for unit in units {
        let path = output.join(&unit.path);

        if !unit.force_overwrite && path.exists() {
            tracing::info!(path = %path.display(), "keeping existing file");
            summary.skipped.push(path);
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent.display()))?;
        }

        fs::write(&path, &unit.content).with_context(|| format!("writing {}", path.display()))?;

        tracing::debug!(path = %path.display(), "wrote file");
        summary.written.push(path);
    }

    Ok(summary)
}
