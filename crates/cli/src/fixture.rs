use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use symgraph_protocol::{ChunkedFile, SymbolMetadata};

/// Pre-chunked workspace plus the language-service facts for its symbols
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    /// Source root for on-disk snapshot reads, relative to the fixture file
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub files: Vec<ChunkedFile>,
    #[serde(default)]
    pub metadata: Vec<SymbolMetadata>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace fixture {}", path.display()))?;
        let mut fixture: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid workspace fixture {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        fixture.root = fixture.root.map(|root| base.join(root));
        log::debug!(
            "Loaded fixture {} ({} files, {} symbols with metadata)",
            path.display(),
            fixture.files.len(),
            fixture.metadata.len()
        );
        Ok(fixture)
    }
}
