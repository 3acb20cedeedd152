//! Source snapshots appended after the connection map.

use anyhow::{Context, Result};
use std::path::Path;
use symgraph_protocol::{ChunkedFile, CodeChunk};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub snapshot: String,
}

/// Renders source text for the matched chunks of one file
pub trait SnapshotSource {
    fn generate_snapshot(
        &self,
        file: &ChunkedFile,
        targets: &[&CodeChunk],
        workspace_root: &Path,
    ) -> Result<Snapshot>;
}

/// Prints each target's own source, reading the file from disk for chunks
/// the chunker left without text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkSnapshots;

impl SnapshotSource for ChunkSnapshots {
    fn generate_snapshot(
        &self,
        file: &ChunkedFile,
        targets: &[&CodeChunk],
        workspace_root: &Path,
    ) -> Result<Snapshot> {
        let mut on_disk: Option<String> = None;
        let mut parts = Vec::with_capacity(targets.len());

        for chunk in targets {
            let source = if chunk.full_source.is_empty() {
                if on_disk.is_none() {
                    let path = workspace_root.join(&file.relative_path);
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    on_disk = Some(text);
                }
                let text = on_disk.as_deref().unwrap_or_default();
                line_range(text, chunk.start_line, chunk.end_line)
            } else {
                chunk.full_source.trim_end().to_string()
            };
            parts.push(format!(
                "// {}:{}-{}\n{}",
                file.relative_path, chunk.start_line, chunk.end_line, source
            ));
        }

        Ok(Snapshot {
            snapshot: parts.join("\n\n"),
        })
    }
}

/// 1-indexed inclusive line slice
fn line_range(text: &str, start: usize, end: usize) -> String {
    text.lines()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start) + 1)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_source_with_header() {
        let chunk = CodeChunk::new("src/a.ts", "f", "function", 2, 3).source("function f() {\n}\n");
        let file = ChunkedFile::new("src/a.ts", vec![chunk.clone()]);
        let snap = ChunkSnapshots
            .generate_snapshot(&file, &[&chunk], Path::new("."))
            .unwrap();
        assert_eq!(snap.snapshot, "// src/a.ts:2-3\nfunction f() {\n}");
    }

    #[test]
    fn reads_missing_source_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/b.ts"), "line1\nline2\nline3\nline4\n").unwrap();

        let chunk = CodeChunk::new("src/b.ts", "g", "function", 2, 3);
        let file = ChunkedFile::new("src/b.ts", vec![chunk.clone()]);
        let snap = ChunkSnapshots
            .generate_snapshot(&file, &[&chunk], dir.path())
            .unwrap();
        assert_eq!(snap.snapshot, "// src/b.ts:2-3\nline2\nline3");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let chunk = CodeChunk::new("gone.ts", "g", "function", 1, 1);
        let file = ChunkedFile::new("gone.ts", vec![chunk.clone()]);
        assert!(ChunkSnapshots
            .generate_snapshot(&file, &[&chunk], dir.path())
            .is_err());
    }
}
