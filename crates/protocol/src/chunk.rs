use serde::{Deserialize, Serialize};

/// A named, ranged code chunk as emitted by the chunker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeChunk {
    /// Symbol name (function, class, method, ...). Anonymous chunks have none.
    #[serde(default)]
    pub name: Option<String>,

    /// Immediate enclosing scope (class name for methods)
    #[serde(default)]
    pub parent_name: Option<String>,

    /// `"file > Parent > Child > symbol"` chain
    #[serde(default)]
    pub breadcrumb: Option<String>,

    /// Absolute (or as-scanned) file path
    #[serde(default)]
    pub file_path: String,

    /// Workspace-relative path, `/`-separated
    pub relative_path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Syntax kind reported by the chunker (e.g. "class", "method")
    #[serde(default)]
    pub node_kind: String,

    /// Source text of the chunk
    #[serde(default)]
    pub full_source: String,
}

impl CodeChunk {
    /// Create a named chunk; the remaining fields are filled with the builders below.
    pub fn new(
        relative_path: impl Into<String>,
        name: impl Into<String>,
        node_kind: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        let relative_path = relative_path.into();
        Self {
            name: Some(name.into()),
            file_path: relative_path.clone(),
            relative_path,
            start_line,
            end_line,
            node_kind: node_kind.into(),
            ..Default::default()
        }
    }

    /// Builder: set parent scope
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    /// Builder: set breadcrumb
    #[must_use]
    pub fn breadcrumb(mut self, breadcrumb: impl Into<String>) -> Self {
        self.breadcrumb = Some(breadcrumb.into());
        self
    }

    /// Builder: set source text
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.full_source = source.into();
        self
    }

    /// Builder: set the absolute file path
    #[must_use]
    pub fn file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Name or the empty string for anonymous chunks
    #[must_use]
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// `Parent.name` when a parent is known, else the bare name
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.parent_name {
            Some(parent) => format!("{parent}.{}", self.name_str()),
            None => self.name_str().to_string(),
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// All chunks of one parsed file.
///
/// Reads both the flat `{ relativePath, chunks }` form and the chunker's
/// `{ parsedFile: { relativePath }, chunks }` form; always writes the flat one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawChunkedFile")]
pub struct ChunkedFile {
    pub relative_path: String,
    #[serde(default)]
    pub chunks: Vec<CodeChunk>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChunkedFile {
    #[serde(default)]
    relative_path: Option<String>,
    #[serde(default)]
    parsed_file: Option<ParsedFileRef>,
    #[serde(default)]
    chunks: Vec<CodeChunk>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedFileRef {
    relative_path: String,
}

impl TryFrom<RawChunkedFile> for ChunkedFile {
    type Error = String;

    fn try_from(raw: RawChunkedFile) -> Result<Self, Self::Error> {
        let relative_path = raw
            .relative_path
            .or_else(|| raw.parsed_file.map(|parsed| parsed.relative_path))
            .ok_or_else(|| {
                "chunked file needs relativePath or parsedFile.relativePath".to_string()
            })?;
        Ok(Self {
            relative_path,
            chunks: raw.chunks,
        })
    }
}

impl ChunkedFile {
    pub fn new(relative_path: impl Into<String>, chunks: Vec<CodeChunk>) -> Self {
        Self {
            relative_path: relative_path.into(),
            chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let method = CodeChunk::new("auth.ts", "validate", "method", 3, 9).parent("TokenService");
        assert_eq!(method.qualified_name(), "TokenService.validate");
        assert_eq!(method.line_count(), 7);

        let free = CodeChunk::new("auth.ts", "login", "function", 12, 12);
        assert_eq!(free.qualified_name(), "login");
        assert_eq!(free.line_count(), 1);
    }

    #[test]
    fn test_chunk_deserializes_collaborator_shape() {
        let raw = r#"{
            "name": "TokenService",
            "parentName": null,
            "breadcrumb": "src/auth.ts > TokenService",
            "filePath": "/repo/src/auth.ts",
            "relativePath": "src/auth.ts",
            "startLine": 1,
            "endLine": 40,
            "nodeKind": "class",
            "fullSource": "class TokenService {}"
        }"#;
        let chunk: CodeChunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.name.as_deref(), Some("TokenService"));
        assert_eq!(chunk.relative_path, "src/auth.ts");
        assert_eq!(chunk.node_kind, "class");
    }

    #[test]
    fn test_chunked_file_accepts_nested_parsed_file() {
        let nested = r#"{
            "parsedFile": { "relativePath": "src/auth.ts", "language": "typescript" },
            "chunks": [
                { "name": "login", "relativePath": "src/auth.ts", "startLine": 1, "endLine": 3 }
            ]
        }"#;
        let file: ChunkedFile = serde_json::from_str(nested).unwrap();
        assert_eq!(file.relative_path, "src/auth.ts");
        assert_eq!(file.chunks.len(), 1);

        let flat: ChunkedFile =
            serde_json::from_str(r#"{ "relativePath": "lib/a.ts", "chunks": [] }"#).unwrap();
        assert_eq!(flat, ChunkedFile::new("lib/a.ts", vec![]));

        let written = serde_json::to_value(&file).unwrap();
        assert_eq!(written["relativePath"], "src/auth.ts");
        assert!(written.get("parsedFile").is_none());

        assert!(serde_json::from_str::<ChunkedFile>(r#"{ "chunks": [] }"#).is_err());
    }
}
