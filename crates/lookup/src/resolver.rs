use crate::query::ParsedSymbolPath;
use serde::Serialize;
use std::collections::HashSet;
use symgraph_protocol::path::{basename, is_path_suffix_match, normalize_relative_path};
use symgraph_protocol::{ChunkedFile, CodeChunk};

/// A chunk that exactly matches the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMatch<'a> {
    pub chunk: &'a CodeChunk,
    /// Workspace-relative path of the owning file
    pub relative_path: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NearMatchKind {
    CaseMismatch,
    /// Exact name and scope, but a different syntax kind than requested
    KindMismatch,
    PartialPath,
}

/// Advisory suggestion; never accepted as a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearMatch {
    pub value: String,
    pub location: String,
    pub kind: NearMatchKind,
    /// Syntax kind of the suggested chunk; empty for path hints
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_kind: String,
}

/// Outcome of resolving a parsed path against a chunk set.
///
/// Exact matches and hints never mix: either there are matches, or there
/// are suggestions of one kind, or there is nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matches(Vec<ResolvedMatch<'a>>),
    /// The symbol exists, but only with different casing
    CaseHints(Vec<NearMatch>),
    /// The file filter named no file; similar paths instead
    PathHints(Vec<NearMatch>),
    NotFound,
}

impl Resolution<'_> {
    #[must_use]
    pub fn matches(&self) -> &[ResolvedMatch<'_>] {
        match self {
            Self::Matches(matches) => matches,
            _ => &[],
        }
    }

    #[must_use]
    pub fn near_matches(&self) -> &[NearMatch] {
        match self {
            Self::CaseHints(hints) | Self::PathHints(hints) => hints,
            Self::Matches(_) | Self::NotFound => &[],
        }
    }

    #[must_use]
    pub const fn has_case_hints(&self) -> bool {
        matches!(self, Self::CaseHints(_))
    }

    #[must_use]
    pub const fn has_path_hints(&self) -> bool {
        matches!(self, Self::PathHints(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMode {
    Sensitive,
    Insensitive,
}

impl CaseMode {
    fn eq(self, a: &str, b: &str) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Resolve a parsed path against the chunked files of a workspace.
pub fn resolve_symbol<'a>(path: &ParsedSymbolPath, files: &'a [ChunkedFile]) -> Resolution<'a> {
    // Step A: file scoping. An unknown file short-circuits symbol search.
    let scoped: Vec<&'a ChunkedFile> = match &path.file_path {
        Some(filter) => {
            let filter = normalize_relative_path(filter);
            let scoped: Vec<_> = files
                .iter()
                .filter(|file| normalize_relative_path(&file.relative_path) == filter)
                .collect();
            if scoped.is_empty() {
                let hints = path_hints(&filter, files);
                log::debug!("File filter '{filter}' matched no file; {} path hints", hints.len());
                return if hints.is_empty() {
                    Resolution::NotFound
                } else {
                    Resolution::PathHints(hints)
                };
            }
            scoped
        }
        None => files.iter().collect(),
    };

    // Step B: exact, case-sensitive name and parent match
    let exact = scoped.iter().copied().flat_map(|file| {
        file.chunks
            .iter()
            .filter(|chunk| symbol_matches(chunk, path, CaseMode::Sensitive))
            .map(move |chunk| ResolvedMatch {
                chunk,
                relative_path: file.relative_path.as_str(),
            })
    });

    // Step C: optional kind filter, exact path only
    let matches: Vec<ResolvedMatch<'a>> = match &path.symbol_kind {
        Some(kind) => exact
            .filter(|m| m.chunk.node_kind.to_lowercase() == *kind)
            .collect(),
        None => exact.collect(),
    };

    if !matches.is_empty() {
        log::debug!("Resolved '{path}' to {} matches", matches.len());
        return Resolution::Matches(matches);
    }

    // Step D: case-insensitive fallback, advisory only
    let hints: Vec<NearMatch> = scoped
        .iter()
        .copied()
        .flat_map(|file| {
            file.chunks
                .iter()
                .filter(|chunk| symbol_matches(chunk, path, CaseMode::Insensitive))
                .map(move |chunk| NearMatch {
                    value: chunk.qualified_name(),
                    location: format!("{}:{}", file.relative_path, chunk.start_line),
                    kind: if symbol_matches(chunk, path, CaseMode::Sensitive) {
                        NearMatchKind::KindMismatch
                    } else {
                        NearMatchKind::CaseMismatch
                    },
                    node_kind: chunk.node_kind.clone(),
                })
        })
        .collect();

    log::debug!("No exact match for '{path}'; {} case hints", hints.len());
    if hints.is_empty() {
        Resolution::NotFound
    } else {
        Resolution::CaseHints(hints)
    }
}

fn symbol_matches(chunk: &CodeChunk, path: &ParsedSymbolPath, case: CaseMode) -> bool {
    let Some(name) = chunk.name.as_deref() else {
        return false;
    };
    if !case.eq(name, &path.symbol_name) {
        return false;
    }
    let Some(parent) = path.parent_name.as_deref() else {
        return true;
    };
    if chunk
        .parent_name
        .as_deref()
        .is_some_and(|own| case.eq(own, parent))
    {
        return true;
    }
    parent.contains('.') && breadcrumb_has_chain(chunk.breadcrumb.as_deref(), parent, case)
}

/// The dotted parent chain must occupy the segments right before the last one.
// Pure string comparison: two distinct scopes with equal dotted names both match.
fn breadcrumb_has_chain(breadcrumb: Option<&str>, parent: &str, case: CaseMode) -> bool {
    let Some(breadcrumb) = breadcrumb else {
        return false;
    };
    let segments: Vec<&str> = breadcrumb.split(" > ").map(str::trim).collect();
    let chain: Vec<&str> = parent.split('.').map(str::trim).collect();
    if segments.len() < chain.len() + 1 {
        return false;
    }
    let end = segments.len() - 1;
    let start = end - chain.len();
    segments[start..end]
        .iter()
        .zip(&chain)
        .all(|(segment, expected)| case.eq(segment, expected))
}

fn path_hints(filter: &str, files: &[ChunkedFile]) -> Vec<NearMatch> {
    let wanted = basename(filter);
    let mut seen = HashSet::new();
    files
        .iter()
        .map(|file| normalize_relative_path(&file.relative_path))
        .filter(|rel| basename(rel) == wanted || is_path_suffix_match(rel, filter))
        .filter(|rel| seen.insert(rel.clone()))
        .map(|rel| NearMatch {
            value: rel.clone(),
            location: rel,
            kind: NearMatchKind::PartialPath,
            node_kind: String::new(),
        })
        .collect()
}
