//! Query-to-response orchestration.

use crate::config::LookupConfig;
use crate::enrich::{enrich, SymbolFacts};
use crate::error::Result;
use crate::hints::{case_hint, no_match_hint, path_hint};
use crate::query::{parse_symbol_query, ParsedSymbolPath};
use crate::resolver::{resolve_symbol, Resolution, ResolvedMatch};
use crate::snapshot::{ChunkSnapshots, SnapshotSource};
use symgraph_graph::{generate_connection_graph, GraphResultEntry};
use symgraph_protocol::{estimate_tokens, ChunkedFile, CodeChunk, LookupOutcome, LookupResponse};

const CODE_SEPARATOR: &str = "\n\n--- Code ---\n\n";

/// Symbol lookup over an already-chunked workspace.
pub struct SymbolLookup {
    facts: Box<dyn SymbolFacts>,
    snapshots: Box<dyn SnapshotSource>,
    config: LookupConfig,
}

impl SymbolLookup {
    pub fn new(facts: impl SymbolFacts + 'static) -> Self {
        Self {
            facts: Box::new(facts),
            snapshots: Box::new(ChunkSnapshots),
            config: LookupConfig::default(),
        }
    }

    #[must_use]
    pub fn with_snapshots(mut self, snapshots: impl SnapshotSource + 'static) -> Self {
        self.snapshots = Box::new(snapshots);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: LookupConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Answer a query. Queries without the `symbol =` prefix come back as
    /// [`LookupOutcome::not_a_lookup`]; missing symbols are a successful
    /// response with `found = false`.
    pub fn lookup(&self, query: &str, files: &[ChunkedFile]) -> Result<LookupOutcome> {
        let Some(path) = parse_symbol_query(query) else {
            log::debug!("Query is not a symbol lookup: {query:?}");
            return Ok(LookupOutcome::not_a_lookup());
        };

        let resolution = resolve_symbol(&path, files);
        let matches = match resolution {
            Resolution::Matches(matches) => matches,
            other => return Ok(LookupOutcome::lookup(self.not_found(&path, &other))),
        };

        let entries: Vec<GraphResultEntry> = matches
            .iter()
            .map(|resolved| enrich(self.facts.as_ref(), resolved))
            .collect();
        let graph = generate_connection_graph(query, &entries)?;

        let mut output = graph.text;
        if self.config.include_code {
            let code = self.code_section(&matches, files);
            if !code.is_empty() {
                output.push_str(CODE_SEPARATOR);
                output.push_str(&code);
            }
        }

        log::info!(
            "Symbol lookup '{path}' matched {} symbols in {} files",
            graph.result_count,
            graph.file_count
        );
        Ok(LookupOutcome::lookup(LookupResponse {
            found: true,
            token_count: estimate_tokens(&output),
            output,
            match_count: graph.result_count,
            file_count: graph.file_count,
            hint: None,
        }))
    }

    fn not_found(&self, path: &ParsedSymbolPath, resolution: &Resolution<'_>) -> LookupResponse {
        let hint = match resolution {
            Resolution::CaseHints(hints) => case_hint(path, hints, self.config.max_case_hints),
            Resolution::PathHints(hints) => path_hint(path, hints, self.config.max_path_hints),
            Resolution::Matches(_) | Resolution::NotFound => no_match_hint(path),
        };
        log::info!("Symbol lookup '{path}' found nothing");
        LookupResponse {
            found: false,
            token_count: estimate_tokens(&hint),
            output: hint.clone(),
            match_count: 0,
            file_count: 0,
            hint: Some(hint),
        }
    }

    /// Snapshots grouped per file in first-match order. A failing file is
    /// left out.
    fn code_section(&self, matches: &[ResolvedMatch<'_>], files: &[ChunkedFile]) -> String {
        let mut groups: Vec<(&str, Vec<&CodeChunk>)> = Vec::new();
        for resolved in matches {
            match groups
                .iter_mut()
                .find(|(path, _)| *path == resolved.relative_path)
            {
                Some((_, chunks)) => chunks.push(resolved.chunk),
                None => groups.push((resolved.relative_path, vec![resolved.chunk])),
            }
        }

        let mut sections = Vec::with_capacity(groups.len());
        for (relative_path, chunks) in groups {
            let Some(file) = files.iter().find(|f| f.relative_path == relative_path) else {
                continue;
            };
            match self
                .snapshots
                .generate_snapshot(file, &chunks, &self.config.workspace_root)
            {
                Ok(snapshot) if !snapshot.snapshot.is_empty() => sections.push(snapshot.snapshot),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Snapshot for {relative_path} failed, omitting it: {err:#}");
                }
            }
        }
        sections.join("\n\n")
    }
}
