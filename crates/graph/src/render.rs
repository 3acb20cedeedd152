//! Text rendering for connection graphs.
//!
//! Two layouts: a compact card for a single result, and a sectioned map
//! (Summary, Graph, Patterns, Details) for several.

use crate::topology::Topology;
use crate::types::{DiamondDirection, GraphLine, GraphResultEntry, NodeRole, Pattern, Truncation};
use std::collections::HashSet;
use symgraph_protocol::{estimate_tokens, SymbolKey};

const CARD_INDENT: &str = "  ";

/// Compact card for a single result
#[must_use]
pub fn render_single(entry: &GraphResultEntry) -> String {
    card(entry, None).join("\n")
}

/// Sectioned connection map for two or more results.
///
/// The summary's token figure covers everything after the summary line.
#[must_use]
pub fn render_multi(
    query: &str,
    results: &[GraphResultEntry],
    topology: &Topology,
    patterns: &[Pattern],
) -> String {
    let mut sections: Vec<String> = Vec::new();

    let graph: Vec<String> = topology.lines().iter().map(graph_line).collect();
    sections.push(format!("Graph:\n{}", graph.join("\n")));

    if !patterns.is_empty() {
        let lines: Vec<String> = patterns
            .iter()
            .map(|pattern| pattern_line(pattern, results))
            .collect();
        sections.push(format!("Patterns:\n{}", lines.join("\n")));
    }

    let details: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(pos, entry)| card(entry, Some(pos + 1)).join("\n"))
        .collect();
    sections.push(format!("Details:\n{}", details.join("\n\n")));

    let body = format!("\n\n{}", sections.join("\n\n"));
    let summary = format!(
        "Summary: {} for \"{}\" across {} (~{} tokens)",
        plural(results.len(), "result", "results"),
        query.trim(),
        plural(count_files(results), "file", "files"),
        estimate_tokens(&body)
    );
    format!("{summary}{body}")
}

pub(crate) fn count_files(results: &[GraphResultEntry]) -> usize {
    results
        .iter()
        .map(|entry| entry.chunk.relative_path.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn graph_line(line: &GraphLine) -> String {
    let mut out = CARD_INDENT.repeat(line.depth);
    if line.depth > 0 {
        out.push_str("→ ");
    }
    if let Some(index) = line.result_index() {
        out.push_str(&format!("[{index}] "));
    }
    out.push_str(&format!("{} ({})", line.name, line.file_path));
    match line.role {
        NodeRole::Result { .. } if line.depth > 0 => out.push_str(" ★"),
        NodeRole::SharedDependency => out.push_str(" ◆"),
        NodeRole::Result { .. } | NodeRole::Dependency => {}
    }
    match line.truncation {
        Some(Truncation::Cycle) => out.push_str(" [cycle]"),
        Some(Truncation::DepthLimit) => out.push_str(" [depth limit]"),
        None => {}
    }
    out
}

fn result_label(results: &[GraphResultEntry], index: usize) -> String {
    results
        .get(index.saturating_sub(1))
        .map_or_else(|| format!("[{index}]"), |entry| format!("[{index}] {}", entry.name()))
}

fn result_labels(results: &[GraphResultEntry], indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&index| result_label(results, index))
        .collect::<Vec<_>>()
        .join(", ")
}

fn pattern_line(pattern: &Pattern, results: &[GraphResultEntry]) -> String {
    match pattern {
        Pattern::Hub(hub) => format!(
            "Hub: {} ★ is called by {}",
            result_label(results, hub.result_index),
            result_labels(results, &hub.called_by)
        ),
        Pattern::SharedDependency(dep) => format!(
            "Shared dependency: {} ({}) ◆ used by {}",
            dep.name,
            dep.file_path,
            result_labels(results, &dep.used_by)
        ),
        Pattern::SharedType(shared) => format!(
            "Shared type: {} ({}) used by {} of {} results",
            shared.name, shared.file_path, shared.usage_count, shared.total_results
        ),
        Pattern::Diamond(diamond) => {
            let (left, right) = diamond.results;
            let relation = match diamond.direction {
                DiamondDirection::Callees => "both reach",
                DiamondDirection::Callers => "are both reached from",
            };
            format!(
                "Diamond: {} and {} {} {} ({})",
                result_label(results, left),
                result_label(results, right),
                relation,
                diamond.shared_symbol.name,
                diamond.shared_symbol.file_path
            )
        }
    }
}

/// Header plus indented fact lines; absent metadata fields are skipped.
fn card(entry: &GraphResultEntry, index: Option<usize>) -> Vec<String> {
    let chunk = &entry.chunk;
    let meta = &entry.metadata;
    let own_file = meta.symbol.file_path.as_str();

    let prefix = index.map(|i| format!("[{i}] ")).unwrap_or_default();
    let mut lines = vec![format!(
        "{prefix}{} — {}:{}-{}",
        chunk.qualified_name(),
        chunk.relative_path,
        chunk.start_line,
        chunk.end_line
    )];
    let mut push = |line: String| lines.push(format!("{CARD_INDENT}{line}"));

    let mut facts: Vec<String> = Vec::new();
    if !chunk.node_kind.is_empty() {
        facts.push(chunk.node_kind.clone());
    }
    if let Some(modifiers) = meta.modifiers.as_ref().filter(|m| !m.is_empty()) {
        facts.push(modifiers.join(" "));
    }
    if let Some(refs) = &meta.references {
        facts.push(format!(
            "referenced in {}",
            plural(refs.file_count, "file", "files")
        ));
    }
    if !facts.is_empty() {
        push(facts.join(" · "));
    }

    if let Some(signature) = &meta.signature {
        push(format!("Signature: {signature}"));
    }

    if let Some(hierarchy) = meta.type_hierarchy.as_ref().filter(|h| !h.is_empty()) {
        if let Some(base) = &hierarchy.extends {
            push(format!("Extends: {base}"));
        }
        if !hierarchy.implements.is_empty() {
            push(format!("Implements: {}", hierarchy.implements.join(", ")));
        }
    }

    let calls = symbol_list(
        meta.outgoing_calls
            .iter()
            .map(|call| call.target.key()),
        own_file,
    );
    if !calls.is_empty() {
        push(format!("Calls: {calls}"));
    }

    let callers = symbol_list(
        meta.incoming_callers
            .iter()
            .map(|caller| caller.source.key()),
        own_file,
    );
    if !callers.is_empty() {
        push(format!("Called by: {callers}"));
    }

    if let Some(members) = meta.members.as_ref().filter(|m| !m.is_empty()) {
        let rendered: Vec<String> = members
            .iter()
            .map(|member| match &member.name {
                Some(name) => format!("{name} ({})", member.kind),
                None => member.kind.clone(),
            })
            .collect();
        push(format!("Members: {}", rendered.join(", ")));
    }

    if let Some(flows) = &meta.type_flows {
        if !flows.parameters.is_empty() {
            let params: Vec<String> = flows
                .parameters
                .iter()
                .map(|param| format!("{}: {}", param.name, param.type_name))
                .collect();
            push(format!("Types in: {}", params.join(", ")));
        }
        if let Some(ret) = &flows.return_type {
            push(format!("Types out: {}", ret.type_name));
        }
    }

    lines
}

/// Distinct symbols in first-seen order; cross-file ones carry `(file)`.
fn symbol_list(keys: impl Iterator<Item = SymbolKey>, own_file: &str) -> String {
    let mut seen = HashSet::new();
    keys.filter(|key| seen.insert(key.clone()))
        .map(|key| {
            if key.file_path == own_file {
                key.name
            } else {
                format!("{} ({})", key.name, key.file_path)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
