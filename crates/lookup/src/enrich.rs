//! Turning resolved chunks into graph entries via the language service.

use crate::resolver::ResolvedMatch;
use anyhow::Result;
use std::collections::HashMap;
use symgraph_graph::GraphResultEntry;
use symgraph_protocol::{
    IncomingCaller, Member, OutgoingCall, References, SymbolKey, SymbolMetadata, SymbolRef,
    TypeFlows, TypeHierarchy,
};

/// Per-symbol semantic facts computed by an external language service.
///
/// Each field is resolved independently; a failing resolver only costs its
/// own field.
pub trait SymbolFacts {
    fn signature(&self, _symbol: &SymbolRef) -> Result<Option<String>> {
        Ok(None)
    }

    fn modifiers(&self, _symbol: &SymbolRef) -> Result<Option<Vec<String>>> {
        Ok(None)
    }

    fn outgoing_calls(&self, _symbol: &SymbolRef) -> Result<Vec<OutgoingCall>> {
        Ok(Vec::new())
    }

    fn incoming_callers(&self, _symbol: &SymbolRef) -> Result<Vec<IncomingCaller>> {
        Ok(Vec::new())
    }

    fn type_hierarchy(&self, _symbol: &SymbolRef) -> Result<Option<TypeHierarchy>> {
        Ok(None)
    }

    fn members(&self, _symbol: &SymbolRef) -> Result<Option<Vec<Member>>> {
        Ok(None)
    }

    fn references(&self, _symbol: &SymbolRef) -> Result<Option<References>> {
        Ok(None)
    }

    fn type_flows(&self, _symbol: &SymbolRef) -> Result<Option<TypeFlows>> {
        Ok(None)
    }
}

/// Build the graph entry for one match. Never fails.
pub fn enrich(facts: &dyn SymbolFacts, resolved: &ResolvedMatch<'_>) -> GraphResultEntry {
    let symbol = SymbolRef::new(
        resolved.chunk.name_str(),
        resolved.relative_path,
        resolved.chunk.start_line,
    );

    let mut metadata = SymbolMetadata::new(symbol.clone());
    metadata.signature = field("signature", &symbol, facts.signature(&symbol)).flatten();
    metadata.modifiers = field("modifiers", &symbol, facts.modifiers(&symbol)).flatten();
    metadata.outgoing_calls =
        field("outgoing calls", &symbol, facts.outgoing_calls(&symbol)).unwrap_or_default();
    metadata.incoming_callers =
        field("incoming callers", &symbol, facts.incoming_callers(&symbol)).unwrap_or_default();
    metadata.type_hierarchy =
        field("type hierarchy", &symbol, facts.type_hierarchy(&symbol)).flatten();
    metadata.members = field("members", &symbol, facts.members(&symbol)).flatten();
    metadata.references = field("references", &symbol, facts.references(&symbol)).flatten();
    metadata.type_flows = field("type flows", &symbol, facts.type_flows(&symbol)).flatten();

    GraphResultEntry::new(resolved.chunk.clone(), metadata)
}

fn field<T>(what: &str, symbol: &SymbolRef, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Failed to resolve {what} for {}: {err:#}", symbol.key());
            None
        }
    }
}

/// Facts served from pre-computed metadata, keyed by `(file, name)`
#[derive(Debug, Clone, Default)]
pub struct StaticFacts {
    by_key: HashMap<SymbolKey, SymbolMetadata>,
}

impl StaticFacts {
    pub fn new(metadata: impl IntoIterator<Item = SymbolMetadata>) -> Self {
        Self {
            by_key: metadata.into_iter().map(|m| (m.key(), m)).collect(),
        }
    }

    fn get(&self, symbol: &SymbolRef) -> Option<&SymbolMetadata> {
        self.by_key.get(&symbol.key())
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl SymbolFacts for StaticFacts {
    fn signature(&self, symbol: &SymbolRef) -> Result<Option<String>> {
        Ok(self.get(symbol).and_then(|m| m.signature.clone()))
    }

    fn modifiers(&self, symbol: &SymbolRef) -> Result<Option<Vec<String>>> {
        Ok(self.get(symbol).and_then(|m| m.modifiers.clone()))
    }

    fn outgoing_calls(&self, symbol: &SymbolRef) -> Result<Vec<OutgoingCall>> {
        Ok(self
            .get(symbol)
            .map(|m| m.outgoing_calls.clone())
            .unwrap_or_default())
    }

    fn incoming_callers(&self, symbol: &SymbolRef) -> Result<Vec<IncomingCaller>> {
        Ok(self
            .get(symbol)
            .map(|m| m.incoming_callers.clone())
            .unwrap_or_default())
    }

    fn type_hierarchy(&self, symbol: &SymbolRef) -> Result<Option<TypeHierarchy>> {
        Ok(self.get(symbol).and_then(|m| m.type_hierarchy.clone()))
    }

    fn members(&self, symbol: &SymbolRef) -> Result<Option<Vec<Member>>> {
        Ok(self.get(symbol).and_then(|m| m.members.clone()))
    }

    fn references(&self, symbol: &SymbolRef) -> Result<Option<References>> {
        Ok(self.get(symbol).and_then(|m| m.references.clone()))
    }

    fn type_flows(&self, symbol: &SymbolRef) -> Result<Option<TypeFlows>> {
        Ok(self.get(symbol).and_then(|m| m.type_flows.clone()))
    }
}
