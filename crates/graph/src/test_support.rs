use crate::types::GraphResultEntry;
use symgraph_protocol::{CodeChunk, OutgoingCall, SymbolMetadata, SymbolRef};

pub fn sym(file: &str, name: &str) -> SymbolRef {
    SymbolRef::new(name, file, 1)
}

pub fn call(file: &str, name: &str) -> OutgoingCall {
    OutgoingCall::to(sym(file, name))
}

pub fn entry(file: &str, name: &str, calls: Vec<OutgoingCall>) -> GraphResultEntry {
    let chunk = CodeChunk::new(file, name, "function", 1, 5);
    let mut metadata = SymbolMetadata::new(sym(file, name));
    metadata.outgoing_calls = calls;
    GraphResultEntry::new(chunk, metadata)
}
