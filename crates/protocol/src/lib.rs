//! Shared data model for symbol lookup and connection graphs.
//!
//! Everything here is produced by collaborators outside the engine (the chunker,
//! the language-service resolvers) or handed back to callers (the output
//! contract). The engine only reads these records.

mod chunk;
mod metadata;
pub mod path;
mod response;

pub use chunk::{ChunkedFile, CodeChunk};
pub use metadata::{
    IncomingCaller, Member, OutgoingCall, Parameter, References, ReturnType, SymbolKey,
    SymbolMetadata, SymbolRef, TypeFlows, TypeHierarchy, TypeRef,
};
pub use response::{LookupOutcome, LookupResponse};

/// Rough token estimate used for every budget figure: one token per four chars.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
