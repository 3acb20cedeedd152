//! Symbol lookup for structured `symbol = ...` queries
//!
//! ```text
//! query ──► parse ──► resolve ──► enrich (SymbolFacts) ──► connection graph
//!                        │                                       │
//!                        └─► hints (not found)      snapshots ◄──┘
//! ```
//!
//! A query that does not start with `symbol =` is not an error: the engine
//! reports it as "not a lookup" so the caller can route it elsewhere.

pub mod config;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod hints;
pub mod query;
pub mod resolver;
pub mod snapshot;

pub use config::LookupConfig;
pub use engine::SymbolLookup;
pub use enrich::{enrich, StaticFacts, SymbolFacts};
pub use error::{LookupError, Result};
pub use query::{parse_symbol_query, ParsedSymbolPath};
pub use resolver::{resolve_symbol, NearMatch, NearMatchKind, Resolution, ResolvedMatch};
pub use snapshot::{ChunkSnapshots, Snapshot, SnapshotSource};
