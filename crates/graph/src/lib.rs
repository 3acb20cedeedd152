//! # Symgraph Graph
//!
//! Connection maps for a set of matched symbols: how they call each other,
//! what they depend on together, and which structural patterns show up.
//!
//! ## Architecture
//!
//! ```text
//! GraphResultEntry[] (chunk + resolved metadata)
//!     │
//!     ├──> Topology (petgraph)
//!     │      ├─ Nodes: results (pre-seeded) + callees (lazy)
//!     │      ├─ Edges: one per traversed call, tagged with the walking root
//!     │      └─ Lines: depth-annotated render records
//!     │
//!     ├──> Pattern detection
//!     │      ├─ Hubs (results called by ≥2 results)
//!     │      ├─ Shared dependencies / shared types
//!     │      └─ Diamonds (converging call trees)
//!     │
//!     └──> Rendering
//!            ├─ single result: compact card
//!            └─ many results: Summary, Graph, Patterns, Details
//! ```

mod connection;
mod error;
mod patterns;
mod render;
mod topology;
mod traverse;
mod types;

pub use connection::{generate_connection_graph, ConnectionGraphResult};
pub use error::{GraphError, Result};
pub use patterns::detect_patterns;
pub use render::{render_multi, render_single};
pub use topology::Topology;
pub use types::{
    DiamondDirection, DiamondPattern, GraphLine, GraphResultEntry, HubPattern, NodeRole,
    Pattern, SharedDepPattern, SharedTypePattern, TopologyEdge, TopologyNode, Truncation,
};

#[cfg(test)]
pub(crate) mod test_support;
