use serde::Serialize;
use symgraph_protocol::{CodeChunk, SymbolKey, SymbolMetadata};

/// One resolved and enriched symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphResultEntry {
    pub chunk: CodeChunk,
    pub metadata: SymbolMetadata,
}

impl GraphResultEntry {
    pub const fn new(chunk: CodeChunk, metadata: SymbolMetadata) -> Self {
        Self { chunk, metadata }
    }

    /// Graph identity, taken from the resolved symbol
    #[must_use]
    pub fn key(&self) -> SymbolKey {
        self.metadata.key()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.symbol.name
    }
}

/// What a node is in relation to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum NodeRole {
    /// Directly matched by the query (1-based position among results)
    Result { index: usize },
    /// Reached from two or more results
    SharedDependency,
    /// Reached from a single result
    Dependency,
}

impl NodeRole {
    #[must_use]
    pub const fn result_index(self) -> Option<usize> {
        match self {
            Self::Result { index } => Some(index),
            Self::SharedDependency | Self::Dependency => None,
        }
    }
}

/// Why traversal stopped below a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncation {
    Cycle,
    DepthLimit,
}

impl Truncation {
    /// Cycle wins when both flags are set.
    #[must_use]
    pub const fn from_flags(cyclic: bool, depth_limited: bool) -> Option<Self> {
        if cyclic {
            Some(Self::Cycle)
        } else if depth_limited {
            Some(Self::DepthLimit)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyNode {
    pub name: String,
    pub file_path: String,
    pub role: NodeRole,
}

impl TopologyNode {
    #[must_use]
    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(self.file_path.clone(), self.name.clone())
    }

    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(self.role, NodeRole::Result { .. })
    }

    #[must_use]
    pub const fn is_shared_dep(&self) -> bool {
        matches!(self.role, NodeRole::SharedDependency)
    }

    #[must_use]
    pub const fn result_index(&self) -> Option<usize> {
        self.role.result_index()
    }
}

/// A traversed call. Endpoints live in the graph; `root` is the result whose
/// walk produced the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopologyEdge {
    pub root: usize,
    pub truncation: Option<Truncation>,
}

impl TopologyEdge {
    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        matches!(self.truncation, Some(Truncation::Cycle))
    }

    #[must_use]
    pub const fn is_depth_limited(&self) -> bool {
        matches!(self.truncation, Some(Truncation::DepthLimit))
    }
}

/// Pre-formatted render record for the Graph section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLine {
    pub depth: usize,
    pub name: String,
    pub file_path: String,
    pub role: NodeRole,
    pub truncation: Option<Truncation>,
}

impl GraphLine {
    #[must_use]
    pub const fn result_index(&self) -> Option<usize> {
        self.role.result_index()
    }

    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(self.role, NodeRole::Result { .. })
    }

    #[must_use]
    pub const fn is_shared_dep(&self) -> bool {
        matches!(self.role, NodeRole::SharedDependency)
    }

    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        matches!(self.truncation, Some(Truncation::Cycle))
    }

    #[must_use]
    pub const fn is_depth_limited(&self) -> bool {
        matches!(self.truncation, Some(Truncation::DepthLimit))
    }
}

/// A result called by two or more other results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubPattern {
    pub result_index: usize,
    pub name: String,
    pub called_by: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedDepPattern {
    pub name: String,
    pub file_path: String,
    pub used_by: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedTypePattern {
    pub name: String,
    pub file_path: String,
    pub usage_count: usize,
    pub total_results: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiamondDirection {
    /// Both results eventually call the shared symbol
    Callees,
    /// Both results are eventually called from the shared symbol
    Callers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiamondPattern {
    pub results: (usize, usize),
    pub shared_symbol: SymbolKey,
    pub direction: DiamondDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Pattern {
    Hub(HubPattern),
    SharedDependency(SharedDepPattern),
    SharedType(SharedTypePattern),
    Diamond(DiamondPattern),
}
