use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a graph node: `(file_path, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolKey {
    pub file_path: String,
    pub name: String,
}

impl SymbolKey {
    pub fn new(file_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file_path, self.name)
    }
}

/// A symbol location as reported by the language service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRef {
    pub name: String,
    pub file_path: String,
    #[serde(default)]
    pub line: usize,
}

impl SymbolRef {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            line,
        }
    }

    #[must_use]
    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(self.file_path.clone(), self.name.clone())
    }
}

/// One node of an outgoing call tree.
///
/// `cyclic` and `depth_limited` are computed upstream by the call-hierarchy
/// resolver; a flagged call has no (meaningful) children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingCall {
    pub target: SymbolRef,
    #[serde(default)]
    pub call_site_lines: Vec<usize>,
    #[serde(default)]
    pub outgoing_calls: Vec<OutgoingCall>,
    #[serde(default)]
    pub cyclic: bool,
    #[serde(default)]
    pub depth_limited: bool,
}

impl OutgoingCall {
    pub fn to(target: SymbolRef) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Builder: nested calls made by the target
    #[must_use]
    pub fn calls(mut self, nested: Vec<OutgoingCall>) -> Self {
        self.outgoing_calls = nested;
        self
    }

    #[must_use]
    pub const fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    #[must_use]
    pub const fn depth_limited(mut self) -> Self {
        self.depth_limited = true;
        self
    }

    /// Whether traversal may descend into `outgoing_calls`
    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        !self.cyclic && !self.depth_limited
    }
}

/// One node of an incoming caller tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCaller {
    pub source: SymbolRef,
    #[serde(default)]
    pub call_site_lines: Vec<usize>,
    #[serde(default)]
    pub incoming_callers: Vec<IncomingCaller>,
    #[serde(default)]
    pub cyclic: bool,
    #[serde(default)]
    pub depth_limited: bool,
}

impl IncomingCaller {
    pub fn of(source: SymbolRef) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Builder: callers of the source
    #[must_use]
    pub fn callers(mut self, nested: Vec<IncomingCaller>) -> Self {
        self.incoming_callers = nested;
        self
    }

    #[must_use]
    pub const fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        !self.cyclic && !self.depth_limited
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHierarchy {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
}

impl TypeHierarchy {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extends.is_none() && self.implements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct References {
    pub file_count: usize,
}

/// A type resolved to its declaration site
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub name: String,
    pub file_path: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub resolved_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFlows {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<ReturnType>,
    #[serde(default)]
    pub referenced_types: Vec<TypeRef>,
}

/// Semantic facts about one resolved symbol.
///
/// Every optional field may be absent because the resolver that computes it
/// failed; consumers must treat absence as "unknown", not "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMetadata {
    pub symbol: SymbolRef,
    #[serde(default)]
    pub outgoing_calls: Vec<OutgoingCall>,
    #[serde(default)]
    pub incoming_callers: Vec<IncomingCaller>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub modifiers: Option<Vec<String>>,
    #[serde(default)]
    pub type_hierarchy: Option<TypeHierarchy>,
    #[serde(default)]
    pub members: Option<Vec<Member>>,
    #[serde(default)]
    pub references: Option<References>,
    #[serde(default)]
    pub type_flows: Option<TypeFlows>,
}

impl SymbolMetadata {
    pub fn new(symbol: SymbolRef) -> Self {
        Self {
            symbol,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn key(&self) -> SymbolKey {
        self.symbol.key()
    }
}
