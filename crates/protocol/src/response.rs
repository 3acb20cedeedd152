use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a lookup request.
///
/// Serialises as `{ "isSymbolLookup": false }` when the query was not a symbol
/// lookup, otherwise the response fields are flattened alongside the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupOutcome {
    pub is_symbol_lookup: bool,
    #[serde(flatten)]
    pub response: Option<LookupResponse>,
}

impl LookupOutcome {
    /// Routing signal: the caller should fall through to another search mode.
    #[must_use]
    pub const fn not_a_lookup() -> Self {
        Self {
            is_symbol_lookup: false,
            response: None,
        }
    }

    #[must_use]
    pub const fn lookup(response: LookupResponse) -> Self {
        Self {
            is_symbol_lookup: true,
            response: Some(response),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub found: bool,
    pub output: String,
    pub match_count: usize,
    pub file_count: usize,
    pub token_count: usize,
    pub hint: Option<String>,
}
