//! `symbol = <path>[, kind = <kind>]` query grammar.
//!
//! Accepted paths: `name`, `parent.name`, `file::name`, `file::parent.name`,
//! `parent > name`, `file > parent > name`.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Structured form of a symbol lookup query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSymbolPath {
    pub file_path: Option<String>,
    pub parent_name: Option<String>,
    pub symbol_name: String,
    pub symbol_kind: Option<String>,
}

impl fmt::Display for ParsedSymbolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file_path {
            write!(f, "{file}::")?;
        }
        if let Some(parent) = &self.parent_name {
            write!(f, "{parent}.")?;
        }
        f.write_str(&self.symbol_name)?;
        if let Some(kind) = &self.symbol_kind {
            write!(f, ", kind = {kind}")?;
        }
        Ok(())
    }
}

fn lookup_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*symbol\s*=\s*").expect("lookup prefix regex"))
}

fn kind_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i),\s*kind\s*=\s*(\w+)\s*$").expect("kind suffix regex"))
}

/// Parse a lookup query.
///
/// Returns `None` when the text is not a symbol lookup at all (no
/// `symbol =` prefix, or nothing usable after it); callers route such
/// queries to another search mode.
#[must_use]
pub fn parse_symbol_query(query: &str) -> Option<ParsedSymbolPath> {
    let prefix = lookup_prefix().find(query)?;
    let rest = query[prefix.end()..].trim();
    if rest.is_empty() {
        return None;
    }

    let (path, kind) = match kind_suffix().captures(rest) {
        Some(caps) => {
            let start = caps.get(0).map_or(rest.len(), |m| m.start());
            let kind = caps.get(1).map(|m| m.as_str().to_lowercase());
            (rest[..start].trim(), kind)
        }
        None => (rest, None),
    };
    if path.is_empty() {
        return None;
    }

    let mut parsed = parse_path(path)?;
    parsed.symbol_kind = kind;
    Some(parsed)
}

fn parse_path(path: &str) -> Option<ParsedSymbolPath> {
    if let Some((file, symbol)) = path.split_once("::") {
        let mut parsed = parse_dotted(symbol)?;
        parsed.file_path = non_empty(file);
        return Some(parsed);
    }

    if path.contains(" > ") {
        let segments: Vec<&str> = path
            .split(" > ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let (name, scope) = segments.split_last()?;
        let (file, parents) = match scope.split_first() {
            Some((first, rest)) if looks_like_file(first) => (Some(*first), rest),
            _ => (None, scope),
        };
        return Some(ParsedSymbolPath {
            file_path: file.map(str::to_string),
            parent_name: (!parents.is_empty()).then(|| parents.join(".")),
            symbol_name: (*name).to_string(),
            symbol_kind: None,
        });
    }

    parse_dotted(path)
}

/// `parent.chain.name` split on the last dot
fn parse_dotted(expr: &str) -> Option<ParsedSymbolPath> {
    let expr = expr.trim();
    let (parent, name) = match expr.rsplit_once('.') {
        Some((parent, name)) => (non_empty(parent), name.trim()),
        None => (None, expr),
    };
    if name.is_empty() {
        return None;
    }
    Some(ParsedSymbolPath {
        file_path: None,
        parent_name: parent,
        symbol_name: name.to_string(),
        symbol_kind: None,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn has_file_extension(token: &str) -> bool {
    let Some((stem, ext)) = token.trim().rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() || ext.is_empty() || ext.len() > 6 {
        return false;
    }
    ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn looks_like_file(segment: &str) -> bool {
    has_file_extension(segment) || segment.contains('/') || segment.contains('\\')
}
