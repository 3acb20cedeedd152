//! Not-found messages shown instead of a connection map.

use crate::query::ParsedSymbolPath;
use crate::resolver::{NearMatch, NearMatchKind};

/// Message used when neither an exact match nor a suggestion exists
pub fn no_match_hint(path: &ParsedSymbolPath) -> String {
    format!("No symbol found matching \"{path}\".")
}

/// Suggestions from the case-insensitive fallback. Candidates that matched
/// exactly but were dropped by the kind filter are reported separately.
pub fn case_hint(path: &ParsedSymbolPath, hints: &[NearMatch], cap: usize) -> String {
    let (wrong_kind, wrong_case): (Vec<&NearMatch>, Vec<&NearMatch>) = hints
        .iter()
        .partition(|hint| hint.kind == NearMatchKind::KindMismatch);

    let mut out = format!("No exact match for \"{path}\".");
    if !wrong_kind.is_empty() {
        out.push_str(" The symbol exists with a different kind:");
        push_capped(&mut out, &wrong_kind, cap, candidate_line);
    }
    if !wrong_case.is_empty() {
        if !wrong_kind.is_empty() {
            out.push('\n');
        } else {
            out.push(' ');
        }
        out.push_str("Symbol names are case-sensitive; did you mean:");
        push_capped(&mut out, &wrong_case, cap, candidate_line);
    }
    out
}

fn candidate_line(hint: &NearMatch) -> String {
    if hint.node_kind.is_empty() {
        format!("{} ({})", hint.value, hint.location)
    } else {
        format!("{} ({}, {})", hint.value, hint.node_kind, hint.location)
    }
}

pub fn path_hint(path: &ParsedSymbolPath, hints: &[NearMatch], cap: usize) -> String {
    let requested = path.file_path.as_deref().unwrap_or_default();
    let mut out = format!("No file matches \"{requested}\". Similar paths:");
    let hints: Vec<&NearMatch> = hints.iter().collect();
    push_capped(&mut out, &hints, cap, |hint| hint.value.clone());
    out.push_str(&format!(
        "\nRetry with the full relative path, e.g. \"symbol = {}::{}\".",
        hints.first().map_or(requested, |hint| hint.value.as_str()),
        path.symbol_name
    ));
    out
}

fn push_capped(
    out: &mut String,
    hints: &[&NearMatch],
    cap: usize,
    line: impl Fn(&NearMatch) -> String,
) {
    let cap = cap.max(1);
    for hint in hints.iter().take(cap) {
        out.push_str("\n  - ");
        out.push_str(&line(*hint));
    }
    if hints.len() > cap {
        out.push_str(&format!("\n  … and {} more", hints.len() - cap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_symbol_query;

    fn near(value: &str, location: &str, kind: NearMatchKind) -> NearMatch {
        NearMatch {
            value: value.to_string(),
            location: location.to_string(),
            kind,
            node_kind: String::new(),
        }
    }

    #[test]
    fn case_hint_lists_suggestions_with_locations() {
        let path = parse_symbol_query("symbol = tokenservice").unwrap();
        let hints = [near("TokenService", "src/auth.ts:1", NearMatchKind::CaseMismatch)];
        let text = case_hint(&path, &hints, 10);
        assert!(text.contains("\"tokenservice\""));
        assert!(text.contains("  - TokenService (src/auth.ts:1)"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn kind_miss_names_the_actual_kind() {
        let path = parse_symbol_query("symbol = TokenService, kind = interface").unwrap();
        let hints = [
            NearMatch {
                node_kind: "class".to_string(),
                ..near("TokenService", "src/auth.ts:1", NearMatchKind::KindMismatch)
            },
            NearMatch {
                node_kind: "function".to_string(),
                ..near("tokenService", "src/di.ts:4", NearMatchKind::CaseMismatch)
            },
        ];
        let text = case_hint(&path, &hints, 10);
        assert_eq!(
            text,
            "No exact match for \"TokenService, kind = interface\". \
             The symbol exists with a different kind:\n  \
             - TokenService (class, src/auth.ts:1)\n\
             Symbol names are case-sensitive; did you mean:\n  \
             - tokenService (function, src/di.ts:4)"
        );
    }

    #[test]
    fn hints_are_capped() {
        let path = parse_symbol_query("symbol = x").unwrap();
        let hints: Vec<_> = (0..5)
            .map(|i| near(&format!("X{i}"), "a.ts:1", NearMatchKind::CaseMismatch))
            .collect();
        let text = case_hint(&path, &hints, 2);
        assert_eq!(text.matches("\n  - ").count(), 2);
        assert!(text.ends_with("… and 3 more"));
    }

    #[test]
    fn path_hint_suggests_retry() {
        let path = parse_symbol_query("symbol = auth.ts::login").unwrap();
        let hints = [
            near("lib/auth.ts", "lib/auth.ts", NearMatchKind::PartialPath),
            near("src/auth.ts", "src/auth.ts", NearMatchKind::PartialPath),
        ];
        let text = path_hint(&path, &hints, 10);
        assert!(text.starts_with("No file matches \"auth.ts\""));
        assert!(text.contains("  - src/auth.ts"));
        assert!(text.ends_with("\"symbol = lib/auth.ts::login\"."));
    }

    #[test]
    fn no_match_is_literal() {
        let path = parse_symbol_query("symbol = Missing").unwrap();
        assert_eq!(no_match_hint(&path), "No symbol found matching \"Missing\".");
    }
}
