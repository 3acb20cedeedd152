use anyhow::anyhow;
use pretty_assertions::assert_eq;
use std::path::Path;
use symgraph_lookup::{LookupConfig, Snapshot, SnapshotSource, StaticFacts, SymbolLookup};
use symgraph_protocol::{
    ChunkedFile, CodeChunk, LookupOutcome, LookupResponse, OutgoingCall, SymbolMetadata, SymbolRef,
};

fn workspace() -> Vec<ChunkedFile> {
    vec![
        ChunkedFile::new(
            "src/auth.ts",
            vec![
                CodeChunk::new("src/auth.ts", "TokenService", "class", 1, 40)
                    .breadcrumb("src/auth.ts > TokenService")
                    .source("export class TokenService {\n  validateToken() {}\n}\n"),
            ],
        ),
        ChunkedFile::new(
            "lib/auth.ts",
            vec![CodeChunk::new("lib/auth.ts", "login", "function", 3, 9)
                .source("export function login() {\n  return hashPassword();\n}\n")],
        ),
        ChunkedFile::new(
            "src/session.ts",
            vec![CodeChunk::new("src/session.ts", "login", "function", 12, 20)
                .source("function login() {\n  hashPassword();\n}\n")],
        ),
        ChunkedFile::new(
            "src/crypto.ts",
            vec![CodeChunk::new("src/crypto.ts", "hashPassword", "function", 1, 4)],
        ),
    ]
}

fn facts() -> StaticFacts {
    let hash = SymbolRef::new("hashPassword", "src/crypto.ts", 1);

    let mut service = SymbolMetadata::new(SymbolRef::new("TokenService", "src/auth.ts", 1));
    service.signature = Some("class TokenService".to_string());

    let mut lib_login = SymbolMetadata::new(SymbolRef::new("login", "lib/auth.ts", 3));
    lib_login.outgoing_calls = vec![OutgoingCall::to(hash.clone())];

    let mut session_login = SymbolMetadata::new(SymbolRef::new("login", "src/session.ts", 12));
    session_login.outgoing_calls = vec![OutgoingCall::to(hash)];

    StaticFacts::new([service, lib_login, session_login])
}

fn response(outcome: LookupOutcome) -> LookupResponse {
    assert!(outcome.is_symbol_lookup);
    outcome.response.expect("lookup response")
}

#[test]
fn exact_class_lookup_is_found() {
    let engine = SymbolLookup::new(facts());
    let resp = response(engine.lookup("symbol = TokenService", &workspace()).unwrap());

    assert!(resp.found);
    assert_eq!(resp.match_count, 1);
    assert_eq!(resp.file_count, 1);
    assert_eq!(resp.hint, None);
    assert!(resp.output.starts_with("TokenService — src/auth.ts:1-40"));
    assert!(resp.output.contains("Signature: class TokenService"));
    assert!(!resp.output.contains("Graph:"));
}

#[test]
fn wrong_case_suggests_the_real_name() {
    let engine = SymbolLookup::new(facts());
    let resp = response(engine.lookup("symbol = tokenservice", &workspace()).unwrap());

    assert!(!resp.found);
    assert_eq!(resp.match_count, 0);
    let hint = resp.hint.expect("case hint");
    assert!(hint.contains("TokenService"));
}

#[test]
fn kind_filter_miss_reports_the_actual_kind() {
    let engine = SymbolLookup::new(facts());
    let resp = response(
        engine
            .lookup("symbol = TokenService, kind = interface", &workspace())
            .unwrap(),
    );

    assert!(!resp.found);
    let hint = resp.hint.expect("kind hint");
    assert!(hint.starts_with("No exact match for \"TokenService, kind = interface\"."));
    assert!(hint.contains("different kind"));
    assert!(hint.contains("  - TokenService (class, src/auth.ts:1)"));
    assert!(!hint.contains("case-sensitive"));
}

#[test]
fn multiple_matches_render_a_connection_map() {
    let engine = SymbolLookup::new(facts()).with_config(LookupConfig::default().without_code());
    let resp = response(engine.lookup("symbol = login", &workspace()).unwrap());

    assert!(resp.found);
    assert_eq!(resp.match_count, 2);
    assert_eq!(resp.file_count, 2);
    assert!(resp
        .output
        .starts_with("Summary: 2 results for \"symbol = login\" across 2 files"));
    assert!(resp.output.contains("\n\nGraph:\n[1] login (lib/auth.ts)"));
    assert!(resp.output.contains("→ hashPassword (src/crypto.ts) ◆"));
    assert!(resp
        .output
        .contains("Shared dependency: hashPassword (src/crypto.ts) ◆ used by [1] login, [2] login"));
    assert!(resp
        .output
        .contains("Diamond: [1] login and [2] login both reach hashPassword (src/crypto.ts)"));
    assert!(resp.output.contains("[2] login — src/session.ts:12-20"));
}

struct FailsFor(&'static str);

impl SnapshotSource for FailsFor {
    fn generate_snapshot(
        &self,
        file: &ChunkedFile,
        targets: &[&CodeChunk],
        _workspace_root: &Path,
    ) -> anyhow::Result<Snapshot> {
        if file.relative_path == self.0 {
            return Err(anyhow!("snapshot service unavailable"));
        }
        Ok(Snapshot {
            snapshot: format!("// {} ({} chunks)", file.relative_path, targets.len()),
        })
    }
}

#[test]
fn failing_snapshot_drops_only_that_file() {
    let engine = SymbolLookup::new(facts()).with_snapshots(FailsFor("lib/auth.ts"));
    let resp = response(engine.lookup("symbol = login", &workspace()).unwrap());

    assert!(resp.found);
    let (_, code) = resp.output.split_once("--- Code ---").expect("code section");
    assert!(code.contains("// src/session.ts (1 chunks)"));
    assert!(!code.contains("lib/auth.ts"));
}

#[test]
fn unknown_file_filter_yields_path_hints_repeatably() {
    let engine = SymbolLookup::new(facts());
    let files = workspace();
    let first = response(engine.lookup("symbol = auth.ts::login", &files).unwrap());
    let second = response(engine.lookup("symbol = auth.ts::login", &files).unwrap());

    assert!(!first.found);
    let hint = first.hint.clone().expect("path hint");
    assert!(hint.contains("src/auth.ts"));
    assert!(hint.contains("lib/auth.ts"));
    assert_eq!(first, second);
}

#[test]
fn scoped_lookup_picks_one_file() {
    let engine = SymbolLookup::new(facts());
    let resp = response(
        engine
            .lookup("symbol = src/session.ts::login", &workspace())
            .unwrap(),
    );
    assert_eq!(resp.match_count, 1);
    assert!(resp.output.starts_with("login — src/session.ts:12-20"));
    assert!(resp.output.contains("Calls: hashPassword (src/crypto.ts)"));
}

#[test]
fn missing_symbol_reports_literal_message() {
    let engine = SymbolLookup::new(facts());
    let resp = response(engine.lookup("symbol = Nowhere", &workspace()).unwrap());
    assert!(!resp.found);
    assert_eq!(resp.hint.as_deref(), Some("No symbol found matching \"Nowhere\"."));
}
