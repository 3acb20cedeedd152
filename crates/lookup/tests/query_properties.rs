use proptest::prelude::*;
use symgraph_lookup::parse_symbol_query;

proptest! {
    #[test]
    fn queries_without_prefix_are_not_lookups(query in "[a-zA-Z0-9 _.:/>-]{0,40}") {
        prop_assume!(!query.trim_start().to_lowercase().starts_with("symbol"));
        prop_assert!(parse_symbol_query(&query).is_none());
    }

    #[test]
    fn plain_identifiers_parse_to_themselves(name in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        let parsed = parse_symbol_query(&format!("symbol = {name}")).expect("lookup");
        prop_assert_eq!(parsed.symbol_name, name);
        prop_assert!(parsed.file_path.is_none());
        prop_assert!(parsed.parent_name.is_none());
    }

    #[test]
    fn file_scope_survives_parsing(
        dir in "[a-z]{1,8}",
        stem in "[a-z]{1,8}",
        name in "[A-Za-z_][A-Za-z0-9_]{0,12}",
    ) {
        let file = format!("{dir}/{stem}.rs");
        let parsed = parse_symbol_query(&format!("symbol = {file}::{name}")).expect("lookup");
        prop_assert_eq!(parsed.file_path.as_deref(), Some(file.as_str()));
        prop_assert_eq!(parsed.symbol_name, name);
    }
}
