//! Integration tests for the kind-namespaced strict store.

use inflex::StrictStore;

fn two_kind_store() -> StrictStore {
    let mut store = StrictStore::new();
    store.add_token("m", "gender", "male");
    store.add_token("f", "gender", "female");
    store.add_token("s", "number", "singular");
    store.add_token("p", "number", "plural");
    store
}

// =========================================================================
// Kind-scoped identity
// =========================================================================

#[test]
fn same_name_under_different_kinds_is_distinct() {
    let mut store = StrictStore::new();
    store.add_token("x", "gender", "gender x");
    store.add_token("x", "number", "number x");

    assert_eq!(store.description("x", "gender"), Some("gender x"));
    assert_eq!(store.description("x", "number"), Some("number x"));
    assert_eq!(store.len(), 2);
}

#[test]
fn tokens_are_invisible_outside_their_kind() {
    let store = two_kind_store();
    assert!(store.has_token("m", "gender"));
    assert!(!store.has_token("m", "number"));
    assert_eq!(store.true_token("m", "number"), None);
    assert_eq!(store.description("m", "number"), None);
}

#[test]
fn kinds_lists_populated_namespaces_sorted() {
    let store = two_kind_store();
    assert_eq!(store.kinds(), vec!["gender", "number"]);
    assert!(store.has_kind("gender"));
    assert!(!store.has_kind("case"));
}

#[test]
fn store_exposes_kind_scoped_sub_database() {
    let store = two_kind_store();
    let sub = store.store("gender").unwrap();
    assert!(sub.has_token("m", Some("gender")));
    assert!(!sub.has_token("s", None));
    assert!(store.store("case").is_none());
}

// =========================================================================
// Aliases and defaults
// =========================================================================

#[test]
fn alias_stays_within_its_kind_namespace() {
    let mut store = two_kind_store();
    assert!(store.add_alias("masculine", "m", "gender"));
    assert_eq!(store.true_token("masculine", "gender"), Some("m"));
    assert!(store.has_alias("masculine", "gender"));
    assert!(!store.has_alias("masculine", "number"));
}

#[test]
fn alias_to_token_of_other_kind_fails() {
    let mut store = two_kind_store();
    // "s" lives in the number namespace, invisible from gender
    assert!(!store.add_alias("sing", "s", "gender"));
    assert!(!store.add_alias("sing", "s", "case"));
}

#[test]
fn defaults_are_per_kind() {
    let mut store = two_kind_store();
    store.set_default_token("gender", "f");
    store.set_default_token("number", "s");

    assert_eq!(store.default_token("gender"), Some("f"));
    assert_eq!(store.default_token("number"), Some("s"));
    assert!(store.has_default_token("gender"));
    assert!(!store.has_default_token("case"));
}

#[test]
fn validate_defaults_covers_every_namespace() {
    let mut store = two_kind_store();
    store.set_default_token("gender", "f");
    store.set_default_token("number", "ghost");

    let err = store.validate_defaults().unwrap_err();
    assert_eq!(err.kind, "number");
    assert_eq!(err.target, "ghost");
}

// =========================================================================
// Bulk readers
// =========================================================================

#[test]
fn bulk_readers_scope_by_kind() {
    let mut store = two_kind_store();
    store.add_alias("masculine", "m", "gender");

    assert_eq!(store.tokens("gender").len(), 3);
    assert_eq!(store.true_tokens("gender").len(), 2);
    assert_eq!(store.aliases("gender").len(), 1);
    assert_eq!(store.raw_tokens("number").len(), 2);
    assert!(store.tokens("case").is_empty());
}

#[test]
fn empty_store_reports_empty() {
    let store = StrictStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.kinds().is_empty());
}
