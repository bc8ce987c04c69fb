//! Integration tests for pattern interpolation behavior.

use std::collections::HashMap;

use inflex::{LocaleDatabase, ModeFlags, interpolate_template, parse_template, tokens};

/// gender tokens m/f/n, no default registered.
fn gender_db() -> LocaleDatabase {
    let mut db = LocaleDatabase::new();
    let loose = db.loose_mut();
    loose.add_token("m", "gender", "male");
    loose.add_token("f", "gender", "female");
    loose.add_token("n", "gender", "neuter");
    db
}

/// gender tokens m/f/n with default n.
fn gender_db_with_default() -> LocaleDatabase {
    let mut db = gender_db();
    db.loose_mut().set_default_token("gender", "n");
    db
}

fn run(db: &LocaleDatabase, text: &str, values: HashMap<String, String>) -> String {
    run_flags(db, text, values, ModeFlags::default())
}

fn run_flags(
    db: &LocaleDatabase,
    text: &str,
    values: HashMap<String, String>,
    flags: ModeFlags,
) -> String {
    interpolate_template(&parse_template(text), db, &values, flags).unwrap()
}

// =========================================================================
// Basic matching
// =========================================================================

#[test]
fn option_selects_matching_group() {
    let db = gender_db();
    let out = run(&db, "Dear @{m:Sir|f:Madam|All}!", tokens! { "gender" => "m" });
    assert_eq!(out, "Dear Sir!");
}

#[test]
fn first_matching_group_wins() {
    let db = gender_db();
    let out = run(&db, "@{m:first|m:second|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "first");
}

#[test]
fn unmatched_option_falls_to_free_text() {
    let db = gender_db();
    let out = run(&db, "@{m:Sir|f:Madam|All}", tokens! { "gender" => "n" });
    assert_eq!(out, "All");
}

#[test]
fn literal_text_around_patterns_is_preserved() {
    let db = gender_db();
    let out = run(
        &db,
        "a @{m:He|f:She} b @{m:him|f:her} c",
        tokens! { "gender" => "f" },
    );
    assert_eq!(out, "a She b her c");
}

#[test]
fn comma_group_matches_any_listed_token() {
    let db = gender_db();
    let out = run(&db, "@{f,m:Someone|n:You|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "Someone");
}

#[test]
fn no_match_without_free_text_yields_empty_string() {
    let db = gender_db();
    // option supplied but invalid, no default, no free text
    let out = run(&db, "@{f:Lady|m:Sir}", tokens! { "gender" => "x" });
    assert_eq!(out, "");
}

#[test]
fn pattern_without_tokens_is_free_text_only() {
    let db = gender_db();
    let out = run(&db, "@{Hello}", tokens! {});
    assert_eq!(out, "Hello");
}

// =========================================================================
// Negation
// =========================================================================

#[test]
fn negated_group_matches_other_tokens() {
    let db = gender_db();
    let out = run(
        &db,
        "@{!m:Lady|m:Sir|n:You|All}",
        tokens! { "gender" => "n" },
    );
    assert_eq!(out, "Lady");
}

#[test]
fn negated_group_skips_its_own_token() {
    let db = gender_db();
    let out = run(
        &db,
        "@{!m:Lady|m:Sir|n:You|All}",
        tokens! { "gender" => "m" },
    );
    assert_eq!(out, "Sir");
}

#[test]
fn negated_group_matches_missing_option() {
    // no option, no default registered: the effective option is "none",
    // which is not m, so the negated group matches
    let db = gender_db();
    let out = run(&db, "@{!m:Lady|m:Sir|n:You|All}", tokens! {});
    assert_eq!(out, "Lady");
}

#[test]
fn two_negated_tokens_never_match() {
    let db = gender_db();
    let out = run(&db, "@{!m,!f:Nobody|All}", tokens! { "gender" => "n" });
    assert_eq!(out, "All");
}

// =========================================================================
// Defaults and unknown_defaults
// =========================================================================

#[test]
fn unknown_option_falls_back_to_default_token() {
    let db = gender_db_with_default();
    let out = run(
        &db,
        "@{f:Lady|m:Sir|n:You|All}",
        tokens! { "gender" => "unknown" },
    );
    assert_eq!(out, "You");
}

#[test]
fn missing_option_falls_back_to_default_token() {
    let db = gender_db_with_default();
    let out = run(&db, "@{f:Lady|m:Sir|n:You|All}", tokens! {});
    assert_eq!(out, "You");
}

#[test]
fn empty_option_value_counts_as_missing() {
    let db = gender_db_with_default();
    let out = run(&db, "@{f:Lady|m:Sir|n:You|All}", tokens! { "gender" => "" });
    assert_eq!(out, "You");
}

#[test]
fn unknown_defaults_disabled_skips_default_fallback() {
    let db = gender_db_with_default();
    let flags = ModeFlags::builder().unknown_defaults(false).build();
    let out = run_flags(
        &db,
        "@{f:Lady|m:Sir|n:You|All}",
        tokens! { "gender" => "unknown" },
        flags,
    );
    assert_eq!(out, "All");
}

#[test]
fn default_registered_as_alias_resolves_for_matching() {
    let mut db = gender_db();
    db.loose_mut().add_alias("neuter", "n", None);
    db.loose_mut().set_default_token("gender", "neuter");
    let out = run(&db, "@{n:You|All}", tokens! {});
    assert_eq!(out, "You");
}

// =========================================================================
// excluded_defaults
// =========================================================================

#[test]
fn excluded_defaults_substitutes_default_group_value() {
    let db = gender_db_with_default();
    let flags = ModeFlags::builder().excluded_defaults(true).build();
    // f names a known token but no group lists it: act as if the default
    // token n had been chosen
    let out = run_flags(&db, "@{m:Sir|n:You|All}", tokens! { "gender" => "f" }, flags);
    assert_eq!(out, "You");
}

#[test]
fn excluded_defaults_disabled_prefers_free_text() {
    let db = gender_db_with_default();
    let out = run(&db, "@{m:Sir|n:You|All}", tokens! { "gender" => "f" });
    assert_eq!(out, "All");
}

#[test]
fn excluded_defaults_needs_a_valid_requested_option() {
    let db = gender_db_with_default();
    let flags = ModeFlags::builder()
        .excluded_defaults(true)
        .unknown_defaults(false)
        .build();
    // the requested option names no known token, so the substitution does
    // not apply and free text wins
    let out = run_flags(&db, "@{m:Sir|n:You|All}", tokens! { "gender" => "x" }, flags);
    assert_eq!(out, "All");
}

#[test]
fn excluded_defaults_without_default_group_falls_to_free_text() {
    let db = gender_db_with_default();
    let flags = ModeFlags::builder().excluded_defaults(true).build();
    let out = run_flags(&db, "@{m:Sir|All}", tokens! { "gender" => "f" }, flags);
    assert_eq!(out, "All");
}

#[test]
fn excluded_defaults_without_free_text_yields_empty_when_unapplicable() {
    let db = gender_db();
    let flags = ModeFlags::builder().excluded_defaults(true).build();
    // no default token registered at all
    let out = run_flags(&db, "@{m:Sir|n:You}", tokens! { "gender" => "f" }, flags);
    assert_eq!(out, "");
}

// =========================================================================
// Loud marker and escapes
// =========================================================================

#[test]
fn loud_marker_substitutes_description() {
    let db = gender_db();
    let out = run(&db, "You are @{m:~|f:~|All}.", tokens! { "gender" => "f" });
    assert_eq!(out, "You are female.");
}

#[test]
fn escaped_loud_marker_is_literal() {
    let db = gender_db();
    let out = run(&db, r"@{m:\~|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "~");
}

#[test]
fn leading_escape_strips_one_level() {
    let db = gender_db();
    let out = run(&db, r"@{m:\\x|All}", tokens! { "gender" => "m" });
    assert_eq!(out, r"\x");
}

#[test]
fn escaped_pattern_is_emitted_verbatim() {
    let db = gender_db();
    assert_eq!(
        run(&db, "@@{f:A|m:B}", tokens! { "gender" => "m" }),
        "@{f:A|m:B}"
    );
    assert_eq!(
        run(&db, r"\@{f:A|m:B}", tokens! { "gender" => "m" }),
        "@{f:A|m:B}"
    );
}

#[test]
fn percent_brace_markers_pass_through() {
    let db = gender_db();
    let out = run(
        &db,
        "@{m:%{name} is male|f:%{name} is female|All}",
        tokens! { "gender" => "m" },
    );
    assert_eq!(out, "%{name} is male");
}

// =========================================================================
// Named patterns and strict namespaces
// =========================================================================

/// Strict gender namespace with tokens m/f and default f.
fn strict_db() -> LocaleDatabase {
    let mut db = LocaleDatabase::new();
    let strict = db.strict_mut();
    strict.add_token("m", "gender", "male");
    strict.add_token("f", "gender", "female");
    strict.set_default_token("gender", "f");
    db
}

#[test]
fn named_pattern_resolves_against_strict_namespace() {
    let db = strict_db();
    let out = run(&db, "@gender{m:Sir|f:Madam}", tokens! { "gender" => "m" });
    assert_eq!(out, "Sir");
}

#[test]
fn strict_option_key_beats_plain_key_on_named_pattern() {
    let db = strict_db();
    let out = run(
        &db,
        "@gender{m:Sir|f:Madam}",
        tokens! { "gender" => "f", "@gender" => "m" },
    );
    assert_eq!(out, "Sir");
}

#[test]
fn named_pattern_ignores_loose_tokens() {
    // tokens only in the loose store are invisible to a named pattern
    let db = gender_db();
    let out = run(&db, "@gender{m:Sir|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "All");
}

#[test]
fn unnamed_pattern_ignores_strict_tokens() {
    let db = strict_db();
    let out = run(&db, "@{m:Sir|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "All");
}

#[test]
fn named_pattern_uses_strict_default() {
    let db = strict_db();
    let out = run(&db, "@gender{m:Sir|f:Madam}", tokens! {});
    assert_eq!(out, "Madam");
}

#[test]
fn unnamed_pattern_reads_strict_key_when_plain_absent() {
    let db = gender_db();
    let out = run(&db, "@{m:Sir|f:Madam|All}", tokens! { "@gender" => "f" });
    assert_eq!(out, "Madam");
}

// =========================================================================
// Aliases in patterns and options
// =========================================================================

fn alias_db() -> LocaleDatabase {
    let mut db = gender_db();
    db.loose_mut().add_alias("masculine", "m", None);
    db
}

#[test]
fn option_value_may_be_an_alias() {
    // option-side aliases always resolve, independent of aliased_patterns
    let db = alias_db();
    let out = run(&db, "@{m:Sir|All}", tokens! { "gender" => "masculine" });
    assert_eq!(out, "Sir");
}

#[test]
fn pattern_alias_does_not_match_without_aliased_patterns() {
    let db = alias_db();
    let out = run(&db, "@{masculine:Sir|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "All");
}

#[test]
fn pattern_alias_matches_with_aliased_patterns() {
    let db = alias_db();
    let flags = ModeFlags::builder().aliased_patterns(true).build();
    let out = run_flags(
        &db,
        "@{masculine:Sir|All}",
        tokens! { "gender" => "m" },
        flags,
    );
    assert_eq!(out, "Sir");
}

// =========================================================================
// Degraded conditions without raises
// =========================================================================

#[test]
fn unknown_pattern_token_is_skipped_silently() {
    let db = gender_db();
    let out = run(&db, "@{ghost:Boo|m:Sir|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "Sir");
}

#[test]
fn misplaced_token_is_skipped_silently() {
    let mut db = gender_db();
    db.loose_mut().add_token("s", "number", "singular");
    // the pattern binds to gender via m; the s group can never match
    let out = run(&db, "@{m:A|s:B|All}", tokens! { "number" => "s" });
    assert_eq!(out, "All");
}

#[test]
fn empty_database_degrades_to_free_text() {
    let db = LocaleDatabase::new();
    let out = run(&db, "@{m:Sir|All}", tokens! { "gender" => "m" });
    assert_eq!(out, "All");
}
