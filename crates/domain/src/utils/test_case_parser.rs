//! Test case name parser.
//!
//! Test frameworks embed tracking ids directly in test names, e.g.
//! `"TestRail-123 Applause-456 Login works"`. This module extracts those
//! ids and returns the cleaned name alongside them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static APPLAUSE_CASE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Applause-(\d+)").expect("hard-coded regex compiles"));
static TEST_RAIL_CASE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"TestRail-(\d+)").expect("hard-coded regex compiles"));

/// A test case name after id extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTestCaseName {
    /// The test case name with all id tokens stripped.
    pub test_case_name: String,
    /// The TestRail case id, when the name carried one.
    pub test_rail_case_id: Option<u64>,
    /// The Applause case id, when the name carried one.
    pub applause_case_id: Option<u64>,
}

/// Parse a test case name, extracting embedded `Applause-<id>` and
/// `TestRail-<id>` tokens.
///
/// If a token family appears more than once, the first occurrence in scan
/// order supplies the id and a warning is logged; every occurrence is still
/// stripped from the name. Applause tokens are stripped before TestRail
/// tokens. Absence of either token is the normal case, not an error.
pub fn parse_test_case_name(test_case_name: &str) -> ParsedTestCaseName {
    let mut name = test_case_name.trim().to_string();

    let (applause_case_id, stripped) = extract_case_ids(&name, &APPLAUSE_CASE_ID, "Applause");
    name = stripped;
    let (test_rail_case_id, stripped) = extract_case_ids(&name, &TEST_RAIL_CASE_ID, "TestRail");
    name = stripped;

    ParsedTestCaseName { test_case_name: name, test_rail_case_id, applause_case_id }
}

/// Capture the first id matched by `pattern`, strip all matches, re-trim.
fn extract_case_ids(name: &str, pattern: &Regex, family: &str) -> (Option<u64>, String) {
    let ids: Vec<u64> = pattern
        .captures_iter(name)
        .filter_map(|captures| captures.get(1))
        .filter_map(|digits| digits.as_str().parse().ok())
        .collect();

    if ids.len() > 1 {
        warn!(name, "Multiple {family} case ids detected in test case name");
    }

    let stripped = pattern.replace_all(name, "").trim().to_string();
    (ids.first().copied(), stripped)
}
