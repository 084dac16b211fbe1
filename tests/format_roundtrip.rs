//! End-to-end tests across the registry, format handlers and the scripted
//! prompt driver: messages built by the interactive builders must validate
//! under the same configuration they were built with.

use commit_lint::config::FormatConfig;
use commit_lint::format::{FormatRegistry, ValidationResult};
use commit_lint::prompt::{ScriptedAnswer, ScriptedPrompt};
use proptest::prelude::*;

fn conventional_config(types: &[&str]) -> FormatConfig {
    FormatConfig {
        types: types.iter().map(ToString::to_string).collect(),
        ..FormatConfig::default()
    }
}

#[test]
fn conventional_scenario_simple_feature() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        types: vec!["feat".to_string(), "fix".to_string()],
        max_subject_length: Some(100),
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    match format.validate("feat: add new capability") {
        ValidationResult::Conventional(result) => {
            assert!(result.valid);
            assert_eq!(result.commit_type.as_deref(), Some("feat"));
            assert_eq!(result.description.as_deref(), Some("add new capability"));
        }
        other => panic!("unexpected result variant: {other:?}"),
    }
}

#[test]
fn conventional_scenario_breaking_change() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        types: vec!["feat".to_string()],
        allowed_breaking_changes: vec!["feat".to_string()],
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    match format.validate("feat!: change api\n\nBREAKING CHANGE: removes old endpoint") {
        ValidationResult::Conventional(result) => {
            assert!(result.valid, "errors: {:?}", result.errors);
            assert!(result.breaking);
        }
        other => panic!("unexpected result variant: {other:?}"),
    }
}

#[test]
fn github_scenario_non_imperative_subject() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        format_type: "github".to_string(),
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    let result = format.validate("Added new feature");
    assert!(!result.is_valid());
    assert!(result
        .errors()
        .iter()
        .any(|e| e.contains("imperative mood")));
}

#[test]
fn jira_scenario_allowed_and_unlisted_project_keys() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        format_type: "jira".to_string(),
        jira_project_keys: vec!["PROJ".to_string()],
        require_issue_id: true,
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    match format.validate("PROJ-123: fix login bug") {
        ValidationResult::Jira(result) => {
            assert!(result.valid);
            assert_eq!(result.issue_id.as_deref(), Some("PROJ-123"));
            assert_eq!(result.message.as_deref(), Some("fix login bug"));
        }
        other => panic!("unexpected result variant: {other:?}"),
    }

    let result = format.validate("INVALID-1: x");
    assert!(!result.is_valid());
    assert!(result
        .errors()
        .iter()
        .any(|e| e.contains("must start with a Jira issue ID")));
}

#[test]
fn custom_scenario_bracketed_category() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        format_type: "custom".to_string(),
        custom_pattern: Some(r"^\[(?P<category>\w+)\] (?P<message>.+)$".to_string()),
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    match format.validate("[FEATURE] add capability") {
        ValidationResult::Custom(result) => {
            assert!(result.valid);
            assert_eq!(
                result.matches.get("category").map(String::as_str),
                Some("FEATURE")
            );
            assert_eq!(
                result.matches.get("message").map(String::as_str),
                Some("add capability")
            );
        }
        other => panic!("unexpected result variant: {other:?}"),
    }

    assert!(!format.validate("no brackets").is_valid());
}

#[test]
fn conventional_round_trip_through_builder() {
    let registry = FormatRegistry::builtin();
    let config = conventional_config(&["feat", "fix"]);
    let format = registry.get(&config).unwrap();

    let mut io = ScriptedPrompt::new(vec![
        ScriptedAnswer::choice("feat"),
        ScriptedAnswer::text("api"),
        ScriptedAnswer::Confirm(true), // breaking
        ScriptedAnswer::text("removes old endpoint"),
        ScriptedAnswer::text("change api"),
        ScriptedAnswer::Confirm(true),
        ScriptedAnswer::multiline("motivation and details"),
    ]);

    let message = format.prompt_for_message(&config, &mut io).unwrap();
    assert_eq!(
        message,
        "feat(api)!: change api\n\nmotivation and details\n\nBREAKING CHANGE: removes old endpoint"
    );

    let result = format.validate(&message);
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert!(io.is_exhausted());
}

#[test]
fn github_round_trip_through_builder() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        format_type: "github".to_string(),
        issue_reference_required: true,
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    let mut io = ScriptedPrompt::new(vec![
        ScriptedAnswer::text("Add retry logic to uploads"),
        ScriptedAnswer::Confirm(true),
        ScriptedAnswer::multiline("Uploads now retry three times with backoff."),
        ScriptedAnswer::choice("Fixes"),
        ScriptedAnswer::text("321"),
    ]);

    let message = format.prompt_for_message(&config, &mut io).unwrap();
    let result = format.validate(&message);
    assert!(result.is_valid(), "errors: {:?}", result.errors());

    match result {
        ValidationResult::Github(github) => {
            assert_eq!(github.issue_reference.as_deref(), Some("321"));
            assert_eq!(github.issue_keyword.as_deref(), Some("Fixes"));
        }
        other => panic!("unexpected result variant: {other:?}"),
    }
}

#[test]
fn jira_round_trip_through_builder() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        format_type: "jira".to_string(),
        jira_project_keys: vec!["PROJ".to_string(), "OPS".to_string()],
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    let mut io = ScriptedPrompt::new(vec![
        ScriptedAnswer::choice("OPS"),
        ScriptedAnswer::text("88"),
        ScriptedAnswer::text("rotate signing keys"),
        ScriptedAnswer::Confirm(true),
        ScriptedAnswer::multiline("Old keys expire at the end of the month."),
    ]);

    let message = format.prompt_for_message(&config, &mut io).unwrap();
    assert_eq!(
        message,
        "OPS-88: rotate signing keys\n\nOld keys expire at the end of the month."
    );
    assert!(format.validate(&message).is_valid());
}

#[test]
fn validation_result_survives_json_round_trip() {
    let registry = FormatRegistry::builtin();
    let config = conventional_config(&["feat"]);
    let format = registry.get(&config).unwrap();

    for message in ["feat: add new capability", "docs: not allowed here"] {
        let result = format.validate(message);
        let rendered = serde_json::to_string(&result).unwrap();
        let parsed: ValidationResult = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, result);
    }
}

#[test]
fn subject_length_boundary_is_exact() {
    let registry = FormatRegistry::builtin();
    let config = FormatConfig {
        types: vec!["feat".to_string()],
        max_subject_length: Some(30),
        ..FormatConfig::default()
    };
    let format = registry.get(&config).unwrap();

    // "feat: " contributes 6 characters.
    let at_limit = format!("feat: {}", "x".repeat(24));
    assert!(format.validate(&at_limit).is_valid());

    let over = format!("feat: {}", "x".repeat(25));
    let result = format.validate(&over);
    assert!(!result.is_valid());
    assert!(result
        .errors()
        .iter()
        .any(|e| e.contains("31") && e.contains("30")));
}

proptest! {
    // Any configured type with a lowercase, period-free description within
    // the length limit validates.
    #[test]
    fn conventional_accepts_all_configured_types(
        type_index in 0usize..4,
        description in "[a-z][a-z ]{0,60}[a-z]",
    ) {
        let types = ["feat", "fix", "docs", "chore"];
        let registry = FormatRegistry::builtin();
        let config = conventional_config(&types);
        let format = registry.get(&config).unwrap();

        let message = format!("{}: {description}", types[type_index]);
        let result = format.validate(&message);
        prop_assert!(result.is_valid(), "errors: {:?}", result.errors());
    }

    // Unknown types are always reported, naming the offender.
    #[test]
    fn conventional_rejects_unlisted_types(
        unlisted_type in "[a-z]{3,10}",
        description in "[a-z]{1,20}",
    ) {
        let types = ["feat", "fix"];
        prop_assume!(!types.contains(&unlisted_type.as_str()));

        let registry = FormatRegistry::builtin();
        let config = conventional_config(&types);
        let format = registry.get(&config).unwrap();

        let message = format!("{unlisted_type}: {description}");
        let result = format.validate(&message);
        prop_assert!(!result.is_valid());
        prop_assert!(result.errors().iter().any(|e| e.contains(&unlisted_type)));
    }

    // Two handlers constructed from the same configuration agree on every
    // input, including arbitrary garbage.
    #[test]
    fn validation_is_deterministic_across_instances(message in ".{0,120}") {
        let registry = FormatRegistry::builtin();
        let config = conventional_config(&["feat", "fix"]);

        let first = registry.get(&config).unwrap();
        let second = registry.get(&config).unwrap();
        prop_assert_eq!(first.validate(&message), second.validate(&message));
    }
}
