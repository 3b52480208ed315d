use super::helpers::TestProject;
use serde_json::json;

const RULES: &str = r#"
text-only:
  - all: ["*.txt"]
module-a:
  - all:
      or: ["pkg/modules/a/**", "go.mod", "go.sum"]
has-text:
  - any: ["*.txt"]
no-docs:
  - all: ["!*.md"]
"#;

#[test]
fn test_check_reports_every_label() {
    let project = TestProject::new();
    project.write_rules(RULES);
    project.write_changed_files(&["foo.txt", "bar.txt"]);

    let report = project.run_json(&["check", "--files", "changed.txt", "--format", "json"]);

    assert_eq!(report["review_unit"], json!("changed.txt"));
    assert_eq!(report["changed_files"], json!(2));
    assert_eq!(
        report["evaluation"]["to_consider"],
        json!({"text-only": true, "module-a": false, "has-text": true, "no-docs": true})
    );
    assert_eq!(report["evaluation"]["to_add"], json!(["text-only", "has-text", "no-docs"]));
}

#[test]
fn test_check_module_rules() {
    let project = TestProject::new();
    project.write_rules(RULES);

    project.write_changed_files(&["pkg/modules/a/foo.txt", "go.mod"]);
    let report = project.run_json(&["check", "--files", "changed.txt", "--format", "json"]);
    assert_eq!(report["evaluation"]["to_consider"]["module-a"], json!(true));

    project.write_changed_files(&["pkg/modules/b/foo.txt", "go.mod"]);
    let report = project.run_json(&["check", "--files", "changed.txt", "--format", "json"]);
    assert_eq!(report["evaluation"]["to_consider"]["module-a"], json!(false));
}

#[test]
fn test_check_empty_change_set() {
    let project = TestProject::new();
    project.write_rules(RULES);
    project.write("changed.txt", "");

    let report = project.run_json(&["check", "--files", "changed.txt", "--format", "json"]);
    assert_eq!(report["evaluation"]["to_add"], json!(["text-only", "module-a", "no-docs"]));
    assert_eq!(report["evaluation"]["to_consider"]["has-text"], json!(false));
}

#[test]
fn test_table_output_is_default() {
    let project = TestProject::new();
    project.write_rules(RULES);
    project.write_changed_files(&["README.md"]);

    let output = project.run(&["check", "--files", "changed.txt"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Label Summary"));
}

#[test]
fn test_configuration_error_names_label() {
    let project = TestProject::new();
    project.write_rules("docs: docs/**\nbroken: 42\n");
    project.write_changed_files(&["docs/index.md"]);

    let output = project.run(&["check", "--files", "changed.txt"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken"));
}

#[test]
fn test_malformed_glob_fails_before_labelling() {
    let project = TestProject::new();
    project.write_rules("docs: docs/**\nbroken: \"src/{a,b\"\n");
    project.write_changed_files(&["docs/index.md"]);

    let output = project.run(&["apply", "--files", "changed.txt", "--unit", "pr-1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("src/{a,b"));
    assert!(!project.path().join(".labeler-state.json").exists());
}

#[test]
fn test_apply_and_sync_labels() {
    let project = TestProject::new();
    project.write_rules(RULES);

    project.write_changed_files(&["foo.txt", "go.mod"]);
    let report = project.run_json(&["apply", "--files", "changed.txt", "--unit", "pr-9", "--format", "json"]);
    assert_eq!(report["plan"]["add"], json!(["has-text", "no-docs"]));

    // Labels that stop matching stay without --sync-labels
    project.write_changed_files(&["README.md"]);
    let report = project.run_json(&["apply", "--files", "changed.txt", "--unit", "pr-9", "--format", "json"]);
    assert_eq!(report["plan"]["remove"], json!([]));
    assert_eq!(report["plan"]["all"], json!(["has-text", "no-docs"]));

    let report = project.run_json(&[
        "apply",
        "--files",
        "changed.txt",
        "--unit",
        "pr-9",
        "--sync-labels",
        "--format",
        "json",
    ]);
    assert_eq!(report["plan"]["remove"], json!(["has-text", "no-docs"]));

    let state: serde_json::Value = serde_json::from_str(&project.read(".labeler-state.json")).unwrap();
    assert_eq!(state["units"]["pr-9"], json!([]));
}

#[test]
fn test_apply_dry_run_leaves_store_alone() {
    let project = TestProject::new();
    project.write_rules(RULES);
    project.write_changed_files(&["foo.txt"]);

    let output = project.run(&["apply", "--files", "changed.txt", "--unit", "pr-2", "--dry-run"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Add: text-only"));
    assert!(!project.path().join(".labeler-state.json").exists());
}

#[test]
fn test_settings_file_is_honoured() {
    let project = TestProject::new();
    project.write("ci/labels.yml", "docs: \"docs/**\"\n");
    project.write("labeler.toml", "configuration_path = \"ci/labels.yml\"\nformat = \"json\"\n");
    project.write_changed_files(&["docs/guide.md"]);

    let report = project.run_json(&["check", "--files", "changed.txt"]);
    assert_eq!(report["evaluation"]["to_add"], json!(["docs"]));
}

#[test]
fn test_init_then_validate() {
    let project = TestProject::new();

    let init_output = project.run(&["init", "monorepo"]);
    assert!(init_output.status.success());
    assert!(project.read(".github/labeler.yml").contains("module-a"));

    // A second init must not clobber the file
    let again = project.run(&["init"]);
    assert!(!again.status.success());

    let validate_output = project.run(&["config", "--validate"]);
    assert!(validate_output.status.success());
    assert!(String::from_utf8_lossy(&validate_output.stdout).contains("Configuration is valid"));
}

#[test]
fn test_config_requires_a_flag() {
    let project = TestProject::new();
    let output = project.run(&["config"]);
    assert!(!output.status.success());

    let show = project.run_json(&["config", "--show"]);
    assert_eq!(show["sync_labels"], json!(false));
    assert_eq!(show["configuration_path"], json!(".github/labeler.yml"));
}

#[test]
fn test_source_is_required() {
    let project = TestProject::new();
    project.write_rules(RULES);
    let output = project.run(&["check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--files"));
}
