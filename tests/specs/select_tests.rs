//! Behavioral specs for `retest select-tests`.

use crate::prelude::*;

fn touch_foo(temp: &Project) {
    temp.file(
        "core/src/main/java/core/Foo.java",
        "package core;\n\npublic class Foo {\n    int x;\n}\n",
    );
}

#[test]
fn affected_suite_is_selected() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    touch_foo(&temp);
    git_commit(&temp, "feat: foo field");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"])
        .passes()
        .stdout_has("core.FooTest  AFFECTED (core.Foo)")
        .stdout_lacks("app.AppTest")
        .stdout_has("1 selected, 1 excluded, 1 change\n");
}

#[test]
fn selection_files_are_written() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    touch_foo(&temp);
    git_commit(&temp, "feat: foo field");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"]).passes();

    assert_eq!(
        temp.read("target/.retest/tests/included.txt"),
        "core.FooTest\n**/PackageDependencyTest*"
    );
    assert_eq!(temp.read("target/.retest/tests/modules.txt"), "core/pom.xml");
}

#[test]
fn label_flag_overrides_config() {
    let temp = Project::reactor();
    temp.config("[output]\ndir = \"out\"\nlabel = \"nightly\"\n");
    git_commit(&temp, "chore: config");
    git_branch(&temp, "feature");
    touch_foo(&temp);
    git_commit(&temp, "feat: foo field");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"]).passes();
    assert!(temp.path().join("out/nightly/included.txt").exists());

    retest(
        &temp,
        &["select-tests", "--from", "main", "--report", "report.json", "--label", "pr"],
    )
    .passes();
    assert!(temp.path().join("out/pr/included.txt").exists());
}

#[test]
fn nothing_selected_writes_empty_included_list() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("docs/notes.md", "notes\n");
    git_commit(&temp, "docs: notes");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"])
        .passes()
        .stdout_eq("0 selected, 2 excluded, 1 change\n");
    assert_eq!(temp.read("target/.retest/tests/included.txt"), "");
}

#[test]
fn opened_resource_selects_suite() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("app/src/test/resources/greeting.txt", "hi\n");
    git_commit(&temp, "test: new greeting");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"])
        .passes()
        .stdout_has("app.AppTest  AFFECTED (greeting.txt)");
}

#[test]
fn new_test_is_selected_without_report_entry() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file(
        "core/src/test/java/core/BazTest.java",
        "package core;\n\npublic class BazTest {}\n",
    );
    git_commit(&temp, "test: baz");

    retest(&temp, &["select-tests", "--from", "main", "--report", "report.json"])
        .passes()
        .stdout_has("core.BazTest  ADDED_CHANGED [not in report]");
}

#[test]
fn schema_change_escalates_to_dependent_modules() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("core/src/main/resources/core.xsd", "<schema version=\"2\"/>\n");
    git_commit(&temp, "feat: schema v2");

    let json = retest(
        &temp,
        &[
            "select-tests", "--from", "main", "--report", "report.json", "--graph",
            "modules.toml", "-o", "json",
        ],
    )
    .passes()
    .json();

    let selected = json["selected"].as_array().unwrap();
    let ids: Vec<&str> = selected.iter().map(|s| s["testId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["core.FooTest", "app.AppTest"]);
    for suite in selected {
        assert_eq!(suite["cause"], "BUILD_CHANGE");
        assert_eq!(suite["reason"], "core/src/main/resources/core.xsd");
    }
    assert_eq!(json["strategy"], "file-level");
    assert_eq!(json["modules"], serde_json::json!(["app/pom.xml", "core/pom.xml"]));
}

#[test]
fn schema_change_without_graph_selects_only_its_module() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("core/src/main/resources/core.xsd", "<schema version=\"2\"/>\n");
    git_commit(&temp, "feat: schema v2");

    retest(
        &temp,
        &["select-tests", "--from", "main", "--report", "report.json", "--dry-run"],
    )
    .passes()
    .stdout_has("core.FooTest  BUILD_CHANGE (core/src/main/resources/core.xsd)")
    .stdout_lacks("app.AppTest");
}

#[test]
fn noop_strategy_selects_everything() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("docs/notes.md", "notes\n");
    git_commit(&temp, "docs: notes");

    let json = retest(
        &temp,
        &[
            "select-tests", "--from", "main", "--report", "report.json", "--strategy", "noop",
            "-o", "json", "--dry-run",
        ],
    )
    .passes()
    .json();

    assert_eq!(json["strategy"], "noop");
    let causes: Vec<&str> = json["selected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["cause"].as_str().unwrap())
        .collect();
    assert_eq!(causes, vec!["RETEST_ALL", "RETEST_ALL"]);
    assert_eq!(json["excluded"], serde_json::json!([]));
}

#[test]
fn working_tree_changes_are_analyzed() {
    let temp = Project::reactor();
    touch_foo(&temp);

    retest(
        &temp,
        &["select-tests", "--working-tree", "--report", "report.json", "--dry-run"],
    )
    .passes()
    .stdout_has("core.FooTest  AFFECTED (core.Foo)");
    assert!(!temp.path().join("target/.retest").exists());
}

#[test]
fn runs_from_a_subdirectory() {
    let temp = Project::reactor();
    touch_foo(&temp);

    retest(
        &temp,
        &["select-tests", "--working-tree", "--report", "../report.json", "--dry-run"],
    )
    .in_dir(&temp, "app")
    .passes()
    .stdout_has("core.FooTest  AFFECTED (core.Foo)");
}

#[test]
fn scoped_root_keeps_repository_relative_paths() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("core/src/main/resources/core.xsd", "<schema version=\"2\"/>\n");
    git_commit(&temp, "feat: schema v2");

    let json = retest(
        &temp,
        &[
            "select-tests", "--from", "main", "--report", "report.json", "--graph",
            "modules.toml", "--root", "app", "-o", "json", "--dry-run",
        ],
    )
    .passes()
    .json();

    let selected = json["selected"].as_array().unwrap();
    let ids: Vec<&str> = selected.iter().map(|s| s["testId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["app.AppTest"]);
    assert_eq!(selected[0]["cause"], "BUILD_CHANGE");
    assert_eq!(selected[0]["reason"], "core/src/main/resources/core.xsd");
    assert_eq!(json["modules"], serde_json::json!(["app/pom.xml"]));
}

#[test]
fn mapped_native_source_selects_by_artifact() {
    let temp = Project::reactor();
    temp.file("native/codec.c", "int codec(void) { return 0; }\n");
    temp.file("mapping.csv", "libcodec.so;native/codec.c\n");
    temp.file(
        "report.json",
        r#"{"testSuites": [
  {"testId": "core.FooTest", "openedFiles": ["/opt/lib/libcodec.so"]},
  {"testId": "app.AppTest"}
]}"#,
    );
    git_commit(&temp, "feat: codec");
    git_branch(&temp, "feature");
    temp.file("native/codec.c", "int codec(void) { return 1; }\n");
    git_commit(&temp, "fix: codec");

    retest(
        &temp,
        &[
            "select-tests", "--from", "main", "--report", "report.json", "--mapping",
            "mapping.csv", "--dry-run",
        ],
    )
    .passes()
    .stdout_has("core.FooTest  AFFECTED (libcodec.so)")
    .stdout_lacks("app.AppTest");
}

#[test]
fn missing_report_exits_nonzero() {
    let temp = Project::reactor();

    retest(&temp, &["select-tests", "--from", "main", "--report", "missing.json"]).exits(3);
}

#[test]
fn malformed_report_exits_2() {
    let temp = Project::reactor();
    temp.file("bad.json", "{not json");

    retest(&temp, &["select-tests", "--from", "main", "--report", "bad.json"]).exits(2);
}
