//! Behavioral specs for `retest select-modules` and `retest expand-modules`.

use crate::prelude::*;

#[test]
fn changed_sources_select_owning_modules() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("app/src/main/java/app/App.java", "package app;\n\npublic class App { int y; }\n");
    git_commit(&temp, "feat: app field");

    retest(&temp, &["select-modules", "--from", "main"])
        .passes()
        .stdout_eq("app/pom.xml\n");
    assert_eq!(temp.read("target/.retest/modules/modules.txt"), "app/pom.xml");
}

#[test]
fn select_modules_from_a_subdirectory() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("app/src/main/java/app/App.java", "package app;\n\npublic class App { int y; }\n");
    git_commit(&temp, "feat: app field");

    retest(&temp, &["select-modules", "--from", "main", "--dry-run"])
        .in_dir(&temp, "core")
        .passes()
        .stdout_eq("app/pom.xml\n");
}

#[test]
fn full_build_path_selects_all_modules() {
    let temp = Project::reactor();
    git_branch(&temp, "feature");
    temp.file("base/settings.xml", "<settings/>\n");
    git_commit(&temp, "build: settings");

    retest(&temp, &["select-modules", "--from", "main", "--dry-run"])
        .passes()
        .stdout_eq("*\n");
}

#[test]
fn strip_dirs_select_parent_module() {
    let temp = Project::reactor();
    temp.file("core/feature/pom.xml", "<project/>");
    temp.file("core/feature/feature.xml", "<feature/>\n");
    git_commit(&temp, "build: feature");
    git_branch(&temp, "feature-branch");
    temp.file("core/feature/feature.xml", "<feature id=\"x\"/>\n");
    git_commit(&temp, "build: feature id");

    retest(&temp, &["select-modules", "--from", "main", "-o", "json", "--dry-run"])
        .passes()
        .stdout_has("\"core/pom.xml\"");
}

#[test]
fn expand_modules_adds_downstream_dependents() {
    let temp = Project::reactor();
    temp.file("selected.txt", "core/pom.xml\n");

    let stdout = retest(
        &temp,
        &["expand-modules", "selected.txt", "--graph", "modules.toml"],
    )
    .passes()
    .stdout();

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("/app"), "{}", stdout);
    assert!(lines[1].ends_with("/core"), "{}", stdout);
}

#[test]
fn expand_modules_upstream_adds_dependencies() {
    let temp = Project::reactor();
    temp.file("selected.txt", "app/pom.xml\n");

    let stdout = retest(
        &temp,
        &[
            "expand-modules", "selected.txt", "--graph", "modules.toml", "--closure",
            "upstream",
        ],
    )
    .passes()
    .stdout();

    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn expand_modules_wildcard_selects_everything() {
    let temp = Project::reactor();
    temp.file("all.txt", "*\n");

    let json = retest(
        &temp,
        &["expand-modules", "all.txt", "--graph", "modules.toml", "-o", "json"],
    )
    .passes()
    .json();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn expand_modules_rejects_cyclic_graph() {
    let temp = Project::reactor();
    temp.file("selected.txt", "core/pom.xml\n");
    temp.file(
        "cycle.toml",
        "[[module]]\nid = \"a\"\npath = \"core\"\ndepends_on = [\"b\"]\n\n\
         [[module]]\nid = \"b\"\npath = \"app\"\ndepends_on = [\"a\"]\n",
    );

    retest(&temp, &["expand-modules", "selected.txt", "--graph", "cycle.toml"]).exits(2);
}

#[test]
fn expand_modules_from_a_subdirectory() {
    let temp = Project::reactor();
    temp.file("selected.txt", "core/pom.xml\n");

    let stdout = retest(
        &temp,
        &["expand-modules", "../selected.txt", "--graph", "../modules.toml"],
    )
    .in_dir(&temp, "app")
    .passes()
    .stdout();

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{}", stdout);
    assert!(lines[0].ends_with("/app"), "{}", stdout);
    assert!(lines[1].ends_with("/core"), "{}", stdout);
}
