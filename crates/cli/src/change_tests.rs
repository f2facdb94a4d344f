// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

const SAMPLE_DIFF: &str = "\
diff --git a/src/Foo.java b/src/Foo.java
index 3b18e51..a4c2f0d 100644
--- a/src/Foo.java
+++ b/src/Foo.java
@@ -1 +1 @@
-package foo; public class Foo { void foo(){} }
+package foo; public class Foo { void bar(){} }
diff --git a/src/New.java b/src/New.java
new file mode 100644
index 0000000..e69de29
diff --git a/foo.txt b/foo.txt
deleted file mode 100644
index 30d74d2..0000000
--- a/foo.txt
+++ /dev/null
@@ -1 +0,0 @@
-test
";

#[test]
fn parses_all_three_change_types() {
    let items = parse_diff_output(SAMPLE_DIFF);
    let expected: ChangeSet = [
        ChangeSetItem::modified("src/Foo.java"),
        ChangeSetItem::added("src/New.java"),
        ChangeSetItem::deleted("foo.txt"),
    ]
    .into_iter()
    .collect();
    assert_eq!(items, expected);
}

#[test]
fn empty_output_yields_empty_change_set() {
    assert!(parse_diff_output("").is_empty());
}

#[test]
fn marker_must_follow_header_immediately() {
    // The "new file mode" marker two lines below the header does not count.
    let output = "\
diff --git a/a.txt b/a.txt
index 1..2 100644
new file mode 100644
";
    let items = parse_diff_output(output);
    assert_eq!(items.into_iter().next().unwrap().change_type, ChangeType::Modified);
}

#[test]
fn header_on_last_line_defaults_to_modified() {
    let items = parse_diff_output("diff --git a/x.txt b/x.txt");
    assert!(items.contains(&ChangeSetItem::modified("x.txt")));
}

#[parameterized(
    simple = { "diff --git a/a/b.txt b/a/b.txt", "a/b.txt" },
    with_spaces = { "diff --git a/my dir/a b.txt b/my dir/a b.txt", "my dir/a b.txt" },
    b_in_name = { "diff --git a/x b/y b/x b/y", "x b/y" },
)]
fn header_path_extraction(line: &str, expected: &str) {
    assert_eq!(parse_header_path(line), Some(PathBuf::from(expected)));
}

#[parameterized(
    octal_utf8 = { r#"diff --git "a/res/gr\303\274\303\237e.txt" "b/res/gr\303\274\303\237e.txt""#, "res/grüße.txt" },
    escaped_quote = { r#"diff --git "a/say \"hi\".txt" "b/say \"hi\".txt""#, "say \"hi\".txt" },
    backslash_and_tab = { r#"diff --git "a/a\\b\tc" "b/a\\b\tc""#, "a\\b\tc" },
)]
fn quoted_header_path_extraction(line: &str, expected: &str) {
    assert_eq!(parse_header_path(line), Some(PathBuf::from(expected)));
}

#[test]
fn quoted_header_keeps_change_type() {
    let output = "\
diff --git \"a/gr\\303\\274\\303\\237e.txt\" \"b/gr\\303\\274\\303\\237e.txt\"
deleted file mode 100644
diff --git a/plain.txt b/plain.txt
new file mode 100644
";
    let items = parse_diff_output(output);
    let expected: ChangeSet = [ChangeSetItem::deleted("grüße.txt"), ChangeSetItem::added("plain.txt")]
        .into_iter()
        .collect();
    assert_eq!(items, expected);
}

#[test]
fn malformed_quoted_header_is_skipped() {
    assert_eq!(parse_header_path(r#"diff --git "a/unterminated"#), None);
    assert_eq!(parse_header_path(r#"diff --git "a/bad\q" "b/bad\q""#), None);
}

#[test]
fn non_header_lines_are_ignored() {
    assert_eq!(parse_header_path("index 3b18e51..a4c2f0d 100644"), None);
    assert_eq!(parse_header_path("+diff --git a/x b/x"), None);
}

#[test]
fn change_set_item_equality_uses_path_and_type() {
    assert_eq!(ChangeSetItem::added("a"), ChangeSetItem::added("a"));
    assert_ne!(ChangeSetItem::added("a"), ChangeSetItem::modified("a"));
}

#[test]
fn file_filter_must_match_whole_path() {
    let filter = compile_file_filter(r".*\.java").unwrap();
    let changes: ChangeSet = [
        ChangeSetItem::modified("src/Foo.java"),
        ChangeSetItem::modified("src/Foo.java.orig"),
        ChangeSetItem::modified("foo.txt"),
    ]
    .into_iter()
    .collect();

    let filtered = filter_change_set(&changes, &filter);
    assert_eq!(filtered.len(), 1);
    assert!(filtered.contains(&ChangeSetItem::modified("src/Foo.java")));
}

#[test]
fn invalid_file_filter_is_an_argument_error() {
    let err = compile_file_filter("(").unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}
