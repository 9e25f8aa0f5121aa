use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const SPACE2_JS: &str = "\
function f(x) {
  if (x) {
    return 1;
  }
  for (;;) {
    g();
  }
}
";

const TAB_C: &str = "\
int main(void) {
\tif (argc) {
\t\treturn 1;
\t}
\treturn 0;
}
";

const MIXED4_C: &str = "\
static void f(void) {
    if (a) {
\tif (b) {
\t    g();
\t\th();
\t}
    }
}
";

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn indent_finder() -> Command {
    Command::new(env!("CARGO_BIN_EXE_indent-finder"))
}

#[test]
fn cli_single_file_plain_output() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.js");
    write_file(&file, SPACE2_JS);

    let output = indent_finder().arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "space 2\n");
}

#[test]
fn cli_vim_output_for_tab_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.c");
    write_file(&file, TAB_C);

    let output = indent_finder()
        .args(["--vim-output", "--default-tab-width", "4"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "set softtabstop=0 | set tabstop=4 | set noexpandtab | set shiftwidth=4 \" (tab)\n"
    );
}

#[test]
fn cli_mixed_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("vim.c");
    write_file(&file, MIXED4_C);

    let output = indent_finder().arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "mixed tab 8 space 4\n"
    );
}

#[test]
fn cli_multiple_files_are_prefixed() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.js");
    let b = dir.path().join("b.c");
    write_file(&a, SPACE2_JS);
    write_file(&b, TAB_C);

    let output = indent_finder().arg(&a).arg(&b).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{} : space 2", a.display()));
    assert_eq!(lines[1], format!("{} : tab 8", b.display()));
}

#[test]
fn cli_defaults_for_undecidable_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("flat.txt");
    write_file(&file, "one\ntwo\nthree\n");

    let output = indent_finder()
        .args(["--default-spaces", "3"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "space 3\n");

    let output = indent_finder()
        .args(["--default-to-tabs", "--default-tab-width", "6"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "tab 6\n");
}

#[test]
fn cli_directory_json_respects_indentignore() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/a.js"), SPACE2_JS);
    write_file(&dir.path().join("src/main.c"), TAB_C);
    write_file(&dir.path().join("src/skip.c"), TAB_C);
    write_file(&dir.path().join(".indentignore"), "skip.c\n");

    let output = indent_finder()
        .arg(dir.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = v.as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries[0]["path"].as_str().unwrap().ends_with("a.js"));
    assert_eq!(entries[0]["indent"]["type"], "space");
    assert_eq!(entries[0]["indent"]["width"], 2);
    assert!(entries[1]["path"].as_str().unwrap().ends_with("main.c"));
    assert_eq!(entries[1]["indent"]["type"], "tab");
}

#[test]
fn cli_no_ignore_includes_gitignored_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    write_file(&dir.path().join(".gitignore"), "*.c\n");
    write_file(&dir.path().join("a.js"), SPACE2_JS);
    write_file(&dir.path().join("main.c"), TAB_C);

    let output = indent_finder().arg(dir.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "space 2\n");

    let output = indent_finder()
        .arg("--no-ignore")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("main.c : tab 8"));
}

#[test]
fn cli_missing_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.py");

    let output = indent_finder().arg(&missing).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("path not found"));
}

#[test]
fn cli_vim_output_hides_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.py");

    let output = indent_finder()
        .arg("--vim-output")
        .arg(&missing)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn cli_vim_output_skips_failed_file_and_succeeds() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("main.c");
    let missing = dir.path().join("missing.c");
    write_file(&good, TAB_C);

    let output = indent_finder()
        .arg("--vim-output")
        .arg(&good)
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(&format!("{} : set softtabstop=0", good.display())));
    assert!(output.stderr.is_empty());
}

#[test]
fn cli_json_error_output_is_valid_json_even_with_quotes_in_path() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty-\"quoted\"");
    fs::create_dir_all(&empty).unwrap();

    let output = indent_finder()
        .arg(&empty)
        .arg("--json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(5));

    let stderr = String::from_utf8(output.stderr).unwrap();
    let _: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
}
