//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn component(name: &str, metas: &[(&str, &str)]) -> String {
    let entries: String = metas
        .iter()
        .map(|(k, v)| format!(r#"<meta name="{}" value="{}" />"#, k, v))
        .collect();
    format!(
        r#"<component><declaration><meta name="name" value="{}" />{}</declaration></component>"#,
        name, entries
    )
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn compiler() -> Command {
    Command::cargo_bin("component-compiler").unwrap()
}

#[test]
fn test_formats_lists_builtins() {
    compiler()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""extension": ".svg""#))
        .stdout(predicate::str::contains(r#""format": "json""#));
}

#[test]
fn test_no_format_exits_with_2() {
    let src = TempDir::new().unwrap();
    write(src.path(), "widget.xml", &component("Widget", &[]));

    compiler()
        .arg("compile")
        .arg(src.path().join("widget.xml"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_load_failure_halts_batch_with_1() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "a.xml", &component("Alpha", &[]));
    write(src.path(), "b.xml", "<component><declaration>");
    write(src.path(), "c.xml", &component("Gamma", &[]));

    compiler()
        .arg("compile")
        .arg(src.path())
        .arg(format!("--svg={}", out.path().display()))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("b.xml"));

    assert!(out.path().join("a.svg").is_file());
    assert!(!out.path().join("c.svg").exists());
}

#[test]
fn test_manifest_keeps_order_and_expands_directories() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "widget.xml", &component("Widget", &[("zeta", "1"), ("alpha", "2")]));
    write(src.path(), "widget.svg", "<svg/>");
    write(src.path(), "another.xml", &component("Another", &[]));
    write(src.path(), "notes.txt", "not a component");
    let manifest = out.path().join("manifest.json");

    compiler()
        .arg("compile")
        .arg(src.path())
        .arg(format!("--svg={}", out.path().display()))
        .arg(format!("--json={}", out.path().display()))
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success();

    let text = fs::read_to_string(&manifest).unwrap();
    let position = |needle: &str| text.find(needle).unwrap();

    assert!(position(r#""compilerVersion""#) < position(r#""components""#));
    // directory entries are compiled in sorted order
    assert!(position(r#""Another""#) < position(r#""Widget""#));
    assert!(!text.contains("notes"));

    let widget = &text[position(r#""Widget""#)..];
    let find = |needle: &str| widget.find(needle).unwrap();
    assert!(find(r#""zeta""#) < find(r#""alpha""#));
    assert!(find(r#""alpha""#) < find(r#""org.circuit-diagram.icon-svg""#));
    assert!(find(r#""svg":"#) < find(r#""json":"#));

    assert!(out.path().join("widget.svg").is_file());
    assert!(out.path().join("another.json").is_file());
}

#[test]
fn test_absent_destination_writes_to_working_directory() {
    let src = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    write(src.path(), "widget.xml", &component("Widget", &[]));

    compiler()
        .current_dir(work.path())
        .arg("compile")
        .arg(src.path().join("widget.xml"))
        .arg("--svg")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""svg": "widget.svg""#));

    assert!(work.path().join("widget.svg").is_file());
}
