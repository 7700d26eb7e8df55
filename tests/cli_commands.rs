//! CLI command layer: argument parsing through `execute`, without spawning the binary.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use vtag::cli::{Cli, execute};

const SCHOOL: &str = r#"{
    "module": "school",
    "records": {
        "Base": { "fields": [ { "name": "HelloWorld", "type": "string", "tags": { "vtag": ",list,detail" } } ] },
        "Ext": { "fields": [ { "name": "DD", "type": "string", "tags": { "vtag": ",list" } } ] },
        "Student": { "fields": [
            { "name": "Base", "type": "*Base", "embedded": true },
            { "name": "Ext", "type": "Ext", "tags": { "vtag": ",list", "db": "ext_id,list" } },
            { "name": "Name", "type": "string", "tags": { "vtag": "name,list,detail" } },
            { "name": "Age", "type": "string", "tags": { "vtag": "age,list,detail" } }
        ] }
    }
}"#;

fn write_schema(test: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vtag-cli-{}-{test}.json", std::process::id()));
    fs::write(&path, SCHOOL).unwrap();
    path
}

fn run(args: &[&str]) -> Result<String, String> {
    let cli = Cli::try_parse_from(std::iter::once("vtag").chain(args.iter().copied())).map_err(|e| e.to_string())?;
    execute(cli).map_err(|e| e.message)
}

#[test]
fn names_as_lines() {
    let schema = write_schema("lines");
    let out = run(&[
        "names",
        "--schema",
        schema.to_str().unwrap(),
        "--record",
        "Student",
        "--label",
        "list",
        "--convention",
        "snake",
    ])
    .unwrap();
    assert_eq!(out, "hello_world\next.dd\nname\nage");
}

#[test]
fn names_as_json_with_comma_separated_labels() {
    let schema = write_schema("json");
    let out = run(&[
        "names",
        "--schema",
        schema.to_str().unwrap(),
        "-r",
        "*Student",
        "-l",
        "detail,admin",
        "--prefix",
        "s",
        "--format",
        "json",
        "--no-cache",
    ])
    .unwrap();
    assert_eq!(out, r#"["s.HelloWorld","s.name","s.age"]"#);
}

#[test]
fn names_with_custom_tag_key() {
    let schema = write_schema("tag-key");
    let out = run(&[
        "names",
        "--schema",
        schema.to_str().unwrap(),
        "--record",
        "Student",
        "--label",
        "list",
        "--tag-key",
        "db",
    ])
    .unwrap();
    // Only `Ext` carries a `db` tag; its nested fields have none.
    assert_eq!(out, "");
}

#[test]
fn unknown_record_is_reported() {
    let schema = write_schema("unknown");
    let err = run(&[
        "names",
        "--schema",
        schema.to_str().unwrap(),
        "--record",
        "Teacher",
        "--label",
        "list",
    ])
    .unwrap_err();
    assert!(err.contains("Teacher"), "{err}");
}

#[test]
fn missing_schema_file_is_reported() {
    let err = run(&["records", "--schema", "/definitely/not/here.json"]).unwrap_err();
    assert!(err.starts_with("failed to read"), "{err}");
}

#[test]
fn records_are_listed() {
    let schema = write_schema("records");
    let out = run(&["records", "--schema", schema.to_str().unwrap()]).unwrap();
    assert_eq!(out, "Base\nExt\nStudent");
}

#[test]
fn convert_applies_conventions() {
    assert_eq!(run(&["convert", "HelloWorld", "UserID"]).unwrap(), "hello_world\nuser_id");
    assert_eq!(run(&["convert", "-c", "camel", "--prefix", "p", "HelloWorld"]).unwrap(), "p.helloWorld");
    assert_eq!(run(&["convert", "-c", "none", "HelloWorld"]).unwrap(), "HelloWorld");
    assert!(run(&["convert", "-c", "kebab", "HelloWorld"]).is_err());
}
