use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn filegraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filegraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("FILEGRAPH_PROJECT")
        .output()
        .expect("Failed to run filegraph")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn sample_project(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/index.ts"), "import { util } from './util';\n").unwrap();
    fs::write(root.join("src/util.ts"), "export const util = 1;\n").unwrap();
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = filegraph(temp_path, &["init"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let config_path = temp_path.join(".filegraph/settings.toml");
    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("version = 1"));
    assert!(content.contains("[indexing]"));
    assert!(content.contains("[languages.python]"));

    // Second init without --force refuses
    let output = filegraph(temp_path, &["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let config_dir = temp_path.join(".filegraph");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("settings.toml"),
        "version = 2\n[indexing]\nparallel_threads = 99\n",
    )
    .unwrap();

    let output = filegraph(temp_path, &["config"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.contains("version = 2"));
    assert!(stdout.contains("parallel_threads = 99"));
}

#[test]
fn test_scan_build_and_export_graph() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    sample_project(temp_path);

    let output = filegraph(temp_path, &["scan", ".", "--build"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("files:       2"));
    assert!(text.contains("relations:    1"));

    let output = filegraph(temp_path, &["graph", "--output", "graph.json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_path.join("graph.json")).unwrap()).unwrap();
    // The index directory itself is never scanned
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["from"], "src/index.ts");
    assert_eq!(links[0]["to"], "src/util.ts");
    assert_eq!(links[0]["relation_type"], "IMPORTS");
}

#[test]
fn test_retrieve_and_status() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    sample_project(temp_path);

    assert!(filegraph(temp_path, &["scan", "--build", "-p", "web"]).status.success());

    let output = filegraph(temp_path, &["retrieve", "dependents", "src/util.ts", "-p", "web"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("src/index.ts"));

    let output = filegraph(
        temp_path,
        &["retrieve", "impact", "src/util.ts", "--json", "-p", "web"],
    );
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["levels"][1][0], "src/index.ts");

    let output = filegraph(temp_path, &["status", "--json", "-p", "web"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["file_count"], 2);
    assert_eq!(json["directory_count"], 1);
    assert_eq!(json["relation_count"], 1);
}

#[test]
fn test_errors_are_one_line_and_exit_one() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = filegraph(temp_path, &["build"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("Error: "), "{err}");
    assert!(err.contains("filegraph scan"));
    assert_eq!(err.trim_end().lines().count(), 1);

    let output = filegraph(temp_path, &["scan", "does-not-exist"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Cannot read project root"));

    let output = filegraph(temp_path, &["status", "-p", "bad id!"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid project id"));
}
