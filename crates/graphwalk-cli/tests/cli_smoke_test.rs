use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn stdout_of(args: &[&str]) -> String {
    let exe = assert_cmd::cargo_bin!("graphwalk-cli");
    let assert = Command::new(exe).args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn runs_bfs_on_the_default_tree() {
    let out = stdout_of(&["run", "--algorithm", "bfs"]);
    assert!(out.contains("Start BFS. Enqueue 0"), "stdout:\n{out}");
    assert!(out.contains("BFS Complete"), "stdout:\n{out}");
    assert!(out.contains("-- finished after"), "stdout:\n{out}");
}

#[test]
fn json_lines_are_steps() {
    let out = stdout_of(&[
        "--json",
        "--algorithm",
        "dijkstra",
        "--edge",
        "0-1:2",
        "--edge",
        "1-2:3",
    ]);
    let steps: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert!(!steps.is_empty());
    assert_eq!(steps[0]["kind"], "init");
    let last = steps.last().expect("last step");
    assert_eq!(last["kind"], "done");
    assert_eq!(last["distances"]["2"], 5.0);
}

#[test]
fn show_prints_representations() {
    let out = stdout_of(&["show", "--preset", "cycle"]);
    assert!(out.contains("Adjacency list:"), "stdout:\n{out}");
    assert!(out.contains("0: 1"), "stdout:\n{out}");
    assert!(out.contains("(3, 0)"), "stdout:\n{out}");
    assert!(out.contains("vertices=4 edges=4"), "stdout:\n{out}");
}

#[test]
fn show_json_has_properties() {
    let out = stdout_of(&["show", "--json", "--edge", "0-1", "--vertices", "4"]);
    let value: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(value["properties"]["vertices"], 4);
    assert_eq!(value["properties"]["components"], 3);
}

#[test]
fn reads_settings_from_a_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{ "algorithm": "cycle", "preset": "cycle" }"#).expect("write config");

    let out = stdout_of(&["run", "--config", path.to_string_lossy().as_ref()]);
    assert!(out.contains("Cycle detected! Back edge to 0"), "stdout:\n{out}");
}

#[test]
fn unknown_algorithm_is_a_runtime_error() {
    let exe = assert_cmd::cargo_bin!("graphwalk-cli");
    Command::new(exe)
        .args(["run", "--algorithm", "quicksort"])
        .assert()
        .code(1);
}

#[test]
fn bad_flags_are_usage_errors() {
    let exe = assert_cmd::cargo_bin!("graphwalk-cli");
    Command::new(exe).args(["--frobnicate"]).assert().code(2);

    let exe = assert_cmd::cargo_bin!("graphwalk-cli");
    Command::new(exe)
        .args(["--preset", "tree", "--edge", "0-1"])
        .assert()
        .code(2);
}

#[test]
fn huge_vertex_ids_are_usage_errors() {
    for edge in ["4294967295-0", "0-20000"] {
        let exe = assert_cmd::cargo_bin!("graphwalk-cli");
        Command::new(exe)
            .args(["run", "--edge", edge])
            .assert()
            .code(2);
    }

    let exe = assert_cmd::cargo_bin!("graphwalk-cli");
    Command::new(exe)
        .args(["run", "--vertices", "4294967295"])
        .assert()
        .code(2);
}
