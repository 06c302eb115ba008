use std::path::Path;
use std::process::{Command, Output};

const PAPER: &str = "Abstract: We test the command line.\n\nKeywords: cli, testing\n\n\
Introduction\nCommands should work.\n\nResults\nThey did.\n\nReferences\n\
Zeta, Z. (2001). Late.\nAlpha, A. (1999). Early.\n";

fn paperstyle(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paperstyle"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_CACHE_HOME", dir.join("cache"))
        .env_remove("PAPERSTYLE_STYLE")
        .env_remove("PAPERSTYLE_PAPER_TYPE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run paperstyle")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn render_text_file_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.txt"), PAPER).unwrap();

    let out = paperstyle(
        dir.path(),
        &[
            "render", "paper.txt", "--style", "apa7", "--paper-type", "research-paper",
            "--heading", "CLI Paper", "--author", "Pat Doe", "--date", "2024-05-06",
            "--no-history",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let html = stdout(&out);
    assert!(html.contains(">CLI Paper</h1>"));
    assert!(html.contains(">May 6, 2024</p>"));
    assert!(html.contains(">1. Introduction</h2>"));
    assert!(html.contains(">2. Results</h2>"));
    assert!(html.find("Alpha, A.").unwrap() < html.find("Zeta, Z.").unwrap());
}

#[test]
fn export_word_and_record_history() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.txt"), PAPER).unwrap();

    let out = paperstyle(
        dir.path(),
        &["render", "paper.txt", "-s", "ieee", "-t", "essay", "--heading", "My <b>Paper</b>", "--export", "word"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let doc = std::fs::read_to_string(dir.path().join("My Paper.doc")).unwrap();
    assert!(doc.starts_with("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body>"));

    let list = paperstyle(dir.path(), &["history", "list", "--no-color"]);
    assert!(list.status.success());
    assert!(stdout(&list).contains("[IEEE] My <b>Paper</b>"));

    let show = paperstyle(dir.path(), &["history", "show", "1"]);
    assert!(show.status.success());
    assert!(stdout(&show).contains("[1] Zeta, Z. (2001). Late."));

    let clear = paperstyle(dir.path(), &["history", "clear"]);
    assert!(clear.status.success());
    let list = paperstyle(dir.path(), &["history", "list"]);
    assert_eq!(stdout(&list), "No recent papers.\n");
}

#[test]
fn segment_as_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.txt"), PAPER).unwrap();

    let out = paperstyle(dir.path(), &["segment", "paper.txt", "--json"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["abstract"], "We test the command line.");
    assert_eq!(value["keywords"], "cli, testing");
}

#[test]
fn unknown_style_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.txt"), PAPER).unwrap();

    let out = paperstyle(dir.path(), &["render", "paper.txt", "--style", "harvard", "--no-history"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid style 'harvard'"));
}

#[test]
fn config_file_in_working_directory_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.txt"), PAPER).unwrap();
    std::fs::write(
        dir.path().join(".paperstyle.toml"),
        "[defaults]\nstyle = \"chicago\"\npaper_type = \"essay\"\n",
    )
    .unwrap();

    let out = paperstyle(dir.path(), &["render", "paper.txt", "--no-history"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(">Bibliography</h2>"));
}

#[test]
fn config_show_prints_merged_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".paperstyle.toml"),
        "[render]\naffiliation = \"Dept. of Rivers\"\n",
    )
    .unwrap();

    let out = paperstyle(dir.path(), &["config", "show"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("affiliation = \"Dept. of Rivers\""));

    let init = paperstyle(dir.path(), &["config", "init"]);
    assert!(init.status.success());
    let saved = dir.path().join("config").join("paperstyle").join("config.toml");
    assert!(std::fs::read_to_string(saved).unwrap().contains("Dept. of Rivers"));
}
