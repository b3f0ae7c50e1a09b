// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// 辅助函数，避免重复
fn main_command() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let mut cmd = main_command();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_missing_base_url_is_reported() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("empty.json");
    fs::write(&config_path, "{}").unwrap();

    let mut cmd = main_command();
    cmd.arg("--config").arg(&config_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("未指定站点根地址"));
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = tempdir().unwrap();
    let mut cmd = main_command();
    cmd.arg("-u")
        .arg("http://127.0.0.1:9")
        .arg("-i")
        .arg(dir.path().join("missing.html"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("无法读取页面文件"));
}

// --- 测试核心流程 ---

#[test]
fn test_dry_run_lists_plan_without_downloading() {
    let dir = tempdir().unwrap();
    let page = dir.path().join("saved.html");
    fs::write(
        &page,
        r#"<img src="/img/logo.png"><script src="https://cdn.example.com/a.js"></script>"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    let mut cmd = main_command();
    cmd.arg("-u")
        .arg("https://example.com")
        .arg("-i")
        .arg(&page)
        .arg("-o")
        .arg(&out)
        .arg("--dry-run");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/img/logo.png -> "))
        .stdout(predicate::str::contains("https://cdn.example.com/a.js (站外资源，跳过)"));
    assert!(!out.exists());
}

#[test]
fn test_failed_assets_set_exit_code() {
    let mut server = mockito::Server::new();
    let ok_mock = server
        .mock("GET", "/img/ok.png")
        .with_status(200)
        .with_body("ok")
        .create();
    let missing_mock = server.mock("GET", "/img/missing.png").with_status(404).create();

    let dir = tempdir().unwrap();
    let out = dir.path().join("docs");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("index.html"),
        r#"<img src="/img/ok.png"><img src="/img/missing.png">"#,
    )
    .unwrap();

    let mut cmd = main_command();
    cmd.arg("-u").arg(server.url()).arg("-o").arg(&out);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1/2 个资源下载失败"));

    ok_mock.assert();
    missing_mock.assert();
    assert_eq!(fs::read_to_string(out.join("img/ok.png")).unwrap(), "ok");
    assert!(!out.join("img/missing.png").exists());
}
