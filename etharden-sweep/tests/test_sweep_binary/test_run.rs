use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::{echo_line, Runner};

#[test]
fn test_run_with_echo_round_trip() {
    let assert = Runner::new()
        .args([
            "--executable",
            "echo",
            "--benchmarks",
            "gzip,git",
            "--quiet-headers",
        ])
        .run()
        .success();

    let expected = [
        echo_line("gzip", "gcc", false),
        echo_line("gzip", "gcc", true),
        echo_line("gzip", "clang", false),
        echo_line("gzip", "clang", true),
        echo_line("git", "gcc", false),
        echo_line("git", "gcc", true),
        echo_line("git", "clang", false),
        echo_line("git", "clang", true),
    ]
    .concat();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, expected);
}

#[test]
fn test_run_with_headers() {
    let assert = Runner::new()
        .args([
            "--executable",
            "echo",
            "--benchmarks",
            "gzip",
            "--variants",
            "gcc/O3",
        ])
        .run()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout,
        format!(
            "gzip gcc/O3 control\n{}gzip gcc/O3 transformed\n{}",
            echo_line("gzip", "gcc", false),
            echo_line("gzip", "gcc", true)
        )
    );
}

#[test]
fn test_run_twice_is_identical() {
    let run = || {
        Runner::new()
            .args(["--executable", "echo", "--benchmarks", "sqlite,lmdb"])
            .run()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_run_with_sweep_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "executable": "echo",
            "benchmarks": ["httpd"],
            "variants": ["clang/O3"],
            "modes": ["transformed"]
        }"#,
    )
    .unwrap();

    let assert = Runner::new()
        .args(["--quiet-headers", "--config"])
        .args([file.path()])
        .run()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, echo_line("httpd", "clang", true));
}

#[test]
fn test_run_with_quiet_headers_writes_output_unchanged() {
    // `printf` uses the generation flag as format string and prints it without a newline
    let assert = Runner::new()
        .args([
            "--executable",
            "printf",
            "--benchmarks",
            "gzip",
            "--variants",
            "gcc/O3",
            "--modes",
            "control",
            "--quiet-headers",
        ])
        .run()
        .success();

    assert_eq!(assert.get_output().stdout, b"-m");
}

#[test]
fn test_run_with_quiet_headers_does_not_separate_outputs() {
    let assert = Runner::new()
        .args([
            "--executable",
            "printf",
            "--benchmarks",
            "gzip",
            "--variants",
            "gcc/O3,clang/O3",
            "--modes",
            "control",
            "--quiet-headers",
        ])
        .run()
        .success();

    assert_eq!(assert.get_output().stdout, b"-m-m");
}

#[test]
fn test_run_with_variant_benchmarks_in_sweep_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "executable": "echo",
            "benchmarks": [],
            "modes": ["control"],
            "variant_benchmarks": {
                "gcc/O3": ["403.gcc", "429.mcf"],
                "clang/O3": ["403.gcc", "433.milc"]
            }
        }"#,
    )
    .unwrap();

    let assert = Runner::new()
        .args(["--quiet-headers", "--config"])
        .args([file.path()])
        .run()
        .success();

    let expected = [
        echo_line("403.gcc", "gcc", false),
        echo_line("403.gcc", "clang", false),
        echo_line("429.mcf", "gcc", false),
        echo_line("433.milc", "clang", false),
    ]
    .concat();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, expected);
}
