use std::io::Write;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::NamedTempFile;

use crate::common::Runner;

#[test]
fn test_failures_are_ignored_by_default() {
    Runner::new()
        .args(["--executable", "false", "--benchmarks", "gzip"])
        .run()
        .success()
        .stderr(contains("gzip gcc/O3 control: exit code 1"))
        .stderr(contains("gzip clang/O3 transformed: exit code 1"));
}

#[test]
fn test_missing_executable_is_ignored_by_default() {
    Runner::new()
        .args([
            "--executable",
            "./this-etharden-does-not-exist",
            "--benchmarks",
            "gzip",
        ])
        .run()
        .success()
        .stderr(contains("gzip gcc/O3 control: launch failed"));
}

#[test]
fn test_failures_are_reported() {
    Runner::new()
        .args([
            "--executable",
            "false",
            "--benchmarks",
            "gzip",
            "--on-failure",
            "report",
        ])
        .run()
        .code(2)
        .stderr(contains("Failures: 4 of 4 invocations failed:"))
        .stderr(contains("  gzip gcc/O3 control (exit code 1)"))
        .stderr(contains("  gzip clang/O3 transformed (exit code 1)"))
        .stderr(contains("4 invocations failed"));
}

#[test]
fn test_fail_fast_stops_at_first_failure() {
    Runner::new()
        .args([
            "--executable",
            "false",
            "--benchmarks",
            "gzip,git",
            "--on-failure",
            "fail-fast",
        ])
        .env("ETHARDEN_SWEEP_LOG", "info")
        .run()
        .code(1)
        .stderr(contains("Error running 'gzip gcc/O3 control': Exit code was: '1'"))
        .stderr(contains("[2/8]").not());
}

#[test]
fn test_invalid_sweep_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"benchmarks": []}"#).unwrap();

    Runner::new()
        .args(["--config"])
        .args([file.path()])
        .run()
        .code(1)
        .stderr(contains("Misconfiguration of the sweep: No benchmarks given"));
}

#[test]
fn test_invalid_variant_is_rejected_by_the_command_line() {
    Runner::new()
        .args(["--variants", "icc/O3"])
        .run()
        .failure()
        .stderr(contains("Invalid compiler 'icc' in variant 'icc/O3'"));
}

#[test]
fn test_stderr_of_failure_is_dumped_once() {
    let root = tempfile::tempdir().unwrap();

    // `ls` complains about the missing artifacts on stderr and exits with an error
    let assert = Runner::with_root(root.path())
        .args([
            "--executable",
            "ls",
            "--benchmarks",
            "gzip",
            "--variants",
            "gcc/O3",
            "--modes",
            "control",
        ])
        .env("ETHARDEN_SWEEP_LOG", "debug")
        .run()
        .success()
        .stderr(contains("gzip gcc/O3 control: exit code 2"));

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.matches("gzip gcc/O3 control: Output on stderr:").count(), 1);
}

#[test]
fn test_duplicate_benchmark_is_reported_once() {
    let assert = Runner::new()
        .args(["--list", "--benchmarks", "gzip,gzip"])
        .run()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(
        stderr
            .matches("Benchmark 'gzip' is listed more than once")
            .count(),
        1
    );
}
