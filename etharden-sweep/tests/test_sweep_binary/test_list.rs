use pretty_assertions::assert_eq;

use crate::common::{Runner, ROOT};

#[test]
fn test_list_single_benchmark() {
    let assert = Runner::new()
        .args(["--list", "--benchmarks", "gzip", "--variants", "gcc/O3"])
        .run()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout,
        format!(
            "./etharden -m {ROOT}/gzip/O3/gzip_gcc_orig_O3 {ROOT}/gzip/O3/gzip_gcc_control_O3\n\
             ./etharden -m --gadget-reduction {ROOT}/gzip/O3/gzip_gcc_orig_O3 \
             {ROOT}/gzip/O3/gzip_gcc_transformed_O3\n"
        )
    );
}

#[test]
fn test_list_default_sweep() {
    let assert = Runner::new().args(["--list"]).run().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    // 18 benchmarks, gcc/O3 and clang/O3, control and transformed
    assert_eq!(lines.len(), 18 * 2 * 2);
    assert!(lines[0].ends_with("bftpd_gcc_control_O3"));
    assert!(lines[1].ends_with("bftpd_gcc_transformed_O3"));
    assert!(lines[2].ends_with("bftpd_clang_control_O3"));
    assert!(lines[3].ends_with("bftpd_clang_transformed_O3"));
    assert!(lines[71].ends_with("482.sphinx_clang_transformed_O3"));
}

#[test]
fn test_list_with_filter_and_transformed_root() {
    let assert = Runner::new()
        .args([
            "--list",
            "--benchmarks",
            "gzip,403.gcc,git",
            "--variants",
            "clang/O3",
            "--modes",
            "transformed",
            "--filter",
            "^4",
            "--transformed-root",
            "/root/broken",
        ])
        .run()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout,
        format!(
            "./etharden -m --gadget-reduction {ROOT}/403.gcc/O3/403.gcc_clang_orig_O3 \
             /root/broken/403.gcc/O3/403.gcc_clang_transformed_O3\n"
        )
    );
}

#[test]
fn test_list_with_benchmarks_from_environment() {
    let assert = Runner::new()
        .env("ETHARDEN_SWEEP_BENCHMARKS", "lmdb")
        .env("ETHARDEN_SWEEP_VARIANTS", "gcc/omit-fp")
        .args(["--list", "--modes", "control"])
        .run()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout,
        format!(
            "./etharden -m {ROOT}/lmdb/omit-fp/lmdb_gcc_orig_ofp \
             {ROOT}/lmdb/omit-fp/lmdb_gcc_control_ofp\n"
        )
    );
}
