use std::process::Command;

#[test]
fn xtask_help_runs() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("help")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
    assert!(stderr.contains("explain-coverage"));
}

#[test]
fn explain_coverage_passes() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("explain-coverage")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("codes have explanations"));
}

#[test]
fn print_schema_ids_lists_generated_schemas() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("print-schema-ids")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zonefence.report.v1"));
    assert!(stdout.contains("zonefence.rule-file.v1"));
}

#[test]
fn unknown_command_fails() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe).arg("nope").output().expect("run xtask");
    assert!(!output.status.success());
}
