//! End-to-end tests for `zonefence check`, `rules`, `md` and `explain` against fixture projects.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn zonefence_cmd() -> Command {
    let mut cmd = Command::cargo_bin("zonefence").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Fixture projects live at the workspace root under tests/fixtures.
fn fixture(name: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .expect("workspace root")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = zonefence_cmd().args(args).output().expect("run zonefence");
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn clean_project_passes() {
    zonefence_cmd()
        .args(["check", "--no-color"])
        .arg(fixture("clean"))
        .assert()
        .code(0)
        .stdout(contains("Checking import boundaries in:"))
        .stdout(contains("✓ No import boundary violations found"))
        .stdout(contains("Checked 5 imports across 3 files"));
}

#[test]
fn layered_project_reports_violations() {
    zonefence_cmd()
        .args(["check", "--no-color"])
        .arg(fixture("layered"))
        .assert()
        .code(1)
        .stdout(contains("src/domain/user.ts"))
        .stdout(contains("2:1  error  Import from \"react\" is not allowed  (import-boundary)"))
        .stdout(contains("Design intent: Domain must stay framework free"))
        .stdout(contains("Use the shared http client"))
        .stdout(contains("Import from \"../api/cart\" is not allowed"))
        .stdout(contains("lodash").not())
        .stdout(contains("✖ 3 errors in 3 files"));
}

#[test]
fn json_report_has_stable_shape() {
    let path = fixture("layered");
    let report = json_stdout(&["check", "--format", "json", path.to_str().expect("utf8")]);

    assert_eq!(report["schema"], "zonefence.report.v1");
    assert_eq!(report["tool"]["name"], "zonefence");
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["data"]["files_checked"], 6);
    assert_eq!(report["data"]["imports_checked"], 9);
    assert_eq!(report["data"]["violations_total"], 3);

    let violations = report["violations"].as_array().expect("violations array");
    let summary: Vec<(&str, &str, &str)> = violations
        .iter()
        .map(|v| {
            (
                v["source_file"].as_str().unwrap_or_default(),
                v["module_specifier"].as_str().unwrap_or_default(),
                v["code"].as_str().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("src/domain/user.ts", "react", "denied_import"),
            ("src/features/cart/api/cart.ts", "axios", "denied_import"),
            (
                "src/features/cart/components/CartView.tsx",
                "../api/cart",
                "denied_import"
            ),
        ]
    );
    assert_eq!(
        violations[2]["rule_file_path"],
        "src/.zonefence.toml",
        "pattern-only directories point at the declaring rule file"
    );
    assert!(violations.iter().all(|v| v["fingerprint"].is_string()));
}

#[test]
fn report_out_writes_json_and_md_renders_it() {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("artifacts/report.json");
    let md_path = tmp.path().join("comment.md");

    zonefence_cmd()
        .args(["check", "--no-color", "--report-out"])
        .arg(&report_path)
        .arg(fixture("layered"))
        .assert()
        .code(1);

    let text = std::fs::read_to_string(&report_path).expect("report written");
    let report: serde_json::Value = serde_json::from_str(&text).expect("report json");
    assert_eq!(report["verdict"], "fail");

    zonefence_cmd()
        .args(["md", "--report"])
        .arg(&report_path)
        .arg("--output")
        .arg(&md_path)
        .assert()
        .success();

    let md = std::fs::read_to_string(&md_path).expect("markdown written");
    assert!(md.contains("# Zonefence report"));
    assert!(md.contains("Verdict: **FAIL**"));
    assert!(md.contains("### `src/features/cart/api/cart.ts`"));
}

#[test]
fn github_format_emits_annotations() {
    zonefence_cmd()
        .args(["check", "--format", "github"])
        .arg(fixture("layered"))
        .assert()
        .code(1)
        .stdout(contains(
            "::error file=src/features/cart/api/cart.ts,line=2,col=1::[import-boundary:denied_import] Use the shared http client",
        ));
}

#[test]
fn rules_lists_pattern_only_directories() {
    let path = fixture("layered");
    let rules = json_stdout(&["rules", "--format", "json", path.to_str().expect("utf8")]);
    let dirs: Vec<&str> = rules
        .as_array()
        .expect("rules array")
        .iter()
        .filter_map(|r| r["directory"].as_str())
        .collect();
    assert_eq!(
        dirs,
        vec![
            "src",
            "src/app",
            "src/domain",
            "src/features/cart/components"
        ]
    );

    zonefence_cmd()
        .arg("rules")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("scope: self, mode: allow-first"))
        .stdout(contains("pattern: features/*/components (priority 10, merge)"));
}

#[test]
fn missing_path_is_an_error() {
    zonefence_cmd()
        .args(["check", "definitely/not/here"])
        .assert()
        .code(2)
        .stderr(contains("zonefence error:"))
        .stderr(contains("definitely/not/here"));
}

#[test]
fn invalid_rule_file_is_an_error() {
    let tmp = TempDir::new().expect("temp dir");
    std::fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
    std::fs::write(
        tmp.path().join("src/.zonefence.toml"),
        "version = 1\n[imports]\nmode = \"strict\"\n",
    )
    .expect("write rule file");
    std::fs::write(tmp.path().join("src/index.ts"), "import a from \"a\";\n").expect("write");

    zonefence_cmd()
        .arg("check")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(contains("zonefence error:"))
        .stderr(contains(".zonefence.toml"));
}

#[test]
fn explain_known_and_unknown_identifiers() {
    zonefence_cmd()
        .args(["explain", "not-in-allow-list"])
        .assert()
        .success()
        .stdout(contains("Not In Allow List (not_in_allow_list)"))
        .stdout(contains("Remediation"));

    zonefence_cmd()
        .args(["explain", "nope"])
        .assert()
        .code(1)
        .stderr(contains("Unknown rule or code: nope"))
        .stderr(contains("Did you mean").not())
        .stderr(contains("import-boundary"));

    zonefence_cmd()
        .args(["explain", "boundary"])
        .assert()
        .code(1)
        .stderr(contains("Did you mean `import-boundary`?"));
}
