use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

fn cli_path() -> Option<PathBuf> {
    std::env::var_os("CARGO_BIN_EXE_viewbind").map(Into::into)
}

const ROUND: &str = r#"{
  "types": [
    {
      "name": "demo.Screen",
      "members": [
        {
          "name": "submit",
          "kind": "method",
          "return_type": "void",
          "annotations": [ { "name": "OnClick", "values": { "value": [ 2 ] } } ]
        }
      ]
    }
  ]
}"#;

#[test]
fn generate_writes_companion_and_exits_cleanly() {
    let Some(cli) = cli_path() else {
        eprintln!("Skipping generate test: CLI binary unavailable");
        return;
    };

    let dir = tempdir().expect("create temp dir");
    let round = dir.path().join("round.json");
    fs::write(&round, ROUND).expect("write round");
    let out = dir.path().join("out");

    let output = Command::new(cli)
        .arg("generate")
        .arg(&round)
        .arg("--output")
        .arg(&out)
        .arg("--release")
        .output()
        .expect("invoke viewbind generate");

    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated demo.Screen_ViewBinding"), "{stdout}");

    let source = fs::read_to_string(out.join("demo/Screen_ViewBinding.java")).expect("read output");
    assert!(source.contains("view = source.findViewById(2);"), "{source}");
}

#[test]
fn check_fails_on_invalid_binding() {
    let Some(cli) = cli_path() else {
        eprintln!("Skipping check test: CLI binary unavailable");
        return;
    };

    let dir = tempdir().expect("create temp dir");
    let round = dir.path().join("round.json");
    fs::write(&round, ROUND.replace("\"return_type\": \"void\"", "\"return_type\": \"int\""))
        .expect("write round");

    let output = Command::new(cli)
        .arg("check")
        .arg(&round)
        .output()
        .expect("invoke viewbind check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("@OnClick methods must have a 'void' return type."),
        "expected return-type error, got:\n{stderr}"
    );
}
