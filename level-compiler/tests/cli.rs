use std::path::Path;
use std::process::{Command, Output};

fn mapcompile(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapcompile"))
        .args(args)
        .output()
        .expect("failed to run mapcompile")
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn no_arguments_prints_usage_and_exits_with_one() {
    let output = mapcompile(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn single_level_goes_to_stdout() {
    let output = mapcompile(&[fixture("ones.tmx").as_path()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("var levels={\n\t ones: { map: [0,0,"));
    assert!(stdout.ends_with(",] },\n}\n"));
}

#[test]
fn too_small_map_exits_with_failure() {
    let output = mapcompile(&[fixture("small.tmx").as_path()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("small"));
}
