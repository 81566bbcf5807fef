use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("upgma-{}-{name}", std::process::id()))
}

#[test]
fn run_prints_bracket_and_writes_dot_file() {
    let input = scratch_path("complete.txt");
    let output = scratch_path("complete.dot");
    fs::write(&input, "a b 1.5\na c 1.5\nb c 1.5\n").unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_upgma"))
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout), "((a,b),c)\n");
    let dot = fs::read_to_string(&output).unwrap();
    assert!(dot.starts_with("graph tree {\n"));
    assert!(dot.contains("a0 -- ab1"));

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn incomplete_matrix_exits_non_zero_without_writing_output() {
    let input = scratch_path("incomplete.txt");
    let output = scratch_path("incomplete.dot");
    // a, b and c are all mentioned but the (b, c) pair is missing.
    fs::write(&input, "a b 1.0\na c 1.0\n").unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_upgma"))
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Missing pairwise distance"));
    assert!(!output.exists());

    fs::remove_file(&input).ok();
}

#[test]
fn unreadable_input_exits_non_zero_without_writing_output() {
    let input = scratch_path("does-not-exist.txt");
    let output = scratch_path("unreadable.dot");

    let result = Command::new(env!("CARGO_BIN_EXE_upgma"))
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to read"));
    assert!(!output.exists());
}
