use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

fn du(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_du"))
        .args(args)
        .current_dir(cwd)
        .env_remove("DU_LOG")
        .output()
        .expect("run du binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn size_of_line(line: &str) -> u64 {
    line.split_whitespace().next().unwrap().parse().unwrap()
}

#[test]
fn test_all_with_summarize_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let output = du(&["-a", "-s"], dir.path());

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("cannot both summarize and show all entries"));
}

#[test]
fn test_bytes_scenario() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("D")).unwrap();
    fs::write(dir.path().join("D").join("a"), vec![0u8; 1500]).unwrap();
    fs::create_dir(dir.path().join("D").join("B")).unwrap();

    let output = du(&["-b", "D"], dir.path());
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "1500    D");
    assert_eq!(size_of_line(&lines[0]), 0);
    assert!(lines[0].ends_with('B'));
}

#[test]
fn test_relative_glob_reports_each_match() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), vec![0u8; 10]).unwrap();
    fs::write(dir.path().join("y.txt"), vec![0u8; 20]).unwrap();
    fs::write(dir.path().join("notes.md"), vec![0u8; 99]).unwrap();

    let output = du(&["-b", "*.txt"], dir.path());
    assert!(output.status.success());

    let mut lines = stdout_lines(&output);
    lines.sort();
    assert_eq!(lines, vec!["10      x.txt", "20      y.txt"]);
}

#[test]
fn test_no_arguments_measures_current_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("f"), vec![0u8; 300]).unwrap();
    fs::write(dir.path().join("g"), vec![0u8; 200]).unwrap();

    let output = du(&["-b"], dir.path());
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(size_of_line(&lines[0]), 300);
    assert_eq!(size_of_line(&lines[1]), 500);
}

#[test]
fn test_missing_target_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("present"), vec![0u8; 5]).unwrap();

    let output = du(&["-b", "absent", "present"], dir.path());
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["5       present"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("\"absent\""));
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = du(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--summarize"));
    for alias in ["(/a)", "(/b)", "(/h)", "(/s)", "(/?)", "(/v)"] {
        assert!(stdout.contains(alias), "missing {alias} in help");
    }
    assert!(stdout.contains("1 kilobyte = 1024 bytes"));
}

#[test]
fn test_glob_without_match_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.log"), vec![0u8; 3]).unwrap();

    let output = du(&["-b", "*.txt", "a.log"], dir.path());
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["3       a.log"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("du: failed to get handle for pattern"));
    assert!(stderr.contains("*.txt"));
}
