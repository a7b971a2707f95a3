//! Integration Tests

extern crate assert_cli;
extern crate tempdir;

use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cli::Assert;
use tempdir::TempDir;

fn smsh() -> Assert {
    Assert::cargo_binary("smsh")
}

fn generate_temp_directory() -> io::Result<TempDir> {
    // Because of limitation in `assert_cli`, temporary directory must be
    // subdirectory of directory containing Cargo.toml
    let temp_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
    TempDir::new_in(temp_root, "temp")
}

fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("failed to create script");
    file.write_all(contents.as_bytes())
        .expect("failed to write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to mark script executable");
    path
}

#[test]
fn version_flag_reports_version() {
    smsh()
        .with_args(&["--version"])
        .stdout()
        .contains("smsh version")
        .succeeds()
        .unwrap();
}

#[test]
fn command_string_runs_a_program() {
    smsh()
        .with_args(&["-c", "echo hello"])
        .stdout()
        .contains("hello")
        .succeeds()
        .unwrap();
}

#[test]
fn status_defaults_to_exit_value_zero() {
    smsh()
        .with_args(&["-c", "status"])
        .stdout()
        .contains("exit value 0")
        .succeeds()
        .unwrap();
}

#[test]
fn comment_lines_produce_no_output() {
    smsh()
        .with_args(&["-c", "# this is ignored"])
        .stdout()
        .is("")
        .succeeds()
        .unwrap();
}

#[test]
fn status_reflects_failed_foreground_command() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = write_script(temp_dir.path(), "failing.smsh", "false\nstatus\n");

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("exit value 1")
        .succeeds()
        .unwrap();
}

#[test]
fn status_reports_nonzero_exit_value() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let helper = write_script(temp_dir.path(), "exit7.sh", "#!/bin/sh\nexit 7\n");
    let script = write_script(
        temp_dir.path(),
        "run.smsh",
        &format!("{}\nstatus\n", helper.display()),
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("exit value 7")
        .succeeds()
        .unwrap();
}

#[test]
fn status_reports_terminating_signal() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let helper = write_script(temp_dir.path(), "kill9.sh", "#!/bin/sh\nkill -9 $$\n");
    let script = write_script(
        temp_dir.path(),
        "run.smsh",
        &format!("{}\nstatus\n", helper.display()),
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("terminated by signal 9")
        .succeeds()
        .unwrap();
}

#[test]
fn output_redirection_creates_and_fills_file() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let outfile = temp_dir.path().join("out.txt");
    let script = write_script(
        temp_dir.path(),
        "redirect.smsh",
        &format!("echo needle > {}\n", outfile.display()),
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .succeeds()
        .unwrap();

    let contents = fs::read_to_string(&outfile).expect("redirected output file missing");
    assert_eq!(contents, "needle\n");
}

#[test]
fn input_redirection_feeds_stdin() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let infile = temp_dir.path().join("in.txt");
    fs::write(&infile, "from the file\n").expect("failed to write input file");

    smsh()
        .with_args(&["-c", &format!("cat < {}", infile.display())])
        .stdout()
        .contains("from the file")
        .succeeds()
        .unwrap();
}

#[test]
fn missing_input_file_fails_the_command_not_the_shell() {
    smsh()
        .with_args(&["-c", "cat < /no/such/input/file"])
        .stderr()
        .contains("cannot open")
        .succeeds()
        .unwrap();
}

#[test]
fn unknown_program_is_reported_without_killing_the_shell() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = write_script(
        temp_dir.path(),
        "unknown.smsh",
        "definitely-not-a-program\nstatus\n",
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("exit value 1")
        .stderr()
        .contains("definitely-not-a-program")
        .succeeds()
        .unwrap();
}

#[test]
fn cd_changes_the_working_directory() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = write_script(
        temp_dir.path(),
        "cd.smsh",
        &format!("cd {}\npwd\n", temp_dir.path().display()),
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains(temp_dir.path().to_str().unwrap())
        .succeeds()
        .unwrap();
}

#[test]
fn cd_to_missing_directory_reports_error() {
    smsh()
        .with_args(&["-c", "cd /no/such/dir/smsh"])
        .stderr()
        .contains("cd: ")
        .succeeds()
        .unwrap();
}

#[test]
fn background_job_announces_its_pid() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = write_script(temp_dir.path(), "background.smsh", "sleep 30 &\nexit\n");

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("Background PID is")
        .succeeds()
        .unwrap();
}

#[test]
fn finished_background_job_is_announced_before_the_next_command() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = write_script(
        temp_dir.path(),
        "reap.smsh",
        "true &\nsleep 1\nstatus\n",
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .stdout()
        .contains("is done: exit status 0")
        .succeeds()
        .unwrap();
}

#[test]
fn pid_expansion_yields_a_number() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let outfile = temp_dir.path().join("pid.txt");
    let script = write_script(
        temp_dir.path(),
        "pid.smsh",
        &format!("echo $$ > {}\n", outfile.display()),
    );

    smsh()
        .with_args(&[script.to_str().unwrap()])
        .succeeds()
        .unwrap();

    let contents = fs::read_to_string(&outfile).expect("redirected output file missing");
    assert!(
        contents.trim().parse::<u32>().is_ok(),
        "expected a pid, got: {:?}",
        contents
    );
}
