mod common;

use common::{run_ytdigest, TestEnv};

#[test]
fn ytdigest_help_shows_usage() {
    let output = run_ytdigest(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("summarize"));
    assert!(stdout.contains("transcript"));
}

#[test]
fn ytdigest_version_shows_version() {
    let output = run_ytdigest(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("ytdigest "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_ytdigest(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("ytdigest"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_prints_defaults() {
    let output = run_ytdigest(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("[summary]"));
    assert!(stdout.contains("gpt-3.5-turbo"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_ytdigest(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_writes_file_and_refuses_to_overwrite() {
    let env = TestEnv::new();
    let path = env.config_path();

    let output = env.run(&["config", "init"]);
    assert!(
        output.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(path.exists());

    let again = env.run(&["config", "init"]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn config_show_reads_written_file() {
    let env = TestEnv::new();
    env.write_config("[summary]\nlanguage = \"German\"\nmax_words = 80\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("language = \"German\""));
    assert!(stdout.contains("max_words = 80"));
}

#[test]
fn malformed_config_is_reported() {
    let env = TestEnv::new();
    env.write_config("[summary\nlanguage = ");

    let output = env.run(&["config", "show"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Failed to parse config file"),
        "expected parse error, got:\n{}",
        stderr
    );
}

#[test]
fn explicit_config_must_exist() {
    let env = TestEnv::new();
    let missing = env.scratch_path("missing.toml");
    let missing = missing.to_string_lossy();

    let output = env.run(&["--config", &missing, "summarize", "dQw4w9WgXcQ"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Config file not found"), "stderr:\n{}", stderr);
}
