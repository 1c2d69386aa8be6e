//! PTY-based tests
//!
//! These tests use expectrl to spawn the CLI in a pseudo-terminal, so
//! output goes through a real tty the way a user would see it.

use expectrl::{spawn, Eof, Expect, Regex};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DOCUMENT: &str = r#"{
  "nodes": [
    {"id": "item-1", "data": {"label": "Setup", "fullText": "pip install x"}},
    {"id": "item-2", "data": {"label": "Run", "fullText": "x run"}}
  ],
  "edges": [{"source": "item-1", "target": "item-2"}]
}"#;

fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_codeflow"))
}

/// Wrap the binary in a script with a quiet, credential-free environment
fn write_script(dir: &Path, args: &[&str]) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let script_path = dir.join("run.sh");
    let script_content = format!(
        "#!/bin/sh\nexport CODEFLOW_LOG_LEVEL=off\nunset CODEFLOW_API_KEY OPENAI_API_KEY RUST_LOG NO_COLOR\nexec {} {}\n",
        cli_binary().display(),
        args.join(" ")
    );
    std::fs::write(&script_path, &script_content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(script_path)
}

/// Run a one-shot command and collect everything it prints
fn run_cli(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let script = write_script(dir, args)?;
    let mut session = spawn(script.to_str().unwrap())?;
    session.set_expect_timeout(Some(Duration::from_secs(10)));

    let mut output = String::new();
    loop {
        match session.expect(Eof) {
            Ok(found) => {
                output.push_str(&String::from_utf8_lossy(found.as_bytes()));
                break;
            }
            Err(expectrl::Error::ExpectTimeout) => {
                if let Ok(found) = session.expect(Regex(".+")) {
                    output.push_str(&String::from_utf8_lossy(found.as_bytes()));
                }
            }
            Err(_) => break,
        }
    }

    Ok(output)
}

#[test]
fn test_preview_colors_separator_on_tty() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("diagram.json");
    std::fs::write(&input, DOCUMENT).unwrap();

    let output = run_cli(dir.path(), &["preview", "-i", input.to_str().unwrap()])
        .expect("CLI should succeed");

    assert!(output.contains("pip install x"), "Output:\n{}", output);
    assert!(output.contains("x run"), "Output:\n{}", output);
    assert!(output.contains("\x1b["), "Separator should be colored:\n{:?}", output);
}

#[test]
fn test_preview_color_never() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("diagram.json");
    std::fs::write(&input, DOCUMENT).unwrap();

    let output = run_cli(
        dir.path(),
        &["preview", "-i", input.to_str().unwrap(), "--color", "never"],
    )
    .expect("CLI should succeed");

    assert!(!output.contains("\x1b["), "Output:\n{:?}", output);
    let lines: Vec<&str> = output.lines().map(str::trim_end).collect();
    let setup = lines.iter().position(|l| *l == "pip install x").unwrap();
    assert_eq!(lines[setup + 2], "---");
    assert_eq!(lines[setup + 4], "x run");
}

#[test]
fn test_formats_listing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["formats"]).expect("CLI should succeed");

    assert!(output.contains(".py"));
    assert!(output.contains("(default)"));
    assert!(output.contains("Total: 8 formats supported"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["preview", "-i", "/no/such/diagram.json"])
        .expect("CLI should run");

    assert!(output.contains("Error: Failed to read input file"), "Output:\n{}", output);
}

#[test]
fn test_interactive_session() {
    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("notes.txt");
    std::fs::write(&upload, "remember this").unwrap();

    let script = write_script(
        dir.path(),
        &["session", "--color", "never", "--dir", dir.path().to_str().unwrap()],
    )
    .unwrap();
    let mut session = spawn(script.to_str().unwrap()).unwrap();
    session.set_expect_timeout(Some(Duration::from_secs(10)));

    session.expect("Type `help` for commands.").unwrap();

    session
        .send_line(&format!("upload {}", upload.display()))
        .unwrap();
    session.expect("Uploaded notes.txt as file-1").unwrap();

    session.send_line("prompt write a parser").unwrap();
    session.expect("Prompt set").unwrap();

    session.send_line("create").unwrap();
    session
        .expect("Error fetching completion response: Missing API credential")
        .unwrap();

    session.send_line("items").unwrap();
    session.expect("No items yet").unwrap();

    session.send_line("format tsx").unwrap();
    session.expect("Export format set to .tsx").unwrap();

    session.send_line("download").unwrap();
    session.expect("Saved").unwrap();

    session.send_line("quit").unwrap();
    session.expect(Eof).unwrap();

    let exported = std::fs::read_to_string(dir.path().join("flow-diagram.tsx")).unwrap();
    assert_eq!(exported, "");
}
