//! GitHub Actions step outputs.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where `name=value` outputs go: the `GITHUB_OUTPUT` file when the runner
/// provides one, otherwise workflow commands on stdout.
#[derive(Debug, Clone)]
pub enum OutputSink {
    File(PathBuf),
    Stdout,
}

impl OutputSink {
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => OutputSink::File(PathBuf::from(path)),
            _ => OutputSink::Stdout,
        }
    }

    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match self {
            OutputSink::File(path) => append_output(path, name, value),
            OutputSink::Stdout => {
                println!("::set-output name={}::{}", name, escape_command_value(value));
                Ok(())
            }
        }
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    // the heredoc form survives newlines in the value
    let delimiter = delimiter_for(value);
    writeln!(file, "{name}<<{delimiter}")?;
    writeln!(file, "{value}")?;
    writeln!(file, "{delimiter}")?;
    Ok(())
}

fn delimiter_for(value: &str) -> String {
    let mut delimiter = String::from("ghadelimiter");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}

fn escape_command_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_outputs_use_heredoc() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = OutputSink::File(file.path().to_path_buf());

        sink.set_output("token", "abc+\\").unwrap();
        sink.set_output("cookie", "a=1; b=2").unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            written,
            "token<<ghadelimiter\nabc+\\\nghadelimiter\ncookie<<ghadelimiter\na=1; b=2\nghadelimiter\n"
        );
    }

    #[test]
    fn test_delimiter_avoids_value() {
        assert_eq!(delimiter_for("plain"), "ghadelimiter");
        assert_eq!(delimiter_for("x ghadelimiter y"), "ghadelimiter_");
    }

    #[test]
    fn test_escape_command_value() {
        assert_eq!(escape_command_value("50%\nnext"), "50%25%0Anext");
    }
}
