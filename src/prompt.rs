//! Prompt loading.

use crate::error::{AzEditError, Result};
use std::path::{Path, PathBuf};

/// Where a prompt came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// Given directly on the command line.
    Inline,
    /// Read from a file.
    File(PathBuf),
}

/// Resolves a prompt argument: if it names an existing regular file, the
/// file's contents are the prompt; otherwise the argument itself is.
pub fn load_prompt(arg: &str) -> Result<(String, PromptSource)> {
    if arg.is_empty() {
        return Err(AzEditError::InvalidRequest("prompt is required".into()));
    }

    let path = Path::new(arg);
    if path.is_file() {
        let text = String::from_utf8_lossy(&std::fs::read(path)?).into_owned();
        if text.is_empty() {
            return Err(AzEditError::InvalidRequest(format!(
                "prompt file {} is empty",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), chars = text.len(), "loaded prompt from file");
        return Ok((text, PromptSource::File(path.to_path_buf())));
    }

    Ok((arg.to_string(), PromptSource::Inline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_prompt() {
        let (text, source) = load_prompt("a cat wearing a hat").unwrap();
        assert_eq!(text, "a cat wearing a hat");
        assert_eq!(source, PromptSource::Inline);
    }

    #[test]
    fn test_prompt_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speaking-prompt.md");
        std::fs::write(&path, "# Scene\nA person speaking on stage\n").unwrap();

        let (text, source) = load_prompt(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "# Scene\nA person speaking on stage\n");
        assert_eq!(source, PromptSource::File(path));
    }

    #[test]
    fn test_directory_is_treated_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let arg = dir.path().to_str().unwrap();
        let (text, source) = load_prompt(arg).unwrap();
        assert_eq!(text, arg);
        assert_eq!(source, PromptSource::Inline);
    }

    #[test]
    fn test_non_utf8_prompt_file_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"caf\xe9 on a terrace").unwrap();

        let (text, _) = load_prompt(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "caf\u{FFFD} on a terrace");
    }

    #[test]
    fn test_whitespace_prompt_is_sent_as_is() {
        let (text, source) = load_prompt("  ").unwrap();
        assert_eq!(text, "  ");
        assert_eq!(source, PromptSource::Inline);
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(matches!(
            load_prompt(""),
            Err(AzEditError::InvalidRequest(_))
        ));

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            load_prompt(file.path().to_str().unwrap()),
            Err(AzEditError::InvalidRequest(_))
        ));
    }
}
