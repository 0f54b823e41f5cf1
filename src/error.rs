use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by dictionary operations.
#[derive(Error, Debug)]
pub enum SynonymError {
    #[error("{}: {error}", .path.display())]
    Io { path: PathBuf, error: std::io::Error },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{0} not present")]
    NotFound(String),

    #[error("{synonym} is not a synonym of {word}")]
    SynonymNotFound { word: String, synonym: String },

    #[error("{synonym} is already a synonym of {word}")]
    DuplicateSynonym { word: String, synonym: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl SynonymError {
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io { path: path.into(), error }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }

    /// Process exit code the CLI reports for this error.
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) | Self::SynonymNotFound { .. } => 5,
            Self::Parse { .. } => 3,
            Self::Io { .. } => 4,
            Self::DuplicateSynonym { .. } | Self::InvalidRecord(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SynonymError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_item() {
        let e = SynonymError::NotFound("dog".into());
        assert_eq!(e.to_string(), "dog not present");

        let e = SynonymError::SynonymNotFound { word: "dog".into(), synonym: "cat".into() };
        assert_eq!(e.to_string(), "cat is not a synonym of dog");

        let e = SynonymError::parse(3, "missing '|'");
        assert_eq!(e.to_string(), "line 3: missing '|'");
    }

    #[test]
    fn exit_codes_separate_failure_kinds() {
        let io = SynonymError::io("x.txt", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(io.exit_code(), 4);
        assert!(io.to_string().starts_with("x.txt: "));
        assert_eq!(SynonymError::NotFound("a".into()).exit_code(), 5);
        let missing = SynonymError::SynonymNotFound { word: "a".into(), synonym: "b".into() };
        assert_eq!(missing.exit_code(), 5);
        assert_eq!(SynonymError::parse(1, "bad").exit_code(), 3);
        assert_eq!(SynonymError::InvalidRecord("empty".into()).exit_code(), 1);
    }
}
