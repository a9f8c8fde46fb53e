use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfig,
    InputNotFound,
    MalformedCsv,
    CourseNotFound,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidConfig => "E1002",
            Self::InputNotFound => "E2001",
            Self::MalformedCsv => "E2002",
            Self::CourseNotFound => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfig => "Invalid ranking parameters",
            Self::InputNotFound => "Input file not readable",
            Self::MalformedCsv => "Malformed CSV row",
            Self::CourseNotFound => "Course not found",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in keystone.toml and retry."),
            Self::InvalidConfig => {
                Some("Use a damping factor in (0, 1) and a positive, finite tolerance.")
            }
            Self::InputNotFound => Some("Check the path passed to --edges / --courses."),
            Self::MalformedCsv => {
                Some("Each edge row needs two columns: prerequisite,course.")
            }
            Self::CourseNotFound => Some("Run `ks rank` to list known course ids."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading inputs and configuration.
///
/// The ranking engine itself is infallible; everything here happens on the
/// way in.
#[derive(Debug, thiserror::Error)]
pub enum KeystoneError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::ProjectConfig`].
    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Ranking parameters are outside their valid range.
    #[error("invalid ranking parameters: {0}")]
    InvalidConfig(String),

    /// A CSV row could not be interpreted.
    #[error("{source_name}:{line}: {reason}")]
    MalformedRow {
        source_name: String,
        /// 1-based line number.
        line: usize,
        reason: String,
    },

    /// A lookup by course id failed.
    #[error("course not found: {0}")]
    CourseNotFound(String),
}

impl KeystoneError {
    /// The stable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputNotFound,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::MalformedRow { .. } => ErrorCode::MalformedCsv,
            Self::CourseNotFound(_) => ErrorCode::CourseNotFound,
        }
    }

    /// Remediation hint, falling back to the code's generic message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, KeystoneError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InvalidConfig,
            ErrorCode::InputNotFound,
            ErrorCode::MalformedCsv,
            ErrorCode::CourseNotFound,
            ErrorCode::InternalUnexpected,
        ];
        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::MalformedCsv.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn malformed_row_mentions_line() {
        let err = KeystoneError::MalformedRow {
            source_name: "edges.csv".into(),
            line: 7,
            reason: "expected 2 columns".into(),
        };
        assert_eq!(err.to_string(), "edges.csv:7: expected 2 columns");
        assert_eq!(err.error_code(), ErrorCode::MalformedCsv);
        assert!(err.suggestion().contains("prerequisite,course"));
    }

    #[test]
    fn course_not_found_has_hint() {
        let err = KeystoneError::CourseNotFound("CS999".into());
        assert_eq!(err.error_code().to_string(), "E3001");
        assert!(err.suggestion().contains("ks rank"));
    }
}
