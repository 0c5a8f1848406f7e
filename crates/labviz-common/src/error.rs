//! Workspace-wide error type.

/// Common result type for LabViz.
pub type Result<T> = std::result::Result<T, LabVizError>;

/// Errors raised while building or rendering a figure.
#[derive(thiserror::Error, Debug)]
pub enum LabVizError {
    /// More rules were requested than the rule table holds.
    #[error("Index out of range: requested {requested} rules but only {available} are available")]
    IndexOutOfRange {
        /// Number of rules requested.
        requested: usize,
        /// Number of rules supplied.
        available: usize,
    },

    /// The x values and the two series disagree on length.
    #[error("Length mismatch: x has {x} values, y1 has {y1}, y2 has {y2}")]
    LengthMismatch {
        /// Length of the shared x values.
        x: usize,
        /// Length of the left-axis series.
        y1: usize,
        /// Length of the right-axis series.
        y2: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing backend error.
    #[error("Render error: {0}")]
    Render(String),

    /// Image encoding error.
    #[error("Encode error: {0}")]
    Encode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LabVizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LabVizError::IndexOutOfRange {
            requested: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Index out of range: requested 10 rules but only 3 are available"
        );

        let err = LabVizError::LengthMismatch { x: 3, y1: 3, y2: 2 };
        assert_eq!(
            err.to_string(),
            "Length mismatch: x has 3 values, y1 has 3, y2 has 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LabVizError = io.into();
        assert!(matches!(err, LabVizError::Io(_)));
    }
}
