#![warn(missing_docs)]
//! optrace specific error structures
use std::{error::Error, fmt::Display};

/// optrace specific Result type
pub type OptResult<T> = std::result::Result<T, OptraceError>;

/// Errors that can be returned by various optrace functions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OptraceError {
    /// errors while constructing a geometric surface or another scene element
    Geometry(String),
    /// errors while constructing a ray or a ray source
    Source(String),
    /// runtime errors occuring while tracing rays through a scene
    Analysis(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for OptraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Source(m) => {
                write!(f, "Source:{m}")
            }
            Self::Analysis(m) => {
                write!(f, "Analysis:{m}")
            }
            Self::Other(m) => write!(f, "Optrace Error:Other:{m}"),
        }
    }
}
impl Error for OptraceError {}

impl std::convert::From<String> for OptraceError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = OptraceError::from("test".to_string());
        assert_eq!(error, OptraceError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", OptraceError::Geometry("test".to_string())),
            "Geometry:test"
        );
        assert_eq!(
            format!("{}", OptraceError::Source("test".to_string())),
            "Source:test"
        );
        assert_eq!(
            format!("{}", OptraceError::Analysis("test".to_string())),
            "Analysis:test"
        );
        assert_eq!(
            format!("{}", OptraceError::Other("test".to_string())),
            "Optrace Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", OptraceError::Geometry("test".to_string())),
            "Geometry(\"test\")"
        );
    }
}
