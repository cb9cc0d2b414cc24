use thiserror::Error;

/// Route registration errors returned by [`PathTree::insert`](crate::PathTree::insert).
///
/// Every variant carries the offending pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("Empty pattern: {0:?} must start with '/'")]
    EmptyPattern(String),

    #[error("Catch-all must be the final segment: {0}")]
    CatchAllNotFinal(String),

    #[error("Invalid parameter name {name:?} in pattern: {pattern}")]
    InvalidParameterName { pattern: String, name: String },

    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),

    #[error("Conflicting route: {0}")]
    ConflictingRoute(String),

    #[error("Parameter name conflict in {pattern}: {name:?} clashes with existing {existing:?}")]
    ParameterNameConflict {
        pattern: String,
        name: String,
        existing: String,
    },
}

impl InsertError {
    /// The pattern that failed to insert
    pub fn pattern(&self) -> &str {
        match self {
            InsertError::EmptyPattern(p)
            | InsertError::CatchAllNotFinal(p)
            | InsertError::DuplicateRoute(p)
            | InsertError::ConflictingRoute(p) => p,
            InsertError::InvalidParameterName { pattern, .. }
            | InsertError::ParameterNameConflict { pattern, .. } => pattern,
        }
    }
}

/// No registered pattern matches the path.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("No route matches the path")]
pub struct NotFound;

/// Route table and router errors
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Route error at line {line}: {source}")]
    RouteError {
        line: usize,
        #[source]
        source: InsertError,
    },

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, RouterError>;
