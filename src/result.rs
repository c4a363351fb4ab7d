//! Error and result types shared by every estimator
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// One or more of the supplied arguments violates a precondition
    InvalidArgument,
    /// A sampler gave up after reaching its maximum number of attempts
    ResourceExhausted,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::ResourceExhausted => "resource exhausted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised synchronously by an estimator before (or instead of)
/// producing an estimate.
///
/// # Example
///
/// ```
/// use montecarlo::{estimate_pi, ErrorKind};
///
/// let mut rng = rand::thread_rng();
/// let err = estimate_pi(0, &mut rng).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            msg: String::from(msg),
            kind,
        }
    }

    /// Shorthand for an `InvalidArgument` error
    pub fn invalid_argument(msg: &str) -> Self {
        Error::new(ErrorKind::InvalidArgument, msg)
    }

    /// Shorthand for a `ResourceExhausted` error
    pub fn resource_exhausted(msg: &str) -> Self {
        Error::new(ErrorKind::ResourceExhausted, msg)
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
