//! Application error type.
//!
//! Every failure in the pipeline is reported as an `AppError` carrying:
//!
//! - a coarse error class (`ErrorKind`) with a stable process exit code
//! - a human-readable message with the failing line number (ingest errors)
//!   or column index (fit/config errors) already baked in
//!
//! Nothing is recovered locally: the binary prints the message to stderr and
//! exits with the class's code.

/// Error classes recognized by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input file cannot be opened or read.
    Io,
    /// A non-comment line contains a token that is not a finite float.
    Parse,
    /// A data row's width disagrees with the rest of the table.
    Shape,
    /// Labels, gating column, or target columns do not match the table.
    ConfigMismatch,
    /// Fewer than 2 rows survive the gating filter (or the sample is degenerate).
    InsufficientData,
    /// A retained value is outside the domain of the log transform.
    Domain,
    /// Terminal/rendering failures outside the numeric pipeline.
    Render,
}

impl ErrorKind {
    /// Stable process exit code for this class.
    ///
    /// 2 = input/config problems, 3 = not enough data to fit,
    /// 4 = numeric domain violations and terminal failures.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Io | ErrorKind::Parse | ErrorKind::Shape | ErrorKind::ConfigMismatch => 2,
            ErrorKind::InsufficientData => 3,
            ErrorKind::Domain | ErrorKind::Render => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
