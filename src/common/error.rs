use std::fmt;
use std::io;

/// Errors produced anywhere in the engine: catalog/config loading, the
/// buffered page access layer, and the selection/join operators.
#[derive(Debug)]
pub enum Error {
    /// `sel`/`join` was asked for a table name absent from the catalog.
    UnknownTable(String),
    /// The page buffer swept a full revolution without decrementing a single
    /// slot's `use` count or finding a victim: every slot is pinned.
    BufferExhausted,
    /// A caller passed an out-of-range attribute index or similarly invalid
    /// argument to an operator.
    InvalidInput(String),
    /// The loaded configuration is not internally consistent (e.g. page size
    /// too small to hold a single tuple of some table).
    InvalidConfig(String),
    /// The catalog source could not be parsed into well-formed entries.
    InvalidCatalog(String),
    /// A page or table file could not be opened, seeked, or read/decoded.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTable(name) => write!(f, "unknown table '{name}'"),
            Error::BufferExhausted => {
                write!(f, "buffer exhausted: every slot is pinned, cannot evict")
            }
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Error::InvalidCatalog(msg) => write!(f, "invalid catalog: {msg}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds an `Err(Error::InvalidInput(..))` from a format string, the way
/// `errinput!` is used throughout the rest of this crate's ancestry.
#[macro_export]
macro_rules! errinput {
    ($($arg:tt)*) => {
        Err($crate::common::Error::InvalidInput(format!($($arg)*)))
    };
}
