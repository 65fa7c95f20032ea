//! The errors reported by a `SpringSystem`.

/// The ways in which an operation on a `SpringSystem` can fail.
#[derive(Debug, thiserror::Error)]
pub enum SpringSysError {
    /// A malformed argument, e.g. a dimensionality outside `1..=3` or a source that could not be opened.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An entity that would break an invariant of the system was rejected. The system is left unchanged.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// A system could not be constructed while loading.
    #[error("Could not construct the system: {0}")]
    Construction(String),
    /// Persisted data that is malformed or inconsistent.
    #[error("Invalid data: {0}")]
    CorruptData(String),
    /// An I/O error while reading or writing a persisted system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpringSysError {
    /// Returns the numeric code of the error.
    ///
    /// - `1`: invalid arguments, including I/O failures.
    /// - `2`: the system could not be constructed.
    /// - `3`: invalid data, including rejected entities.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::Io(_) => 1,
            Self::Construction(_) => 2,
            Self::Validation(_) | Self::CorruptData(_) => 3,
        }
    }
}

impl From<SpringSysError> for String {
    fn from(e: SpringSysError) -> Self {
        e.to_string()
    }
}
