use std::fmt;


pub type ColorResult<T> = Result<T, ColorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// malformed hex string, wrong channel count or unparsable number
    InvalidFormat(String),
    /// conflicting initialization
    InvalidArguments(String),
    /// alpha, channel or transparency out of bounds
    InvalidRange(String),
    /// compositing two translucent colors
    InvalidState(String),
}

impl ColorError {

    pub fn kind(&self) -> &'static str {
        match self {
            ColorError::InvalidFormat(_) => "invalid format",
            ColorError::InvalidArguments(_) => "invalid arguments",
            ColorError::InvalidRange(_) => "invalid range",
            ColorError::InvalidState(_) => "invalid state",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ColorError::InvalidFormat(m)
            | ColorError::InvalidArguments(m)
            | ColorError::InvalidRange(m)
            | ColorError::InvalidState(m) => m.as_str(),
        }
    }
}

impl fmt::Display for ColorError {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ColorError {}
