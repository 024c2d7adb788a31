use crate::codec::Ty;
use crate::parse::error::ParseError;

/// Failure to reconstruct a typed value from a packed byte-sequence
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The packed bytes were not a well-formed encoding of the expected type
    Parse(ParseError),
    /// A payload was too long to be described by a 4-byte length prefix
    Oversize { length: usize },
    /// The packer returned a value of a different type than was requested
    Mismatch { expected: Ty, actual: Ty },
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Parse(err) => {
                write!(f, "parser encountered error: {}", err)
            }
            DecodeError::Oversize { length } => {
                write!(
                    f,
                    "{}-byte payload does not fit a 4-byte length prefix",
                    length
                )
            }
            DecodeError::Mismatch { expected, actual } => {
                write!(f, "expected a value of type {}, found {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(err) => Some(err),
            DecodeError::Oversize { .. } | DecodeError::Mismatch { .. } => None,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod test {
    fn dummy<T: Send + Sync>() {}

    #[test]
    fn decode_error_threadsafe() {
        dummy::<super::DecodeError>()
    }
}
