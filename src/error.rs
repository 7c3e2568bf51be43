use crate::record::Field;

/// An error that occured while decoding a record.
///
/// Decoding is all-or-nothing: no field is returned when any of these occur.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    /// The buffer does not even hold the presence bitmap.
    MalformedRecord,
    /// The bitmap announces `field`, but the buffer ends before it does.
    TruncatedRecord {
        field: Field,
        needed: usize,
        available: usize,
    },
    /// Bytes remain after the last announced field, and the decoder was
    /// configured with [`TrailingData::Reject`](crate::TrailingData::Reject).
    TrailingData { expected: usize, actual: usize },
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::MalformedRecord => write!(f, "Record is empty: missing presence bitmap"),
            DecodeError::TruncatedRecord {
                field,
                needed,
                available,
            } => write!(
                f,
                "Record truncated in field {field}: need {needed} bytes, have {available}"
            ),
            DecodeError::TrailingData { expected, actual } => write!(
                f,
                "Record has {} trailing bytes (expected {expected} bytes, got {actual})",
                actual.saturating_sub(*expected)
            ),
        }
    }
}

impl std::error::Error for DecodeError {}
