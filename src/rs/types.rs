use std::fmt;

/// Outcome of a Reed-Solomon decode. Both variants carry usable bytes
/// alongside them; `Recoverable` means the bytes were corrected and are
/// exact, `Corrupted` means correction failed and the bytes are a
/// best-effort fallback the caller should not trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsError {
    Recoverable,
    Corrupted,
}

impl fmt::Display for RsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsError::Recoverable => write!(f, "data was damaged but corrected"),
            RsError::Corrupted => write!(f, "data was damaged beyond correction"),
        }
    }
}

impl std::error::Error for RsError {}

/// Combines two decode outcomes observed across a batch of chunks,
/// keeping the more severe one (`Corrupted` outranks `Recoverable`
/// outranks no error).
pub(crate) fn worse(a: Option<RsError>, b: Option<RsError>) -> Option<RsError> {
    match (a, b) {
        (Some(RsError::Corrupted), _) | (_, Some(RsError::Corrupted)) => Some(RsError::Corrupted),
        (Some(RsError::Recoverable), _) | (_, Some(RsError::Recoverable)) => {
            Some(RsError::Recoverable)
        }
        _ => None,
    }
}
