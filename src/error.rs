use std::fmt;

/// Why a move or request was rejected. Legality failures are reported as
/// values; nothing in the engine aborts on user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    InvalidPlayer,
    OutOfBound,
    NotEmpty,
    KoProtected,
    Suicide,
    SuccessivePass,
    InvalidInput,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::InvalidPlayer => write!(f, "player should be either black or white"),
            IllegalMove::OutOfBound => write!(f, "location out of bound"),
            IllegalMove::NotEmpty => write!(f, "location is not empty"),
            IllegalMove::KoProtected => write!(f, "location is protected by ko rule"),
            IllegalMove::Suicide => write!(f, "suicide is illegal"),
            IllegalMove::SuccessivePass => write!(f, "successive pass is not allowed"),
            IllegalMove::InvalidInput => write!(f, "invalid input"),
        }
    }
}

impl std::error::Error for IllegalMove {}
