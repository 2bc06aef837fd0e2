use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

use crate::error::IllegalMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    /// Parse the board-plane encoding: +1 is Black, -1 is White, anything
    /// else is an empty cell.
    pub fn from_int(v: i8) -> Option<Self> {
        match v {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

/// Untyped player colors enter the engine here. Only exact +1/-1 name a
/// player; everything else (including 0, the empty-cell value) is rejected.
impl TryFrom<i8> for Stone {
    type Error = IllegalMove;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        Stone::from_int(v).ok_or(IllegalMove::InvalidPlayer)
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}
