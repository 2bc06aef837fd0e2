pub mod board;
pub mod error;
pub mod game;
pub mod group;
pub mod rules;
pub mod status;
pub mod stone;

/// (row, column) grid coordinates.
pub type Point = (u8, u8);

/// Linear cell index, `row * cols + column`. The index equal to
/// `rows * cols` is the pass sentinel and the final action index.
pub type Loc = u16;

pub use board::{Board, Captures};
pub use error::IllegalMove;
pub use game::{CaptureGame, StateKey};
pub use group::{Group, GroupId};
pub use status::Status;
pub use stone::Stone;
