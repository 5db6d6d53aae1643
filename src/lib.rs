//! BLOCKFALL - falling-block puzzle rules engine
//!
//! The [`game::Game`] session owns the field, the falling piece, the
//! upcoming queue and the hold slot. A host drives it once per frame with
//! [`game::Game::tick`] and receives visual updates through a
//! [`sink::RenderSink`].

pub mod controls;
pub mod error;
pub mod field;
pub mod game;
pub mod hold;
pub mod piece;
pub mod queue;
pub mod score;
pub mod settings;
pub mod sink;
pub mod srs;
pub mod tetromino;

pub use controls::{AutoRepeat, Shift, TickInput};
pub use error::{Result, SettingsError};
pub use field::{Cell, Field};
pub use game::{Game, GameConfig};
pub use score::Score;
pub use settings::Settings;
pub use sink::{NullSink, PieceRole, RenderSink};
pub use tetromino::{Point, RotationDirection, TetrominoType};
