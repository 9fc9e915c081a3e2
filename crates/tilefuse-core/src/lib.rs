//! **tilefuse-core** — sliding-tile merge puzzle engine.
//!
//! This crate provides the core of a 2048-style game: the board's
//! exclusive cell-to-tile mapping, the per-lane slide-and-merge move
//! resolver, the per-tile animated-transition state machine, and the
//! frame-driven [`Session`] that gates one move per completed transition
//! window. Rendering, input capture and frame scheduling live in external
//! drivers plugged in through the [`app`] module.

pub mod app;
pub mod board;
pub mod error;
pub mod geom;
pub mod messages;
pub mod resolve;
pub mod session;
pub mod tile;

pub use app::{App, Context, Driver, Effect, Model, SpriteFrame, cmd};
pub use board::Board;
pub use error::BoardError;
pub use geom::{Offset, Point, lerp};
pub use messages::Msg;
pub use resolve::{Dir, MoveOutcome};
pub use session::{Session, SessionConfig, TileSprite};
pub use tile::{Tile, Transition};
