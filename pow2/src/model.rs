//! The game model: translates driver messages into engine calls.

use tilefuse_core::app::{Effect, Model, SpriteFrame};
use tilefuse_core::error::BoardError;
use tilefuse_core::messages::Msg;
use tilefuse_core::session::{Session, SessionConfig};

/// The pow2 game model.
///
/// Owns one [`Session`] and implements the Elm-style [`Model`] contract:
/// move commands are queued, each animation frame advances the transition
/// clock, and the visual state is reported as a sprite frame.
pub struct Pow2Model {
    session: Session,
}

impl Pow2Model {
    /// Create a model with a freshly seeded board.
    pub fn new(config: SessionConfig) -> Result<Self, BoardError> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    /// The underlying session, for inspection.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Model for Pow2Model {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                if let Err(e) = self.session.reset() {
                    log::error!("reset failed: {e}");
                }
                None
            }
            Msg::Command { dir, .. } => {
                self.session.queue(dir);
                None
            }
            Msg::Frame { t, .. } => {
                // A move that changed the board always leaves at least one
                // empty cell, so a spawn failure here is a bug.
                if let Err(e) = self.session.advance(t) {
                    log::error!("frame advance failed: {e}");
                }
                None
            }
            Msg::Quit => Some(Effect::End),
        }
    }

    fn render(&self) -> SpriteFrame {
        let (width, height) = self.session.pixel_size();
        SpriteFrame {
            sprites: self.session.sprites(),
            width,
            height,
        }
    }
}
