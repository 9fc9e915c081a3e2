//! Driver-to-model messages: [`Msg`].
//!
//! Input capture lives outside the core; by the time a message arrives
//! here a keyboard/touch event has already been validated into a discrete
//! move command.

use std::time::Instant;

use crate::resolve::Dir;

/// A message delivered to the game model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// A validated move command.
    Command { dir: Dir, time: Instant },
    /// One animation frame, carrying the externally computed normalized
    /// transition progress.
    Frame { t: f32, time: Instant },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: create a `Command` stamped now.
    pub fn command(dir: Dir) -> Self {
        Self::Command {
            dir,
            time: Instant::now(),
        }
    }

    /// Convenience: create a `Frame` stamped now.
    pub fn frame(t: f32) -> Self {
        Self::Frame {
            t,
            time: Instant::now(),
        }
    }
}
