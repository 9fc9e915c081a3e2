//! The application loop: [`Model`], [`Driver`], [`Effect`], [`App`].
//!
//! The core stays renderer-agnostic: a [`Driver`] owns the actual screen
//! and input device, polls messages into the loop, and receives a
//! [`SpriteFrame`] to draw each time the model changed. Because tile
//! offsets interpolate continuously, frames are flushed whole rather than
//! diffed cell by cell.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::messages::Msg;
use crate::session::TileSprite;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// SpriteFrame
// ---------------------------------------------------------------------------

/// Everything a renderer needs for one frame: the board's pixel size and
/// one sprite per live tile.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteFrame {
    pub sprites: Vec<TileSprite>,
    pub width: f32,
    pub height: f32,
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command that produces an optional follow-up message.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver traits
// ---------------------------------------------------------------------------

/// The game model: consumes messages, reports the visual state.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// The current visual state, ready to draw.
    fn render(&self) -> SpriteFrame;
}

/// Back-end driver (renderer + input source).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input/frame messages, sending them through `tx`. The
    /// implementation should honour `ctx.is_done()` and return promptly.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Draw a frame.
    fn flush(&mut self, frame: SpriteFrame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application runner: poll → update → render → flush.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application.
    pub fn new(model: M, driver: D) -> Self {
        Self { model, driver }
    }

    /// Run the loop until the model returns [`Effect::End`] or the driver
    /// fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        while !ctx.is_done() {
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }
            self.process_pending(&rx, &ctx, &tx)?;
        }

        self.driver.close();
        Ok(())
    }

    /// Drain queued messages, update the model, then flush one frame.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut dirty = false;
        while let Ok(msg) = rx.try_recv() {
            if self.handle_update(msg, ctx, tx) {
                return Ok(());
            }
            dirty = true;
        }
        if dirty && !ctx.is_done() {
            let frame = self.model.render();
            self.driver.flush(frame)?;
        }
        Ok(())
    }

    /// Returns `true` when the loop should stop.
    fn handle_update(&mut self, msg: Msg, ctx: &Context, tx: &Sender<Msg>) -> bool {
        match self.model.update(msg) {
            Some(effect) => self.handle_effect(effect, ctx, tx),
            None => false,
        }
    }

    fn handle_effect(&mut self, effect: Effect, ctx: &Context, tx: &Sender<Msg>) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Cmd(f) => {
                if let Some(msg) = f() {
                    tx.send(msg).ok();
                }
                false
            }
            Effect::Batch(effects) => {
                for e in effects {
                    if self.handle_effect(e, ctx, tx) {
                        return true;
                    }
                }
                false
            }
        }
    }
}
