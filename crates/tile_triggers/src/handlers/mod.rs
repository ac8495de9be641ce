//! Built-in trigger handlers
//!
//! Handlers turn a firing into calls on game-supplied callbacks. Every
//! callback is optional: a missing one is logged and skipped, so incomplete
//! wiring never takes down the game loop.

mod door;
mod stairs;
mod warp;

pub use door::{DoorHandler, DoorOpenCallback, KeyCheckCallback, KeyRemovalCallback, MessageCallback};
pub use stairs::{ElevationChangedCallback, StairsHandler};
pub use warp::{WarpCallback, WarpHandler};

use crate::context::TriggerContext;

/// Behavior for one trigger kind
pub trait TriggerHandler: Send + Sync {
    /// Handle one firing. Must not panic on bad data; log and return instead.
    fn handle(&self, ctx: &mut TriggerContext<'_>);
}

impl<F> TriggerHandler for F
where
    F: Fn(&mut TriggerContext<'_>) + Send + Sync,
{
    fn handle(&self, ctx: &mut TriggerContext<'_>) {
        self(ctx)
    }
}

/// Pin a closure to the handler signature so its context lifetime is inferred
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&mut TriggerContext<'_>) + Send + Sync,
{
    f
}
