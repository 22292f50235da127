//! Host-facing command surface.
//!
//! Commands are decoded once at the channel boundary ([`decode`]), sequenced
//! by [`CommandRouter`], and optionally run on a dedicated thread by
//! [`RenderWorker`], whose queue merges redundant renders and gestures
//! instead of blocking the host.

mod queue;
mod router;
mod types;
mod wire;
mod worker;

pub use router::CommandRouter;
pub use types::Command;
pub use wire::{decode, WIRE_TAGS};
pub use worker::{RenderWorker, WorkerConfig};
