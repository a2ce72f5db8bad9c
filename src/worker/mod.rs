//! Isolated search worker.
//!
//! The worker owns the corpus and runs on its own tokio task. Hosts talk to it
//! through a [`WorkerHandle`] and receive [`Notification`]s on an ordered
//! channel. Commands are handled one at a time in the order they were sent, so
//! the last search notification observed always belongs to the last search
//! issued.

pub mod handle;
pub mod messages;
pub mod runtime;

pub use handle::{NotificationReceiver, WorkerHandle};
pub use messages::{Command, Notification};
pub use runtime::Worker;
