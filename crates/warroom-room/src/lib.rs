//! Realtime fan-out for Warroom drafts.
//!
//! Server side: one room actor per league stamps and broadcasts
//! [`warroom_protocol::EventFrame`]s to every connected client, managed
//! by a [`RoomManager`].
//!
//! Client side: a [`DraftSubscriber`](spawn_subscriber) holds the
//! connection state machine (with single-flight reconnect), and a
//! [`Reconciler`] keeps the authoritative snapshot fresh by polling —
//! events only ever make that polling happen sooner.

mod channel;
mod error;
mod manager;
mod reconcile;
mod room;
mod subscriber;

pub use channel::{EventChannel, EventConnection, InProcessChannel};
pub use error::RoomError;
pub use manager::RoomManager;
pub use reconcile::{DEFAULT_POLL_INTERVAL, Reconciler, SnapshotSource};
pub use room::{FrameSender, RoomHandle};
pub use subscriber::{
    ClientSignal, ConnectionState, SubscriberConfig, SubscriberHandle, spawn_subscriber,
};
