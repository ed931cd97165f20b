//! # Warroom
//!
//! Realtime draft coordination for fantasy leagues.
//!
//! Warroom keeps a league's live draft consistent under concurrent
//! clients: conditional writes guard every pick, a per-league supervisor
//! auto-picks when a turn expires, and room broadcasts fan events out as
//! hints while clients reconcile against the authoritative snapshot.
//!
//! This crate is the facade: [`DraftService`] wires the engine, rooms,
//! and supervisors together, and [`DraftGateway`] puts the service behind
//! a WebSocket listener.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warroom::prelude::*;
//!
//! # async fn run() -> Result<(), WarroomError> {
//! let store = MemoryStore::new();
//! let service = DraftService::new(store, OpenAuthorizer, ServiceConfig::default());
//! let gateway = DraftGateway::bind("127.0.0.1:8080", service).await?;
//! gateway.run().await
//! # }
//! ```

mod error;
mod gateway;
mod service;

pub use error::WarroomError;
pub use gateway::{ClientMessage, DraftGateway, HELLO_TIMEOUT, ServerMessage};
pub use service::{DraftService, RoomSink, ServiceConfig, ServiceSnapshots};

/// Everything a draft server or in-process client typically needs.
pub mod prelude {
    pub use crate::{
        ClientMessage, DraftGateway, DraftService, ServerMessage, ServiceConfig, WarroomError,
    };
    pub use warroom_clock::ClockConfig;
    pub use warroom_core::{
        DraftError, DraftRoom, DraftStatus, PlayerInfo, Position, RosterRules, Slot,
    };
    pub use warroom_engine::{Authorizer, EngineConfig, OpenAuthorizer, OwnerTable};
    pub use warroom_protocol::{
        Codec, DraftEvent, EventFrame, JsonCodec, LeagueId, PlayerId, TeamId, UserId,
    };
    pub use warroom_room::{
        ClientSignal, ConnectionState, Reconciler, SubscriberConfig, spawn_subscriber,
    };
    pub use warroom_store::{DraftStore, MemoryStore, RosterAssignment};
}
