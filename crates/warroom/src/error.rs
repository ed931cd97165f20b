//! Unified error type for the Warroom facade.

use warroom_engine::EngineError;
use warroom_protocol::ProtocolError;
use warroom_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `warroom` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WarroomError {
    /// An engine-level error: domain rejection or store failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room/fan-out error.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A gateway socket error.
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Listener I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
