//! Wire protocol for Warroom draft rooms.
//!
//! This crate defines what travels between the draft server and its
//! clients:
//!
//! - **Types** ([`DraftEvent`], [`EventFrame`], the identity newtypes) —
//!   the structures serialized onto the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how they become bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! The protocol layer knows nothing about rooms, rosters, or persistence —
//! it only defines the shared language. Events are best-effort hints; the
//! durable draft state lives behind `warroom-store`.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    DraftEvent, EventFrame, LeagueId, PlayerId, TeamId, UserId, room_channel,
};
