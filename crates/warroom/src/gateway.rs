//! WebSocket gateway: the draft service over the wire.
//!
//! Each accepted socket gets its own Tokio task. The flow is:
//!   1. Receive `hello` naming the league and team
//!   2. Reply `welcome` with the authoritative room snapshot
//!   3. Join the league's room and loop: fan frames out, route
//!      `make_pick` and presence chatter in

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use warroom_core::DraftRoom;
use warroom_engine::Authorizer;
use warroom_protocol::{
    Codec, DraftEvent, EventFrame, JsonCodec, LeagueId, PlayerId, ProtocolError, TeamId,
};
use warroom_store::DraftStore;

use crate::{DraftService, WarroomError};

/// How long a fresh socket has to send its `hello`.
pub const HELLO_TIMEOUT: Duration = Duration::from_secs(5);

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;
type WsStream = SplitStream<WebSocketStream<TcpStream>>;

/// Messages a draft client sends to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// First message on every socket: which league and team this is.
    Hello {
        league_id: LeagueId,
        team_id: TeamId,
    },
    /// Draft `player_id` for the hello'd team.
    MakePick { player_id: PlayerId },
    /// Ask the room who else is connected.
    PresenceRequest,
}

/// Messages the gateway sends to a draft client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Handshake reply carrying the room snapshot as of join time.
    Welcome { room: DraftRoom },
    /// A stamped room broadcast.
    Frame { frame: EventFrame },
    /// A rejected request. The socket stays open.
    Error { message: String },
}

/// WebSocket front door for a [`DraftService`].
pub struct DraftGateway<S, A> {
    listener: TcpListener,
    service: DraftService<S, A>,
}

impl<S, A> DraftGateway<S, A>
where
    S: DraftStore + Clone,
    A: Authorizer + Clone,
{
    /// Binds the gateway to the given address.
    pub async fn bind(addr: &str, service: DraftService<S, A>) -> Result<Self, WarroomError> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr, "draft gateway listening");
        Ok(Self { listener, service })
    }

    /// Returns the local address the gateway is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), WarroomError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    tracing::debug!(%addr, "accepted connection");
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_socket(stream, service).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

/// Handles a single socket from accept to close.
async fn handle_socket<S, A>(
    stream: TcpStream,
    service: DraftService<S, A>,
) -> Result<(), WarroomError>
where
    S: DraftStore + Clone,
    A: Authorizer + Clone,
{
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut stream) = ws.split();
    let codec = JsonCodec;

    // --- Step 1: hello ---
    let (league, team) = match hello(&mut stream, &codec).await {
        Ok(ids) => ids,
        Err(err) => {
            let reply = ServerMessage::Error {
                message: err.to_string(),
            };
            let _ = send_message(&mut sink, &codec, &reply).await;
            return Err(err);
        }
    };

    tracing::info!(%league, %team, "client joined");

    // --- Step 2: welcome with the current snapshot ---
    let room = match service.snapshot(league).await {
        Ok(room) => room,
        Err(err) => {
            let reply = ServerMessage::Error {
                message: err.to_string(),
            };
            send_message(&mut sink, &codec, &reply).await?;
            return Err(err);
        }
    };
    send_message(&mut sink, &codec, &ServerMessage::Welcome { room }).await?;

    let mut conn = service.join_room(league, team).await?;

    // --- Step 3: message loop ---
    // Dropping `conn.outbound` on exit makes the room forwarder leave on
    // this team's behalf, which broadcasts `presence_left`.
    loop {
        tokio::select! {
            frame = conn.frames.recv() => {
                let Some(frame) = frame else {
                    tracing::debug!(%league, %team, "room closed");
                    break;
                };
                send_message(&mut sink, &codec, &ServerMessage::Frame { frame }).await?;
            }
            payload = recv_payload(&mut stream) => {
                let Some(data) = payload? else {
                    tracing::info!(%league, %team, "connection closed cleanly");
                    break;
                };
                let msg = match codec.decode::<ClientMessage>(&data) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::debug!(%team, error = %e, "failed to decode client message");
                        continue;
                    }
                };
                handle_client_message(&mut sink, &codec, &service, &conn.outbound, league, team, msg)
                    .await?;
            }
        }
    }

    Ok(())
}

/// Waits for the opening `hello` and returns the league and team it names.
async fn hello(
    stream: &mut WsStream,
    codec: &JsonCodec,
) -> Result<(LeagueId, TeamId), WarroomError> {
    let data = match tokio::time::timeout(HELLO_TIMEOUT, recv_payload(stream)).await {
        Ok(Ok(Some(data))) => data,
        Ok(Ok(None)) => {
            return Err(ProtocolError::InvalidMessage("connection closed before hello".into()).into());
        }
        Ok(Err(e)) => return Err(e),
        Err(_) => {
            return Err(ProtocolError::InvalidMessage("hello timed out".into()).into());
        }
    };

    match codec.decode::<ClientMessage>(&data)? {
        ClientMessage::Hello { league_id, team_id } => Ok((league_id, team_id)),
        _ => Err(ProtocolError::InvalidMessage("first message must be hello".into()).into()),
    }
}

async fn handle_client_message<S, A>(
    sink: &mut WsSink,
    codec: &JsonCodec,
    service: &DraftService<S, A>,
    outbound: &tokio::sync::mpsc::UnboundedSender<DraftEvent>,
    league: LeagueId,
    team: TeamId,
    msg: ClientMessage,
) -> Result<(), WarroomError>
where
    S: DraftStore + Clone,
    A: Authorizer + Clone,
{
    match msg {
        ClientMessage::MakePick { player_id } => {
            if let Err(err) = service.make_pick(league, team, player_id).await {
                tracing::debug!(%team, %player_id, error = %err, "pick rejected");
                let reply = ServerMessage::Error {
                    message: err.to_string(),
                };
                send_message(sink, codec, &reply).await?;
            }
        }
        ClientMessage::PresenceRequest => {
            let _ = outbound.send(DraftEvent::PresenceRequest { team_id: team });
        }
        ClientMessage::Hello { .. } => {
            let reply = ServerMessage::Error {
                message: "already joined".into(),
            };
            send_message(sink, codec, &reply).await?;
        }
    }
    Ok(())
}

/// Encodes and sends one server message as a binary frame.
async fn send_message(
    sink: &mut WsSink,
    codec: &JsonCodec,
    msg: &ServerMessage,
) -> Result<(), WarroomError> {
    let bytes = codec.encode(msg)?;
    sink.send(Message::Binary(bytes.into())).await?;
    Ok(())
}

/// Receives the next data payload, skipping ping/pong frames.
///
/// Accepts both binary and text frames since browser clients typically
/// send JSON as text. Returns `None` on a clean close.
async fn recv_payload(stream: &mut WsStream) -> Result<Option<Vec<u8>>, WarroomError> {
    loop {
        match stream.next().await {
            Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
            Some(Ok(Message::Text(text))) => return Ok(Some(text.as_bytes().to_vec())),
            Some(Ok(Message::Close(_))) | None => return Ok(None),
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e.into()),
        }
    }
}
