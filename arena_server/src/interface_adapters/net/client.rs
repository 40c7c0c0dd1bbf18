use crate::domain::{InputDirection, PlayerId};
use crate::interface_adapters::protocol::{ClientMessage, InitDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{ArenaHandle, GameEvent, JoinAck, SessionId};

use axum::{
    Error,
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{Instrument, Span, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    InputClosed,
    JoinRejected,
    WorldUpdatesClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

// Process-unique session ids, used for log correlation and registry bookkeeping.
fn next_session_id() -> SessionId {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let arena = state.arena.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, arena))
}

async fn handle_socket(socket: WebSocket, arena: ArenaHandle) {
    // Separate connection id for correlating logs before/after a player_id exists.
    let conn_id = next_session_id();
    let span = info_span!("conn", conn_id, player_id = tracing::field::Empty);
    run_session(socket, arena, conn_id).instrument(span).await;
}

async fn run_session(mut socket: WebSocket, arena: ArenaHandle, conn_id: SessionId) {
    let mut ctx = match bootstrap_connection(&mut socket, &arena, conn_id).await {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = ?e, "failed to bootstrap connection");
            let _ = socket.close().await;
            return;
        }
    };

    // Main Client Loop
    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

struct ConnCtx {
    player_id: PlayerId,
    input_tx: mpsc::Sender<GameEvent>,
    world_bytes_rx: broadcast::Receiver<Utf8Bytes>,
    world_latest_rx: watch::Receiver<Utf8Bytes>,
    stats: ConnStats,
    throttle: LogThrottle,
}

/// Per-connection traffic counters, logged once when the session ends.
#[derive(Debug, Default)]
struct ConnStats {
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    invalid_msgs: u32,
    // Snapshots sent from the latest-state watch after falling behind.
    lag_recoveries: u64,
}

impl ConnStats {
    fn record_out(&mut self, bytes: usize) {
        self.msgs_out += 1;
        self.bytes_out += bytes as u64;
    }

    fn record_in(&mut self, bytes: usize) {
        self.msgs_in += 1;
        self.bytes_in += bytes as u64;
    }
}

/// Last emission time of each throttled warning.
struct LogThrottle {
    input_full: Instant,
    world_lag: Instant,
    bad_input: Instant,
}

impl LogThrottle {
    fn new() -> Self {
        let ready = Instant::now() - LOG_THROTTLE;
        Self {
            input_full: ready,
            world_lag: ready,
            bad_input: ready,
        }
    }
}

async fn bootstrap_connection(
    socket: &mut WebSocket,
    arena: &ArenaHandle,
    conn_id: SessionId,
) -> Result<ConnCtx, NetError> {
    // Subscribe to updates *before* doing anything else (awaits) to not miss packets.
    let world_bytes_rx = arena.world_bytes_tx.subscribe();
    let world_latest_rx = arena.world_latest_tx.subscribe();

    // Ask the world task for an identity; it spawns the player on its next tick.
    let (reply_tx, reply_rx) = oneshot::channel::<JoinAck>();
    arena
        .input_tx
        .send(GameEvent::Join {
            session_id: conn_id,
            reply: reply_tx,
        })
        .await
        .map_err(|_| NetError::InputClosed)?;
    let ack = reply_rx.await.map_err(|_| NetError::JoinRejected)?;
    Span::current().record("player_id", ack.player_id);

    // Send Identity Packet
    // Tell the client "This is who you are". Always the first message on the socket.
    let init = ServerMessage::Init(InitDto::from(ack));
    let init_bytes = match send_message(socket, &init).await {
        Ok(bytes) => bytes,
        Err(err) => {
            // The player already exists in the world; take it back out.
            let _ = arena
                .input_tx
                .send(GameEvent::Leave {
                    player_id: ack.player_id,
                })
                .await;
            return Err(err);
        }
    };

    info!(player_id = ack.player_id, team = ?ack.team, "client connected");

    let mut stats = ConnStats::default();
    stats.record_out(init_bytes);
    Ok(ConnCtx {
        player_id: ack.player_id,
        input_tx: arena.input_tx.clone(),
        world_bytes_rx,
        world_latest_rx,
        stats,
        throttle: LogThrottle::new(),
    })
}

enum LoopControl {
    Continue,
    Disconnect,
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

fn process_input_message(
    player_id: PlayerId,
    input_tx: &mpsc::Sender<GameEvent>,
    x: f64,
    y: f64,
    throttle: &mut LogThrottle,
) -> Result<LoopControl, NetError> {
    let Some(input) = InputDirection::clamped(x, y) else {
        if should_log(&mut throttle.bad_input) {
            warn!(player_id, "invalid input values (NaN/inf); dropping");
        }
        return Ok(LoopControl::Continue);
    };

    // Never wait on the world task for input; the next message supersedes a dropped one.
    match input_tx.try_send(GameEvent::Input { player_id, input }) {
        Ok(()) => Ok(LoopControl::Continue),
        Err(mpsc::error::TrySendError::Full(_evt)) => {
            if should_log(&mut throttle.input_full) {
                warn!(player_id, "input channel full; dropping input");
            }
            Ok(LoopControl::Continue)
        }
        Err(mpsc::error::TrySendError::Closed(_evt)) => Err(NetError::InputClosed),
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    let player_id = ctx.player_id;

    // Split borrows so `tokio::select!` can hold them concurrently.
    let ConnCtx {
        input_tx,
        world_bytes_rx,
        world_latest_rx,
        stats,
        throttle,
        ..
    } = ctx;

    let mut fatal: Option<NetError> = None;

    loop {
        let control = tokio::select! {
            incoming = socket.recv() => {
                match handle_incoming_ws(incoming, player_id, input_tx, stats, throttle) {
                    Ok(control) => control,
                    Err(e) => {
                        fatal = Some(e);
                        LoopControl::Disconnect
                    }
                }
            }

            world_msg = world_bytes_rx.recv() => {
                match world_msg {
                    Ok(bytes) => forward_world_bytes(bytes, socket, stats).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        if should_log(&mut throttle.world_lag) {
                            warn!(missed = n, "world updates lagged; sending snapshot");
                        }

                        // Skip the backlog and resync from the latest snapshot.
                        let latest = world_latest_rx.borrow().clone();
                        if latest.is_empty() {
                            LoopControl::Continue
                        } else {
                            stats.lag_recoveries += 1;
                            forward_world_bytes(latest, socket, stats).await
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        fatal = Some(NetError::WorldUpdatesClosed);
                        LoopControl::Disconnect
                    }
                }
            }
        };

        if let LoopControl::Disconnect = control {
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    if let Err(e) = input_tx
        .send(GameEvent::Leave { player_id })
        .await
        .map_err(|_| NetError::InputClosed)
    {
        warn!(error = ?e, "error during disconnect cleanup");
        if fatal.is_none() {
            fatal = Some(e);
        }
    }

    debug!(player_id, stats = ?stats, "connection stats");
    info!(player_id, "client disconnected");

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    player_id: PlayerId,
    input_tx: &mpsc::Sender<GameEvent>,
    stats: &mut ConnStats,
    throttle: &mut LogThrottle,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                stats.record_in(text.len());

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Input(input)) => {
                        process_input_message(player_id, input_tx, input.x, input.y, throttle)
                    }
                    Err(parse_err) => {
                        // Protocol errors never cost the client its connection.
                        stats.invalid_msgs += 1;
                        if should_log(&mut throttle.bad_input) {
                            warn!(
                                player_id,
                                bytes = text.len(),
                                error = %parse_err,
                                "failed to parse client message; dropping"
                            );
                        }
                        Ok(LoopControl::Continue)
                    }
                }
            }
            Message::Binary(data) => {
                stats.record_in(data.len());
                stats.invalid_msgs += 1;
                if should_log(&mut throttle.bad_input) {
                    warn!(player_id, bytes = data.len(), "binary message dropped");
                }
                Ok(LoopControl::Continue)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(player_id, error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!(player_id, "websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

async fn forward_world_bytes(
    world_msg: Utf8Bytes,
    socket: &mut WebSocket,
    stats: &mut ConnStats,
) -> LoopControl {
    let bytes_len = world_msg.len();
    match socket.send(Message::Text(world_msg)).await {
        Ok(()) => {
            stats.record_out(bytes_len);
            LoopControl::Continue
        }
        Err(err) => {
            // Transport fault: drop this session only; the next tick supersedes the lost update.
            warn!(error = %err, "failed to send world update");
            LoopControl::Disconnect
        }
    }
}
