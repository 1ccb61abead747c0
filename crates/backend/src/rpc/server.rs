use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use contracts::shared::rpc::{RpcRequest, RpcResponse};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use super::codec::{self, CodecError, FrameReader};
use super::dispatcher;
use crate::shared::state::AppState;

/// Ответы, ожидающие записи в сокет
const REPLY_BUFFER: usize = 64;

/// Пауза после ошибки accept, не связанной с конкретным клиентом (EMFILE и т.п.)
const ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// Errors of a single half-open connection do not affect the listener;
/// anything else (descriptor exhaustion) gets a pause before the next accept.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

/// Accept loop of the message listener. Each connection gets its own task.
/// Never returns: accept errors are logged and the loop goes on.
pub async fn serve(listener: TcpListener, state: AppState) {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "rpc accept failed");
                if let Some(pause) = accept_backoff(&e) {
                    tokio::time::sleep(pause).await;
                }
                continue;
            }
        };
        let state = state.clone();
        tokio::spawn(async move {
            tracing::debug!(%peer, "rpc connection opened");
            match handle_connection(socket, peer, state).await {
                Ok(()) => tracing::debug!(%peer, "rpc connection closed"),
                Err(e) => tracing::warn!(%peer, error = %e, "rpc connection dropped"),
            }
        });
    }
}

/// Requests on one connection run concurrently; a single writer task
/// serializes the replies, so they may come back out of order.
async fn handle_connection(
    socket: TcpStream,
    peer: SocketAddr,
    state: AppState,
) -> Result<(), CodecError> {
    let (read_half, mut write_half) = socket.into_split();
    let (tx, mut rx) = mpsc::channel::<RpcResponse>(REPLY_BUFFER);

    let writer = tokio::spawn(async move {
        while let Some(reply) = rx.recv().await {
            let frame = codec::encode(&reply)?;
            write_half.write_all(&frame).await?;
        }
        Ok::<_, CodecError>(())
    });

    let mut reader = FrameReader::new(read_half);
    let read_result = loop {
        let frame = match reader.next_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        };

        let request: RpcRequest = match serde_json::from_slice(&frame) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(%peer, error = %e, "skipping unreadable rpc frame");
                continue;
            }
        };

        let state = state.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(reply) = dispatcher::dispatch(&state, request).await {
                if tx.send(reply).await.is_err() {
                    tracing::debug!("rpc reply dropped, connection already closed");
                }
            }
        });
    };

    // writer завершится, когда все задачи отдадут свои копии tx
    drop(tx);
    let write_result = match writer.await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(%peer, error = %e, "rpc writer task failed");
            Ok(())
        }
    };
    read_result.and(write_result)
}
