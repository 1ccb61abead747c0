#![allow(
    clippy::useless_format,
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::derivable_impls
)]

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod rpc;
pub mod shared;
pub mod system;

use std::future::IntoFuture;
use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Bind with a readable message for the common "port busy" case
async fn bind(kind: &str, addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {} address '{}': {}", kind, addr, e))?;

    tracing::info!("Attempting to bind {} listener to {}", kind, addr);
    match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("{} listener successfully bound to {}", kind, addr);
            Ok(listener)
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", addr.port(), e);
            }
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let state = system::initialization::initialize_state(&config).await?;

    let http = bind("HTTP", &config.server.http_addr).await?;
    let rpc_listener = bind("RPC", &config.server.rpc_addr).await?;

    // Слушатель сообщений живёт рядом с HTTP и разделяет с ним состояние
    let rpc_state = state.clone();
    let rpc_task = tokio::spawn(rpc::server::serve(rpc_listener, rpc_state));

    let app = routes::configure_routes(state);
    tokio::select! {
        served = axum::serve(http, app).into_future() => served?,
        stopped = rpc_task => {
            stopped?;
            anyhow::bail!("RPC listener stopped unexpectedly");
        }
    }

    Ok(())
}
