use crate::error::proxy::ProxyError;
use crate::lifecycle::ShutdownSignal;
use crate::proxy::ForwardingProxy;

use common::ErrorLocation;

use std::net::SocketAddr;
use std::panic::Location;
use std::pin::pin;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::{Extension, Router};
use hyper::server::conn::http1::Builder as Http1Builder;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use log::{debug, info, trace, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn as TokioSpawn;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::sleep as TokioSleep;

/// Pause after a failed `accept` (e.g. out of file descriptors) before retrying.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Task running the proxy's HTTP server and all of its connections.
///
/// Resolves once every connection has closed after shutdown. Aborting it drops
/// the connections still open.
pub type ServerHandle = JoinHandle<()>;

/// A bound but not yet serving proxy listener.
pub struct ProxyServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl ProxyServer {
    /// Bind the listener.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Bind`] if the port is taken or cannot be bound.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ProxyError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ProxyError::Bind {
                addr,
                message: format!("Failed to bind proxy listener: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?;

        let local_addr = listener.local_addr().map_err(|e| ProxyError::Bind {
            addr,
            message: format!("Failed to read bound address: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Start serving in a background task.
    ///
    /// Once `shutdown` fires the server stops accepting, asks every connection to
    /// close after its in-flight request, and resolves when all have closed.
    /// Each connection runs in a task owned by the server task, so aborting the
    /// returned handle drops every remaining connection. Enforcing a deadline on
    /// the drain is the caller's job.
    pub fn serve(self, proxy: ForwardingProxy, shutdown: ShutdownSignal) -> ServerHandle {
        info!(
            "Proxy listening on {} -> {}",
            self.local_addr,
            proxy.target().base_url()
        );

        let app = proxy.router();
        let listener = self.listener;

        TokioSpawn(async move {
            let mut connections = JoinSet::new();

            loop {
                tokio::select! {
                    accepted = listener.accept() => match accepted {
                        Ok((stream, peer)) => {
                            trace!("Accepted connection from {peer}");
                            connections.spawn(serve_connection(
                                stream,
                                peer,
                                app.clone(),
                                shutdown.clone(),
                            ));
                        }
                        Err(e) => {
                            warn!("Failed to accept connection: {e}");
                            TokioSleep(ACCEPT_ERROR_BACKOFF).await;
                        }
                    },
                    Some(_) = connections.join_next(), if !connections.is_empty() => {}
                    reason = shutdown.fired() => {
                        debug!("Proxy draining {} connection(s) after {reason}", connections.len());
                        break;
                    }
                }
            }

            drop(listener);

            while let Some(result) = connections.join_next().await {
                if let Err(e) = result {
                    warn!("Connection task failed: {e}");
                }
            }
        })
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    app: Router,
    shutdown: ShutdownSignal,
) {
    let service = TowerToHyperService::new(app.layer(Extension(ConnectInfo(peer))));
    let connection = Http1Builder::new().serve_connection(TokioIo::new(stream), service);
    let mut connection = pin!(connection);

    let result = tokio::select! {
        result = connection.as_mut() => result,
        _ = shutdown.fired() => {
            connection.as_mut().graceful_shutdown();
            connection.as_mut().await
        }
    };

    if let Err(e) = result {
        debug!("Connection from {peer} ended with error: {e}");
    }
}
