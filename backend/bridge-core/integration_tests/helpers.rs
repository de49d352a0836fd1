//! Test helpers for proxy and lifecycle integration tests.
//!
//! - A running proxy bound to an ephemeral port, with a shutdown trigger attached
//! - A `ProxyTarget` pointing at a wiremock server
//! - A port with nothing listening on it

use bridge_core::lifecycle::ShutdownSignal;
use bridge_core::proxy::{ForwardingProxy, ProxyServer, ServerHandle, ShutdownTrigger};

use models::ProxyTarget;

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub struct RunningProxy {
    pub addr: SocketAddr,
    pub signal: ShutdownSignal,
    pub handle: ServerHandle,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Test helper: Proxy target for a wiremock backend.
pub fn target_for(backend: &MockServer) -> ProxyTarget {
    let addr = backend.address();
    ProxyTarget::new(&addr.ip().to_string(), &addr.port().to_string())
        .expect("wiremock address is a valid target")
}

/// Test helper: Start a proxy on 127.0.0.1 with a `/shutdown` trigger.
pub async fn start_proxy(target: ProxyTarget) -> RunningProxy {
    let signal = ShutdownSignal::new();
    let proxy = ForwardingProxy::new(target)
        .expect("HTTP client builds")
        .with_observer(Arc::new(ShutdownTrigger::new(signal.clone())));

    let server = ProxyServer::bind("127.0.0.1:0".parse().expect("valid address"))
        .await
        .expect("ephemeral port binds");
    let addr = server.local_addr();
    let handle = server.serve(proxy, signal.clone());

    RunningProxy {
        addr,
        signal,
        handle,
    }
}

/// Test helper: A localhost port that refuses connections.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    listener.local_addr().expect("bound address").port()
}

/// Test helper: HTTP client that ignores proxy environment variables.
pub fn client() -> Client {
    Client::builder()
        .no_proxy()
        .build()
        .expect("HTTP client builds")
}
