use crate::error::proxy::ProxyError;
use crate::proxy::headers::{inbound_response_headers, outbound_request_headers};
use crate::proxy::observer::{ObservedExchange, ResponseObserver};

use common::{ErrorLocation, HttpStatusCode};
use models::ProxyTarget;

use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use log::{debug, trace, warn};
use reqwest::Client;
use reqwest::redirect::Policy;
use url::Url;

/// Forwards every request to a single [`ProxyTarget`].
pub struct ForwardingProxy {
    target: ProxyTarget,
    client: Client,
    observers: Vec<Arc<dyn ResponseObserver>>,
}

impl ForwardingProxy {
    /// Create a proxy for `target`.
    ///
    /// The HTTP client never follows redirects and ignores `HTTP_PROXY`-style
    /// environment variables: responses must reach the caller exactly as the
    /// driver sent them.
    #[track_caller]
    pub fn new(target: ProxyTarget) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .map_err(|e| ProxyError::Upstream {
                message: format!("Failed to build HTTP client: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        Ok(Self {
            target,
            client,
            observers: Vec::new(),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn target(&self) -> &ProxyTarget {
        &self.target
    }

    /// Swap scheme and authority of `uri` for the target's; keep path and query.
    #[track_caller]
    pub fn target_url(&self, uri: &Uri) -> Result<Url, ProxyError> {
        let path_and_query = uri
            .path_and_query()
            .map(|path_and_query| path_and_query.as_str())
            .unwrap_or("/");

        let raw = format!("{}{path_and_query}", self.target.base_url());

        Url::parse(&raw).map_err(|e| ProxyError::InvalidTarget {
            message: format!("Cannot build target URL from {raw}: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Forward one request to the driver and return its response.
    ///
    /// Observers run after the driver answered and before the response is handed
    /// back, so a `/shutdown` response is still delivered to its caller.
    ///
    /// # Errors
    ///
    /// * [`ProxyError::Body`] - The inbound body could not be read
    /// * [`ProxyError::InvalidTarget`] - The rewritten URL is not valid
    /// * [`ProxyError::Upstream`] - The driver could not be reached or its body failed
    pub async fn forward(
        &self,
        peer: Option<SocketAddr>,
        request: Request,
    ) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let url = self.target_url(&parts.uri)?;

        let body = to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ProxyError::Body {
                message: format!("Failed to read request body: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let headers = outbound_request_headers(parts.headers, peer.map(|peer| peer.ip()));

        trace!("Forwarding {} {} -> {url}", parts.method, parts.uri);

        let upstream = self
            .client
            .request(parts.method.clone(), url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream {
                message: format!(
                    "Failed to reach driver at {}: {e}",
                    self.target.authority()
                ),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        let status = upstream.status();
        let response_headers = inbound_response_headers(upstream.headers().clone());
        let bytes = upstream.bytes().await.map_err(|e| ProxyError::Upstream {
            message: format!("Failed to read driver response body: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

        let exchange = ObservedExchange {
            method: parts.method,
            path: parts.uri.path().to_string(),
            status,
        };
        log_exchange(&exchange);

        for observer in &self.observers {
            observer.observe(&exchange);
        }

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }

    /// Router sending every path and method to [`forward`](Self::forward).
    pub fn router(self) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(Arc::new(self))
    }
}

fn log_exchange(exchange: &ObservedExchange) {
    let code = HttpStatusCode::from(exchange.status.as_u16());
    if code.is_server_error() {
        warn!(
            "{} {} -> {} from driver",
            exchange.method, exchange.path, code
        );
    } else {
        debug!("{} {} -> {}", exchange.method, exchange.path, code);
    }
}

async fn proxy_handler(
    State(proxy): State<Arc<ForwardingProxy>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(peer)| peer);

    match proxy.forward(peer, request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("{e}");
            e.into_response()
        }
    }
}
