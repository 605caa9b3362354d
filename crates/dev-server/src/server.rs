//! Dev server accept loop.
//!
//! Listens on a TCP port and answers one request per connection, each in
//! its own task, until [`DevServer::shutdown`] is called.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use gamehub_protocol::constants::DEFAULT_PORT;

use crate::http::{Method, Request, Response, read_head};
use crate::mock_api::MockApi;
use crate::routes::{Route, content_type_for, route};
use crate::{REQUEST_TIMEOUT, ServerError};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (0 = OS-assigned).
    pub port: u16,
    /// Directory served as the site root.
    pub root: PathBuf,
    /// Whether `/api/*` is answered by the mock API.
    pub mock_api: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            mock_api: true,
        }
    }
}

/// The static file server.
pub struct DevServer {
    port: u16,
    root: PathBuf,
    mock_api: Option<MockApi>,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl DevServer {
    /// Creates a server for `config`. The mock API catalog is read from the
    /// root right away.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let mock_api = config.mock_api.then(|| MockApi::from_root(&config.root));
        Arc::new(Self {
            port: config.port,
            root: config.root,
            mock_api,
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
        })
    }

    /// Returns the local address the server is listening on.
    ///
    /// Only available after [`run`](Self::run) binds the socket.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Returns the listening port (0 if not yet bound).
    pub async fn port(&self) -> u16 {
        self.local_addr.lock().await.map(|a| a.port()).unwrap_or(0)
    }

    /// Stops the accept loop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Runs the server until cancellation.
    pub async fn run(self: &Arc<Self>) -> Result<(), ServerError> {
        let addr: SocketAddr = ([0, 0, 0, 0], self.port).into();
        let listener = TcpListener::bind(addr).await?;

        let local_addr = listener.local_addr()?;
        *self.local_addr.lock().await = Some(local_addr);
        tracing::info!(
            root = %self.root.display(),
            mock_api = self.mock_api.is_some(),
            "GameHub server running at http://localhost:{}",
            local_addr.port()
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("server shutting down");
                    break Ok(());
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, peer_addr)) => {
                            let server = Arc::clone(self);
                            tokio::spawn(async move {
                                if let Err(e) = server.handle_connection(stream, peer_addr).await {
                                    tracing::warn!(%peer_addr, "request failed: {e}");
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("accept error: {e}");
                        }
                    }
                }
            }
        }
    }

    /// Reads one request, answers it, and closes the connection.
    async fn handle_connection(
        self: &Arc<Self>,
        mut stream: TcpStream,
        peer_addr: SocketAddr,
    ) -> Result<(), ServerError> {
        let head = match tokio::time::timeout(REQUEST_TIMEOUT, read_head(&mut stream)).await {
            Ok(result) => result,
            Err(_) => return Err(ServerError::Timeout),
        };

        let request = match head.and_then(|h| Request::parse(&h)) {
            Ok(r) => r,
            Err(ServerError::BadRequest(reason)) => {
                tracing::debug!(%peer_addr, reason, "bad request");
                Response::new(400, "text/plain; charset=utf-8", "400 Bad Request")
                    .write_to(&mut stream, true)
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let response = self.respond(&request).await;
        tracing::debug!(%peer_addr, path = %request.path, status = response.status, "served");

        response
            .write_to(&mut stream, request.method != Method::Head)
            .await
    }

    /// Builds the response for a parsed request.
    pub async fn respond(&self, request: &Request) -> Response {
        if let Method::Other(method) = &request.method {
            tracing::debug!(method, path = %request.path, "method not allowed");
            return Response::new(405, "text/plain; charset=utf-8", "405 Method Not Allowed")
                .with_header("allow", "GET, HEAD");
        }

        match route(&request.path, self.mock_api.is_some()) {
            Route::Api(endpoint) => match self.mock_api.as_ref().map(|api| api.handle(&endpoint)) {
                Some(Ok(resp)) => resp,
                Some(Err(e)) => {
                    tracing::error!(endpoint, "mock API error: {e}");
                    Response::new(500, "text/plain; charset=utf-8", "500 Internal Server Error")
                }
                None => self.not_found().await,
            },
            Route::Shell => self.serve_shell().await,
            Route::File(relative) => self.serve_file(relative).await,
            Route::NotFound => self.not_found().await,
        }
    }

    async fn serve_shell(&self) -> Response {
        let index = self.root.join("index.html");
        match tokio::fs::read(&index).await {
            Ok(body) => Response::new(200, "text/html; charset=utf-8", body),
            Err(e) => {
                tracing::warn!(path = %index.display(), "cannot read SPA shell: {e}");
                self.not_found().await
            }
        }
    }

    async fn serve_file(&self, relative: PathBuf) -> Response {
        let path = self.root.join(&relative);
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return self.not_found().await;
        }

        match tokio::fs::read(&path).await {
            Ok(body) => Response::new(200, content_type_for(&path), body),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read file: {e}");
                self.not_found().await
            }
        }
    }

    /// The site's `404.html`, or a plain message when there is none.
    async fn not_found(&self) -> Response {
        let body = tokio::fs::read(self.root.join("404.html"))
            .await
            .unwrap_or_else(|_| b"404 Not Found".to_vec());
        Response::new(404, "text/html; charset=utf-8", body)
    }
}
