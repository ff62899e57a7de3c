//! Ephemeral HTTP server implementation

use crate::shutdown::ShutdownSignal;
use bytes::Bytes;
use http::{header, HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use rand::Rng;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wirepress_core::{Codec, Error, Result};
use wirepress_compression::{CompressionConfig, Compressor};

/// The single route every ephemeral server exposes
pub const BENCHMARK_ROUTE: &str = "/test";

/// IANA dynamic/ephemeral port range
const PORT_RANGE_START: u16 = 49152;
const PORT_RANGE_END: u16 = 65535;

/// Transient bind collisions are expected; retry with a fresh random port
const MAX_BIND_ATTEMPTS: u32 = 16;

/// Body type alias
pub type Body = Full<Bytes>;

/// A throwaway single-route HTTP server configured for one codec
///
/// Created at the start of a benchmark run and destroyed before the run
/// returns. Never shared across runs.
#[derive(Debug)]
pub struct EphemeralServer;

impl EphemeralServer {
    /// Bind a listener on a random ephemeral port and start serving
    ///
    /// When this returns, the listener is accepting connections. The returned
    /// handle owns the server; dropping it (or calling
    /// [`ServerHandle::shutdown`]) stops the accept loop and releases the
    /// port.
    pub async fn start(
        codec: Codec,
        payload: Bytes,
        config: CompressionConfig,
    ) -> Result<ServerHandle> {
        let listener = Self::bind().await?;
        let addr = listener
            .local_addr()
            .map_err(|e| Error::ServerStart(format!("Failed to read local addr: {}", e)))?;

        let route = Arc::new(BenchmarkRoute {
            codec,
            payload,
            config,
        });

        let shutdown = ShutdownSignal::new();
        let mut shutdown_rx = shutdown.subscribe();

        tracing::debug!(%addr, codec = %codec, "Ephemeral server listening");

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, peer)) => {
                                tracing::trace!("Accepted connection from {}", peer);

                                let route = Arc::clone(&route);
                                tokio::spawn(async move {
                                    let service = hyper::service::service_fn(move |req| {
                                        let route = Arc::clone(&route);
                                        async move {
                                            route.handle(&req).or_else(|e| {
                                                tracing::error!("Request handler error: {}", e);
                                                Response::builder()
                                                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                                                    .body(Full::new(Bytes::from(
                                                        format!("Error: {}", e),
                                                    )))
                                            })
                                        }
                                    });

                                    let io = hyper_util::rt::TokioIo::new(stream);
                                    if let Err(e) = hyper::server::conn::http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        tracing::error!("HTTP connection error: {}", e);
                                    }
                                });
                            }
                            Err(e) => {
                                tracing::error!("Failed to accept connection: {}", e);
                            }
                        }
                    }

                    _ = shutdown_rx.recv() => {
                        tracing::trace!(%addr, "Ephemeral server stopping");
                        break;
                    }
                }
            }
            // Listener drops here, releasing the port
        });

        Ok(ServerHandle {
            addr,
            shutdown,
            task: Some(task),
        })
    }

    /// Pick a random ephemeral port and bind, retrying on collision
    async fn bind() -> Result<TcpListener> {
        let mut last_error = None;

        for attempt in 1..=MAX_BIND_ATTEMPTS {
            let port = rand::thread_rng().gen_range(PORT_RANGE_START..=PORT_RANGE_END);
            let addr = SocketAddr::from(([127, 0, 0, 1], port));

            match TcpListener::bind(addr).await {
                Ok(listener) => return Ok(listener),
                Err(e) => {
                    tracing::debug!(port, attempt, error = %e, "Bind failed, reselecting port");
                    last_error = Some(e);
                }
            }
        }

        Err(Error::ServerStart(format!(
            "No free port after {} attempts: {}",
            MAX_BIND_ATTEMPTS,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }
}

/// Handle to a running ephemeral server
///
/// Owns the accept loop. `shutdown` consumes the handle and waits for the
/// listener to close; dropping the handle triggers shutdown as a backstop so
/// the port is released on every exit path, including panics in the caller.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: ShutdownSignal,
    task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Address the server is listening on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL of the benchmark route
    pub fn route_url(&self) -> String {
        format!("http://{}{}", self.addr, BENCHMARK_ROUTE)
    }

    /// Stop the server and wait until the listener is closed
    pub async fn shutdown(mut self) {
        self.shutdown.trigger();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Ephemeral server task failed: {}", e);
            }
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.shutdown.trigger();
        }
    }
}

/// State for the single benchmark route
struct BenchmarkRoute {
    codec: Codec,
    payload: Bytes,
    config: CompressionConfig,
}

impl BenchmarkRoute {
    /// Serve one request
    ///
    /// Compression is applied only when the client's Accept-Encoding matches
    /// the configured codec; the coding itself is never hard-coded into the
    /// response. Caching is disabled so intermediaries cannot short-circuit a
    /// later run.
    fn handle(&self, req: &Request<Incoming>) -> Result<Response<Body>> {
        if req.method() != Method::GET || req.uri().path() != BENCHMARK_ROUTE {
            return Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Full::new(Bytes::from("Not found")))?);
        }

        let accept_encoding = req
            .headers()
            .get(header::ACCEPT_ENCODING)
            .and_then(|v| v.to_str().ok());

        let negotiated = Compressor::negotiate(accept_encoding, &[self.codec]).filter(|_| {
            self.config.should_compress(self.payload.len())
                && self.config.is_compressible_content_type("text/plain")
        });

        let (body, encoding) = match negotiated {
            Some(codec) => {
                let compressed = Compressor::compress(&self.payload, codec, self.config.level)?;
                (compressed, Some(codec.encoding_name()))
            }
            None => (self.payload.clone(), None),
        };

        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .header(header::CONTENT_LENGTH, body.len());

        if let Some(encoding) = encoding {
            builder = builder.header(header::CONTENT_ENCODING, HeaderValue::from_static(encoding));
        }

        Ok(builder.body(Full::new(body))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let payload = Bytes::from("hello world".repeat(64));
        let server = EphemeralServer::start(Codec::Gzip, payload, CompressionConfig::default())
            .await
            .unwrap();

        let addr = server.addr();
        assert!(addr.port() >= PORT_RANGE_START);

        server.shutdown().await;

        // Port must be released once shutdown returns
        let rebind = TcpListener::bind(addr).await;
        assert!(rebind.is_ok());
    }

    #[tokio::test]
    async fn test_route_url() {
        let payload = Bytes::from("x");
        let server = EphemeralServer::start(Codec::Brotli, payload, CompressionConfig::default())
            .await
            .unwrap();

        let url = server.route_url();
        assert!(url.starts_with("http://127.0.0.1:"));
        assert!(url.ends_with("/test"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_drop_releases_port() {
        let payload = Bytes::from("x");
        let server = EphemeralServer::start(Codec::Gzip, payload, CompressionConfig::default())
            .await
            .unwrap();

        let addr = server.addr();
        drop(server);

        // The accept loop needs a scheduling turn to observe the signal
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let rebind = TcpListener::bind(addr).await;
        assert!(rebind.is_ok());
    }
}
