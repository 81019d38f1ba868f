//! Native HTTP server implementation
//!
//! hyper/tokio serving glue for the greeting handler:
//! - per-connection http1 serving on a multi-threaded tokio runtime
//! - SO_REUSEPORT listener setup for kernel load balancing
//! - hot-swappable translation table for configuration reload

use crate::handlers::Greeting;
use crate::{Error, GreetingConfig, Method, Request, Response, Result, TranslationTable};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use parking_lot::RwLock;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub hostname: String,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            hostname: "0.0.0.0".to_string(),
            workers: num_cpus::get(),
        }
    }
}

/// Server state shared across all connections
///
/// The active translation table sits behind a read lock so a configuration
/// reload can swap it without disturbing in-flight requests; each request
/// takes a cheap `Arc` clone and never observes a partial table.
pub struct ServerState {
    config: GreetingConfig,
    table: RwLock<Arc<TranslationTable>>,
}

impl ServerState {
    /// Build the initial table; a broken configuration refuses to start.
    pub fn new(config: GreetingConfig) -> Result<Self> {
        let table = Arc::new(config.build_table()?);
        Ok(Self {
            config,
            table: RwLock::new(table),
        })
    }

    /// The currently active table
    pub fn table(&self) -> Arc<TranslationTable> {
        self.table.read().clone()
    }

    /// Rebuild the table from configuration.
    ///
    /// A failed rebuild returns the error and leaves the previous table
    /// serving.
    pub fn reload(&self) -> Result<()> {
        let table = Arc::new(self.config.build_table()?);
        *self.table.write() = table;
        Ok(())
    }

    /// Handle one request against the active table
    pub fn handle(&self, req: &Request) -> Response {
        Greeting::new(self.table()).handle(req)
    }
}

/// Create a TCP listener socket with the usual optimizations
pub fn create_listener_socket(addr: &SocketAddr) -> std::io::Result<Socket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // SO_REUSEADDR - allow binding to address in TIME_WAIT
    socket.set_reuse_address(true)?;

    // SO_REUSEPORT - enable kernel load balancing across threads
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    // TCP_NODELAY - disable Nagle's algorithm for lower latency
    socket.set_nodelay(true)?;

    socket.bind(&(*addr).into())?;
    socket.listen(1024)?;

    Ok(socket)
}

/// Convert a hyper request to our Request type
pub fn from_hyper_request(req: &hyper::Request<Incoming>) -> Request {
    let method = Method::parse(req.method().as_str()).unwrap_or(Method::Get);
    let mut request = Request::new(method, req.uri().path());

    for (name, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            request.headers.push((name.to_string(), v.to_string()));
        }
    }

    request
}

/// Convert our Response to a hyper Response
pub fn to_hyper_response(res: Response) -> hyper::Response<Full<Bytes>> {
    let mut builder = hyper::Response::builder().status(res.status.as_u16());

    for (name, value) in &res.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.body(Full::new(res.body)).unwrap_or_else(|_| {
        hyper::Response::builder()
            .status(500)
            .body(Full::new(Bytes::from_static(b"internal error")))
            .expect("static error response")
    })
}

/// Accept connections and serve the greeting handler on every path.
///
/// Returns cleanly once `tracker.start_shutdown()` has been signalled;
/// spawned connections drain on their own tasks.
pub async fn serve(
    config: ServerConfig,
    state: Arc<ServerState>,
    tracker: Arc<ConnectionTracker>,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.hostname, config.port)
        .parse()
        .map_err(|e| Error::Hyper(format!("invalid listen address: {e}")))?;

    let socket = create_listener_socket(&addr)?;
    socket.set_nonblocking(true)?;
    let listener = TcpListener::from_std(socket.into())?;

    loop {
        let (stream, _) = tokio::select! {
            accepted = listener.accept() => accepted?,
            () = tracker.shutdown_signalled() => return Ok(()),
        };

        let io = TokioIo::new(stream);
        let state = state.clone();
        let tracker = tracker.clone();

        tokio::spawn(async move {
            tracker.increment();

            let service = hyper::service::service_fn(move |req: hyper::Request<Incoming>| {
                let state = state.clone();
                async move {
                    let request = from_hyper_request(&req);
                    Ok::<_, std::convert::Infallible>(to_hyper_response(state.handle(&request)))
                }
            });

            // Connection errors are per-client, not fatal to the server.
            hyper::server::conn::http1::Builder::new()
                .serve_connection(io, service)
                .await
                .ok();

            tracker.decrement();
        });
    }
}

// ============================================================================
// Connection Tracking for Graceful Shutdown
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Tracks active connections for graceful shutdown
///
/// The shutdown signal is a watch channel so the accept loop can wait on
/// it without polling; an accepted connection is always served, never
/// dropped on the floor.
#[derive(Debug)]
pub struct ConnectionTracker {
    /// Active connection count
    active: AtomicU64,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionTracker {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            active: AtomicU64::new(0),
            shutdown_tx,
            shutdown_rx,
        }
    }

    #[inline]
    pub fn increment(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    #[inline]
    pub fn decrement(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Signal that shutdown is in progress
    pub fn start_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    #[inline]
    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Resolves once shutdown has been signalled; immediately if it
    /// already was.
    pub async fn shutdown_signalled(&self) {
        let mut rx = self.shutdown_rx.clone();
        // The sender lives in self, so the channel cannot close early.
        let _ = rx.wait_for(|signalled| *signalled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestBuilder;

    #[test]
    fn test_server_state_serves_greeting() {
        let state = ServerState::new(GreetingConfig::new()).unwrap();

        let req = RequestBuilder::new(Method::Get, "/")
            .header("Accept-Language", "fr")
            .build();
        let res = state.handle(&req);

        assert_eq!(res.status.as_u16(), 200);
        assert_eq!(res.body_string().as_deref(), Some("bonjour monde\n"));
    }

    #[test]
    fn test_reload_keeps_serving() {
        let state = ServerState::new(GreetingConfig::new().default_language("en")).unwrap();
        let before = state.table();

        state.reload().unwrap();
        let after = state.table();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.lookup("en"), Some("hello world"));
    }

    #[test]
    fn test_connection_tracker() {
        let tracker = ConnectionTracker::new();
        tracker.increment();
        tracker.increment();
        tracker.decrement();
        assert_eq!(tracker.count(), 1);

        assert!(!tracker.is_shutting_down());
        tracker.start_shutdown();
        assert!(tracker.is_shutting_down());
    }

    #[tokio::test]
    async fn test_shutdown_wakes_waiters() {
        let tracker = Arc::new(ConnectionTracker::new());

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.shutdown_signalled().await })
        };

        tracker.start_shutdown();
        waiter.await.unwrap();
        assert!(tracker.is_shutting_down());
    }

    #[tokio::test]
    async fn test_shutdown_signalled_resolves_when_already_down() {
        let tracker = ConnectionTracker::new();
        tracker.start_shutdown();
        tracker.shutdown_signalled().await;
    }
}
