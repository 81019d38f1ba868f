//! hola-core: multilingual greeting service
//!
//! Serves "hello world" in the client's preferred language. The
//! `Accept-Language` header is tokenized (see `hola-accept`), each code is
//! resolved against an immutable [`TranslationTable`] built at
//! configuration time, and the matched greetings are emitted in descending
//! quality order, one per line. When the header is absent or nothing
//! matches, a fixed fallback sentence is served instead.
//!
//! ## Features
//! - `native` - hyper/tokio serving glue ([`server`])

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod translations;

#[cfg(feature = "native")]
pub mod server;

// Re-exports
pub use config::GreetingConfig;
pub use error::{Error, Result};
pub use request::{Method, Request, RequestBuilder};
pub use response::{Response, ResponseBuilder, StatusCode};
pub use translations::TranslationTable;

// Handler re-exports
pub use handlers::{Greeting, ResponseChain, FALLBACK_TEXT};

#[cfg(feature = "native")]
pub use server::{serve, ConnectionTracker, ServerConfig, ServerState};

#[cfg(feature = "native")]
pub use server::{create_listener_socket, from_hyper_request, to_hyper_response};
