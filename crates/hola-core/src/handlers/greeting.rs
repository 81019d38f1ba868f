//! Greeting content handler
//!
//! Negotiates the response language from the Accept-Language header: each
//! header token is resolved against the translation table, misses are
//! dropped, and the matched greetings are emitted in descending quality
//! order, one per line. Ties keep header order (the sort is stable), so
//! output is deterministic for any given header.

use crate::request::Method;
use crate::{Error, Request, Response, ResponseBuilder, Result, StatusCode, TranslationTable};
use bytes::Bytes;
use std::sync::Arc;

/// Fixed response body when the header is absent or nothing matches.
pub const FALLBACK_TEXT: &str =
    "Accept Language header not found or no valid languages found.";

/// Ordered response body chunks produced by negotiation.
///
/// Each chunk is one greeting text without its terminator; [`to_bytes`]
/// appends a line feed per chunk and [`len`] is the exact byte length of
/// the assembled body, so Content-Length can be set before assembly.
///
/// [`to_bytes`]: ResponseChain::to_bytes
/// [`len`]: ResponseChain::len
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseChain {
    chunks: Vec<String>,
}

impl ResponseChain {
    fn new(chunks: Vec<String>) -> Self {
        Self { chunks }
    }

    fn fallback() -> Self {
        Self::new(vec![FALLBACK_TEXT.to_string()])
    }

    /// The chunk texts, in response order
    pub fn texts(&self) -> &[String] {
        &self.chunks
    }

    /// Total body length in bytes, one line-feed terminator per chunk
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.len() + 1).sum()
    }

    /// A chain is never empty; negotiation falls back instead
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Assemble the response body.
    ///
    /// Buffer reservation failure is the one request-time error; the HTTP
    /// layer maps it to a 500 response.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = Vec::new();
        buf.try_reserve(self.len())
            .map_err(|_| Error::ResourceExhausted)?;

        for chunk in &self.chunks {
            buf.extend_from_slice(chunk.as_bytes());
            buf.push(b'\n');
        }

        Ok(Bytes::from(buf))
    }
}

/// Greeting handler
///
/// Holds the translation table for one configuration scope. Negotiation
/// state is request-local, so one handler value serves any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Greeting {
    table: Arc<TranslationTable>,
}

impl Greeting {
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self { table }
    }

    /// The table this handler serves from
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Negotiate response content for one request.
    ///
    /// An absent header, unknown codes, and malformed qualifiers all
    /// degrade to the fallback sentence or default quality; the only
    /// failure is buffer exhaustion while collecting matches.
    pub fn negotiate(&self, header: Option<&str>) -> Result<ResponseChain> {
        let Some(header) = header else {
            return Ok(ResponseChain::fallback());
        };

        let tokens = hola_accept::parse(header);

        let mut matches: Vec<(&str, u8)> = Vec::new();
        matches
            .try_reserve(tokens.len())
            .map_err(|_| Error::ResourceExhausted)?;
        for token in &tokens {
            if let Some(text) = self.table.lookup(&token.code) {
                matches.push((text, token.quality));
            }
        }

        if matches.is_empty() {
            return Ok(ResponseChain::fallback());
        }

        // Stable sort: ties keep header order.
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        let chunks = matches.into_iter().map(|(text, _)| text.to_string()).collect();
        Ok(ResponseChain::new(chunks))
    }

    /// Handle an HTTP request for the greeting resource
    pub fn handle(&self, req: &Request) -> Response {
        if req.method != Method::Get && req.method != Method::Head {
            return ResponseBuilder::new(StatusCode::METHOD_NOT_ALLOWED)
                .header("Content-Type", "text/plain")
                .body("Method not allowed")
                .build();
        }

        let chain = match self.negotiate(req.accept_language()) {
            Ok(chain) => chain,
            Err(_) => return Response::internal_error("could not assemble response"),
        };

        let body = match chain.to_bytes() {
            Ok(body) => body,
            Err(_) => return Response::internal_error("could not assemble response"),
        };

        let builder = ResponseBuilder::new(StatusCode::OK)
            .header("Content-Type", "text/plain")
            .header("Content-Length", chain.len().to_string());

        if req.method == Method::Head {
            builder.build()
        } else {
            builder.body(body).build()
        }
    }
}
