//! Built-in request handlers

pub mod greeting;

pub use greeting::{Greeting, ResponseChain, FALLBACK_TEXT};
