//! Event Sink Implementations
//!
//! Provides concrete implementations of RunEventSink:
//! - JsonEventSink: NDJSON output for CI/automation

mod json;

pub use json::{event_to_json, JsonEventSink};
