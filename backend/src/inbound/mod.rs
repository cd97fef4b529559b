//! Inbound adapters translating external requests into driving-port calls.
//!
//! Framework details stay here; handlers only see domain types and ports.

pub mod http;
