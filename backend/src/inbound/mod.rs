//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The JSON HTTP API lives under [`http`].

pub mod http;
