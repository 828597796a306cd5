//! HTTP client facade for the KIE server
//!
//! One [`KieClient`] is built per inbound call from the [`Connection`] the
//! caller supplies; every outbound request carries that connection's basic
//! auth credentials. The wire types mirror the engine's JSON shapes and are
//! mapped into domain types by the service layer, not here.
//!
//! [`Connection`]: pda_kie_core::Connection

mod client;
mod error;
mod types;


pub use client::{KieClient, TaskQuery};
pub use error::ClientError;
pub use types::{KieComment, KieTaskInstance, KieTaskSummary, QueryDefinition, RAW_LIST_MAPPER};
