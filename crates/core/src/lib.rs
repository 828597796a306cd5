//! Domain value types for the KIE adapter
//!
//! Everything here is a request-scoped value object: nothing survives beyond
//! a single inbound dashboard call, and nothing holds a connection open.

mod comment;
mod connection;
mod error;
mod id;
mod paging;
mod summary;
mod task;

pub use comment::*;
pub use connection::*;
pub use error::*;
pub use id::*;
pub use paging::*;
pub use summary::*;
pub use task::*;
