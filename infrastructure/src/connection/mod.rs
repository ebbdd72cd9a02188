//! Agent connections over line-delimited JSON.
//!
//! - [`LineConnection`]: [`AgentConnection`](realtalk_application::AgentConnection)
//!   over any byte stream, one JSON packet or text message per line
//! - [`accept_agents`]: seats the first N TCP clients as agents

mod acceptor;
mod codec;
mod line_connection;

pub use acceptor::accept_agents;
pub use line_connection::{LineConnection, MAX_LINE_LENGTH};
