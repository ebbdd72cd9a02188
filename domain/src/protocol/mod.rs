//! Wire vocabulary
//!
//! - [`packet`]: JSON packets sent to agents during real-time phases
//! - [`viewer`]: events forwarded to the live viewer

pub mod packet;
pub mod viewer;

pub use packet::{Info, Packet, Request};
pub use viewer::ViewerEvent;
