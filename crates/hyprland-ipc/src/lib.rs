pub mod client;
pub mod events;

pub use client::HyprlandIpc;
pub use events::{parse_event, ActiveWindow, HyprlandEvent, WorkspaceRef};
