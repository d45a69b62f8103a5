pub mod adapter;
pub mod config;
pub mod middleware;
pub mod session;
pub mod transport;

pub use config::SessionConfig;
pub use session::GameSession;
pub use transport::{ChannelTransport, ServerHandle, Subscription, Transport};
