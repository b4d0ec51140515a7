pub mod backend;
pub mod bridge;
pub mod error;
pub mod http;
pub mod key;
pub mod projector;
pub mod resolver;
pub mod token;

pub use backend::{ChannelState, ChatBackend, ChatConnector, ChatMember, ChatUser, MessagePreview};
pub use bridge::{BridgeStatus, SessionBridge};
pub use error::{ChatError, ResolveError};
pub use http::HttpChatBackend;
pub use key::{PairingError, canonical_key};
pub use projector::list_conversations;
pub use resolver::{Resolution, resolve_channel};
pub use token::{TokenError, TokenIssuer};
