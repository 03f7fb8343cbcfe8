pub mod errors;
pub mod id;
pub mod message;

pub use errors::{ConfigError, NyayaError, StoreError};
pub use id::{new_id, SessionId};
pub use message::{Author, Message};

pub type Result<T> = std::result::Result<T, NyayaError>;
