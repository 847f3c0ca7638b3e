pub mod password;
pub mod token;

pub use token::{Claims, TokenConfig, TokenError, TokenKind, TokenManager, TokenPair};
