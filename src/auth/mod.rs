//! The session token and its storage in a private cookie.

mod cookie;
mod session;
mod token_store;

pub use session::{Session, Token};
pub use token_store::TokenStore;

pub(crate) use cookie::DEFAULT_TOKEN_DURATION;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
