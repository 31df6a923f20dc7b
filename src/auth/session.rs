//! The in-memory session: at most one bearer token.

use std::fmt;

/// An opaque bearer credential issued by the ClaritySpend API.
///
/// The token is never inspected or validated locally. Its [fmt::Debug]
/// output is redacted so tokens do not end up in the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a token string issued by the API.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(********)")
    }
}

/// The current user's session.
///
/// A session with no token means the user is logged out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<Token>,
}

impl Session {
    /// The token for the current session, if any.
    pub fn current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Replace the session's token.
    pub fn set(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// End the session.
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Whether the session holds a token.
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }
}
