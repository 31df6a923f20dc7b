//! Headers for requests that must carry the session's bearer token.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::{Error, auth::Session};

/// The headers for an authenticated call to the ClaritySpend API.
///
/// Construction fails when the session holds no token, so an
/// [AuthHeaders] value is proof that the call may be sent.
#[derive(Debug, Clone)]
pub struct AuthHeaders(HeaderMap);

impl AuthHeaders {
    /// Headers for a call with a JSON body: the bearer token and
    /// `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthenticated] if the session has no token, or
    /// [Error::InvalidToken] if the token cannot be sent in a header.
    pub fn json(session: &Session) -> Result<Self, Error> {
        let mut headers = Self::bearer(session)?;
        headers
            .0
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Headers for a multipart upload: only the bearer token.
    ///
    /// The content type is left to the HTTP client so that it can add the
    /// multipart boundary.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthenticated] if the session has no token, or
    /// [Error::InvalidToken] if the token cannot be sent in a header.
    pub fn multipart(session: &Session) -> Result<Self, Error> {
        Self::bearer(session)
    }

    fn bearer(session: &Session) -> Result<Self, Error> {
        let token = session.current().ok_or(Error::Unauthenticated)?;

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| Error::InvalidToken)?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);

        Ok(Self(headers))
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.0.get(name)
    }

    /// Consume the wrapper, returning the headers to attach to a request.
    pub fn into_inner(self) -> HeaderMap {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        auth::{Session, Token},
    };

    use super::AuthHeaders;

    fn session_with(token: &str) -> Session {
        let mut session = Session::default();
        session.set(Token::new(token));
        session
    }

    #[test]
    fn json_headers_include_bearer_and_content_type() {
        let headers = AuthHeaders::json(&session_with("abc.def")).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "Bearer abc.def");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn multipart_headers_omit_content_type() {
        let headers = AuthHeaders::multipart(&session_with("abc.def")).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "Bearer abc.def");
        assert!(headers.get("content-type").is_none());
    }

    #[test]
    fn fails_without_token() {
        let session = Session::default();

        assert_eq!(
            AuthHeaders::json(&session).unwrap_err(),
            Error::Unauthenticated
        );
        assert_eq!(
            AuthHeaders::multipart(&session).unwrap_err(),
            Error::Unauthenticated
        );
    }

    #[test]
    fn fails_with_token_that_cannot_be_a_header() {
        let result = AuthHeaders::json(&session_with("bad\ntoken"));

        assert_eq!(result.unwrap_err(), Error::InvalidToken);
    }

    #[test]
    fn token_is_hidden_in_debug_output() {
        let headers = AuthHeaders::json(&session_with("secret-token")).unwrap();

        let debug = format!("{headers:?}");

        assert!(!debug.contains("secret-token"), "token leaked in {debug}");
    }
}
