//! Caller identification from the `Authorization` header.
//!
//! The header carries `Basic base64(user_id:anything)`. Only the user id is
//! read; nothing after the colon is checked, so any client can claim any id.
//! This identifies callers, it does not authenticate them.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    Missing,
    
    #[error("authorization scheme must be Basic")]
    Scheme,
    
    #[error("credentials are not valid base64")]
    Encoding,
    
    #[error("credentials must look like `user_id:secret`")]
    Format,
    
    #[error("user id is not an integer")]
    UserId,
}

/// Extract the user id from a `Basic` authorization header value.
pub fn parse_basic_user_id(header_value: &str) -> Result<i64, AuthError> {
    let (scheme, payload) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::Scheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::Scheme);
    }
    
    let decoded = BASE64
        .decode(payload.trim())
        .map_err(|_| AuthError::Encoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Encoding)?;
    
    let (user_id, _) = decoded.split_once(':').ok_or(AuthError::Format)?;
    user_id.parse::<i64>().map_err(|_| AuthError::UserId)
}

/// Id of the calling user, taken verbatim from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;
    
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::Missing)?
            .to_str()
            .map_err(|_| AuthError::Encoding)?;
        
        Ok(AuthUser(parse_basic_user_id(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn basic(raw: &str) -> String {
        format!("Basic {}", BASE64.encode(raw))
    }
    
    #[test]
    fn test_parses_leading_user_id() {
        assert_eq!(parse_basic_user_id(&basic("1:whatever")), Ok(1));
        assert_eq!(parse_basic_user_id(&basic("42:")), Ok(42));
        assert_eq!(parse_basic_user_id(&basic("7:a:b:c")), Ok(7));
    }
    
    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = format!("basic {}", BASE64.encode("5:x"));
        assert_eq!(parse_basic_user_id(&header), Ok(5));
    }
    
    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(parse_basic_user_id("Bearer abc"), Err(AuthError::Scheme));
        assert_eq!(parse_basic_user_id("Basic"), Err(AuthError::Scheme));
    }
    
    #[test]
    fn test_rejects_invalid_base64() {
        assert_eq!(parse_basic_user_id("Basic !!!not-base64!!!"), Err(AuthError::Encoding));
    }
    
    #[test]
    fn test_rejects_missing_colon() {
        assert_eq!(parse_basic_user_id(&basic("12")), Err(AuthError::Format));
    }
    
    #[test]
    fn test_rejects_non_integer_id() {
        assert_eq!(parse_basic_user_id(&basic("alice:pw")), Err(AuthError::UserId));
        assert_eq!(parse_basic_user_id(&basic(":pw")), Err(AuthError::UserId));
    }
}
