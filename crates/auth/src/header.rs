//! `Authorization: ApiKey <token>` parsing.

use crate::Error;
use http::{HeaderMap, header::AUTHORIZATION};

/// Scheme token expected before the key. Compared case-sensitively.
pub const SCHEME: &[u8] = b"ApiKey";

/// Extract the API key from the `Authorization` header.
///
/// Only the first `Authorization` value is considered. The value is split on
/// its first space; the part before must be exactly `ApiKey` and everything
/// after is returned verbatim, untrimmed and possibly empty. Rejecting an
/// empty key is left to the caller.
///
/// ```
/// use http::HeaderMap;
/// use keygate_auth::{Error, extract_api_key};
///
/// let mut headers = HeaderMap::new();
/// assert!(matches!(extract_api_key(&headers), Err(Error::NoAuthHeader)));
///
/// headers.insert("authorization", "ApiKey abc123".parse().unwrap());
/// assert_eq!(extract_api_key(&headers).unwrap(), "abc123");
/// ```
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers.get(AUTHORIZATION).ok_or(Error::NoAuthHeader)?;
    let bytes = value.as_bytes();

    let space = bytes
        .iter()
        .position(|&b| b == b' ')
        .ok_or(Error::MalformedAuthHeader)?;
    let (scheme, rest) = (&bytes[..space], &bytes[space + 1..]);
    if scheme != SCHEME {
        return Err(Error::MalformedAuthHeader);
    }

    std::str::from_utf8(rest).map_err(|_| Error::MalformedAuthHeader)
}
