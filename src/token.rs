//! Decodes the bot's own user id from its Discord token.
//!
//! The segment of a bot token before the first `.` is the base64url-encoded
//! ASCII decimal user id, so the id is known before the gateway's Ready
//! event ever fires. No network I/O happens here.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use crate::error::TokenError;
use crate::serenity;

/// Extracts the bot's [serenity::UserId] from its token.
pub fn user_id_from_token(token: &str) -> Result<serenity::UserId, TokenError> {
    let segment = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingSegment)?;

    // Discord strips the '=' padding from the token; normalize whatever
    // padding is present back to a multiple of four.
    let mut padded = segment.trim_end_matches('=').to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = URL_SAFE.decode(padded)?;

    let id: u64 = std::str::from_utf8(&bytes)
        .map_err(|_| TokenError::NotAUserId)?
        .parse()
        .map_err(|_| TokenError::NotAUserId)?;

    if id == 0 {
        return Err(TokenError::NotAUserId);
    }

    Ok(serenity::UserId::new(id))
}

#[cfg(test)]
mod test {
    use super::*;

    // "MTIzNDU2Nzg5MDEyMzQ1Njc4" is "123456789012345678" in base64url.
    const TOKEN: &str = "MTIzNDU2Nzg5MDEyMzQ1Njc4.X_rand.om-signature";

    #[test]
    fn decodes_first_segment() {
        let id = user_id_from_token(TOKEN).unwrap();
        assert_eq!(id.get(), 123_456_789_012_345_678);
    }

    #[test]
    fn padding_does_not_matter() {
        // Same id segment, 20 chars, with and without its natural padding.
        let unpadded = user_id_from_token("ODQzMjEwNjY2NTk2ODE3OTIx.a.b").unwrap();
        let padded = user_id_from_token("ODQzMjEwNjY2NTk2ODE3OTIx===.a.b").unwrap();
        assert_eq!(unpadded, padded);
        assert_eq!(unpadded.get(), 843_210_666_596_817_921);
    }

    #[test]
    fn rejects_non_base64() {
        let err = user_id_from_token("n!t b@se64.x.y").unwrap_err();
        assert!(matches!(err, TokenError::Base64(_)));
    }

    #[test]
    fn rejects_empty_segment() {
        let err = user_id_from_token(".x.y").unwrap_err();
        assert!(matches!(err, TokenError::MissingSegment));
    }

    #[test]
    fn rejects_non_numeric_payload() {
        // "aGVsbG8" decodes to "hello".
        let err = user_id_from_token("aGVsbG8.x.y").unwrap_err();
        assert!(matches!(err, TokenError::NotAUserId));
    }
}
