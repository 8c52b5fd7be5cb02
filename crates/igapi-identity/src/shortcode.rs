//! Conversion between numeric media ids and the shortcodes used in web links.
//!
//! Shortcodes are the base-64 digits of the media pk, most significant first,
//! over the URL-safe alphabet. Does not apply to private accounts.

use crate::error::{IdentityError, Result};

const ENCODING_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const BASE: u64 = ENCODING_CHARS.len() as u64;

fn digit_value(ch: char) -> Option<u64> {
    let d = match ch {
        'A'..='Z' => ch as u64 - 'A' as u64,
        'a'..='z' => ch as u64 - 'a' as u64 + 26,
        '0'..='9' => ch as u64 - '0' as u64 + 52,
        '-' => 62,
        '_' => 63,
        _ => return None,
    };
    Some(d)
}

pub struct InstagramId;

impl InstagramId {
    /// Shortcode for a numeric media pk.
    pub fn shorten_id(internal_id: u64) -> String {
        if internal_id == 0 {
            return (ENCODING_CHARS[0] as char).to_string();
        }

        let mut digits = Vec::new();
        let mut num = internal_id;
        while num > 0 {
            digits.push(ENCODING_CHARS[(num % BASE) as usize]);
            num /= BASE;
        }
        digits.iter().rev().map(|&b| b as char).collect()
    }

    /// Shortcode for a media id of the form `{pk}_{user_id}`.
    pub fn shorten_media_id(media_id: &str) -> Result<String> {
        let pk = media_id.split('_').next().unwrap_or_default();
        let pk = pk
            .parse::<u64>()
            .map_err(|_| IdentityError::InvalidMediaId(media_id.to_string()))?;
        Ok(Self::shorten_id(pk))
    }

    /// Numeric media pk for a shortcode.
    pub fn expand_code(short_code: &str) -> Result<u64> {
        short_code.chars().try_fold(0u64, |acc, ch| {
            let digit = digit_value(ch).ok_or_else(|| IdentityError::InvalidShortcode {
                code: short_code.to_string(),
                ch,
            })?;
            acc.checked_mul(BASE)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| IdentityError::ShortcodeOverflow(short_code.to_string()))
        })
    }

    pub fn weblink_from_media_id(media_id: &str) -> Result<String> {
        Ok(format!("https://www.instagram.com/p/{}/", Self::shorten_media_id(media_id)?))
    }
}
