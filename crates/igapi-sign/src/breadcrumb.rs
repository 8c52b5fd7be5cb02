//! The typing breadcrumb attached when posting comments.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::{Result, SignError};

const BREADCRUMB_KEY: &[u8] = b"iN4$aGr0m";

/// Breadcrumb for a comment of `size` characters typed just now.
pub fn gen_user_breadcrumb(size: usize) -> Result<String> {
    let mut rng = rand::thread_rng();
    let time_elapsed = rng.gen_range(500..=1500) + size as u64 * rng.gen_range(500..=1500);
    let divisor = rng.gen_range(3..=5);
    user_breadcrumb(size, time_elapsed, divisor, chrono::Utc::now().timestamp_millis())
}

/// Deterministic breadcrumb from explicit typing figures.
///
/// Format: `base64(hmac) "\n" base64(data) "\n"` where data is
/// `"{size} {time_elapsed} {text_change_event_count} {timestamp_ms}"`.
pub fn user_breadcrumb(size: usize, time_elapsed: u64, divisor: u32, timestamp_ms: i64) -> Result<String> {
    let data = format!(
        "{size} {time_elapsed} {} {timestamp_ms}",
        event_count(size, divisor)
    );

    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(BREADCRUMB_KEY)
        .map_err(|_| SignError::InvalidKey)?;
    mac.update(data.as_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(format!("{}\n{}\n", STANDARD.encode(digest), STANDARD.encode(data.as_bytes())))
}

// Rendered like a float division with a floor of one, so `2.0` and `1.6666666666666667`.
fn event_count(size: usize, divisor: u32) -> String {
    let count = size as f64 / divisor.max(1) as f64;
    if count <= 1.0 {
        "1".to_string()
    } else if count.fract() == 0.0 {
        format!("{count:.1}")
    } else {
        format!("{count}")
    }
}
