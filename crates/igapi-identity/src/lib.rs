//! Device identity and id helpers for the Instagram app API.
//!
//! Everything here is pure: no I/O, no hidden state beyond the arguments.
//!
//! - [`device`] - UUID, device id, advertising id and phone id derivation
//! - [`useragent`] - The app user-agent grammar and its parser
//! - [`shortcode`] - Conversion between numeric media ids and web shortcodes
//! - [`media`] - Media type ids
//! - [`rank`] - Rank token validation

pub use self::device::{
    DeviceIdentity, generate_ad_id, generate_device_id, generate_uuid, phone_id,
};
pub use self::error::{IdentityError, Result};
pub use self::media::MediaType;
pub use self::rank::validate_rank_token;
pub use self::shortcode::InstagramId;
pub use self::useragent::{DeviceProfile, generate_useragent, validate_useragent};

pub mod device;
mod error;
pub mod media;
pub mod rank;
pub mod shortcode;
pub mod useragent;
