//! Media type ids as they appear in `media_type` fields.

use crate::error::{IdentityError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MediaType {
    Photo = 1,
    Video = 2,
    Carousel = 8,
}

impl MediaType {
    pub fn id(self) -> u8 { self as u8 }

    pub fn name(self) -> &'static str {
        match self {
            MediaType::Photo => "image",
            MediaType::Video => "video",
            MediaType::Carousel => "carousel",
        }
    }

    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            1 => Ok(MediaType::Photo),
            2 => Ok(MediaType::Video),
            8 => Ok(MediaType::Carousel),
            other => Err(IdentityError::UnknownMediaTypeId(other)),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "image" => Ok(MediaType::Photo),
            "video" => Ok(MediaType::Video),
            "carousel" => Ok(MediaType::Carousel),
            other => Err(IdentityError::UnknownMediaTypeName(other.to_string())),
        }
    }

    pub fn id_to_name(id: i64) -> Result<&'static str> { Self::from_id(id).map(Self::name) }

    pub fn name_to_id(name: &str) -> Result<u8> { Self::from_name(name).map(Self::id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_is_image() {
        assert_eq!(MediaType::id_to_name(MediaType::Photo.id() as i64).unwrap(), "image");
        assert_eq!(MediaType::name_to_id("image").unwrap(), 1);
        assert_eq!(MediaType::name_to_id("carousel").unwrap(), 8);
    }

    #[test]
    fn unknown_values_fail() {
        assert_eq!(MediaType::id_to_name(-1), Err(IdentityError::UnknownMediaTypeId(-1)));
        assert!(MediaType::name_to_id("x").is_err());
    }
}
