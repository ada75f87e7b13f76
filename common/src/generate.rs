use crate::{
    avatar::{Avatar, checked_dimensions},
    error::Result,
};
use rand::{RngCore, rngs::OsRng};
use std::{convert::Infallible, fmt, str::FromStr};

/// How the pixels of a fresh avatar get picked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Every pixel is random
    #[default]
    Random,

    /// Left half is random, right half mirrors it
    Symmetric,
}

impl Method {
    /// Maps a selector name onto a method.
    ///
    /// Only `"symmetric"` is special. Everything else, including `"none"`, the
    /// empty string and names this version doesn't know, picks [`Method::Random`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "symmetric" => Self::Symmetric,
            _ => Self::Random,
        }
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "none",
            Self::Symmetric => "symmetric",
        })
    }
}

/// An avatar together with the key it is stored under.
///
/// The key ends up verbatim in file names and markup. Sanitize it first if it
/// comes from untrusted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAvatar {
    pub key: String,
    pub avatar: Avatar,
}

impl KeyAvatar {
    /// Generates an avatar from the operating system's entropy source
    pub fn generate(
        key: impl Into<String>,
        width: i32,
        height: i32,
        method: impl Into<Method>,
    ) -> Result<Self> {
        OsRng.generate_keyed(key, width, height, method.into())
    }
}

/// Source of fresh avatars
pub trait AvatarGenerator {
    /// Fills every pixel at random
    fn generate(&mut self, width: i32, height: i32) -> Result<Avatar>;

    /// Fills the left half at random and mirrors it onto the right half
    fn generate_symmetric(&mut self, width: i32, height: i32) -> Result<Avatar>;

    fn generate_keyed(
        &mut self,
        key: impl Into<String>,
        width: i32,
        height: i32,
        method: Method,
    ) -> Result<KeyAvatar> {
        let avatar = match method {
            Method::Symmetric => self.generate_symmetric(width, height)?,
            Method::Random => self.generate(width, height)?,
        };

        Ok(KeyAvatar {
            key: key.into(),
            avatar,
        })
    }
}

impl<R> AvatarGenerator for R
where
    R: RngCore + ?Sized,
{
    fn generate(&mut self, width: i32, height: i32) -> Result<Avatar> {
        let (_, _, len) = checked_dimensions(width, height)?;

        let mut pixels = vec![0; len];
        self.try_fill_bytes(&mut pixels)?;

        // clears the padding bits the entropy landed in
        Avatar::from_pixels(width, height, pixels)
    }

    fn generate_symmetric(&mut self, width: i32, height: i32) -> Result<Avatar> {
        let mut avatar = Avatar::blank(width, height)?;
        let half_width = width - width / 2;

        // one draw per pixel, the low bit decides
        let mut draw = [0; 1];
        for y in 0..height {
            for x in 0..half_width {
                self.try_fill_bytes(&mut draw)?;
                let value = draw[0] & 1 == 1;

                avatar.set(x, y, value);
                let mirror_x = width - 1 - x;
                if mirror_x != x {
                    avatar.set(mirror_x, y, value);
                }
            }
        }

        Ok(avatar)
    }
}

impl Avatar {
    /// Random avatar from the operating system's entropy source
    pub fn random(width: i32, height: i32) -> Result<Self> {
        OsRng.generate(width, height)
    }

    /// Mirrored avatar from the operating system's entropy source
    pub fn symmetric(width: i32, height: i32) -> Result<Self> {
        OsRng.generate_symmetric(width, height)
    }
}
