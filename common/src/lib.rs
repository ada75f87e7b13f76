//! Bitmap avatars: random (optionally mirrored) black and white grids,
//! stored as grayscale PNGs under `<folder>/<key>.png`.

#[macro_use]
extern crate tracing;

mod avatar;
mod error;
mod generate;
mod markup;
pub mod render;
pub mod store;

pub use self::{
    avatar::Avatar,
    error::{Error, Result},
    generate::{AvatarGenerator, KeyAvatar, Method},
    markup::markup,
};
