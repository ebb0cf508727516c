#![doc = include_str!("../README.md")]

pub use direction::{Flow, Oriented, Size};
pub use error::TreeError;
pub use layout::Layout;
pub use node::{Node, TextItem};
pub use rect::{Padding, Rect};
pub use surface::Surface;

mod direction;
mod error;
mod layout;
mod node;
mod rect;
mod sizing;
mod surface;
