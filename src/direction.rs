//! Structs to help convert between a relative and absolute direction.
use std::fmt;

/// The layout direction of a [`Node`].
///
/// A node's children (or text items) are sequenced along this axis. The
/// perpendicular axis is the node's cross axis.
///
/// [`Node`]: crate::Node
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Flow {
    /// Children are arranged on the horizontal axis, left to right.
    #[default]
    Cols,

    /// Children are arranged on the vertical axis, top to bottom.
    Rows,
}

/// A `T` that applies to the `width` and `height` of something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size<T> {
    /// `T` on the horizontal axis.
    pub width: T,
    /// `T` on the vertical axis.
    pub height: T,
}

/// Similar to [`Size`], but relative to a [`Flow`] direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Oriented<T> {
    /// `T` on the same axis as the [`Flow`].
    pub main: T,
    /// `T` on the perpendicular axis of the [`Flow`].
    pub cross: T,
}

impl Flow {
    /// The perpendicular direction.
    #[must_use]
    pub const fn perp(self) -> Self {
        match self {
            Self::Cols => Self::Rows,
            Self::Rows => Self::Cols,
        }
    }
    /// Returns [`Size`] oriented according to this direction.
    ///
    /// This is the inverse of [`Flow::absolute`].
    pub const fn relative<T: Copy>(self, Size { width, height }: Size<T>) -> Oriented<T> {
        match self {
            Self::Cols => Oriented { main: width, cross: height },
            Self::Rows => Oriented { main: height, cross: width },
        }
    }
    /// Returns [`Oriented`] according to the global point of view.
    ///
    /// This is the inverse of [`Flow::relative`].
    pub const fn absolute<T: Copy>(self, Oriented { main, cross }: Oriented<T>) -> Size<T> {
        match self {
            Self::Cols => Size { width: main, height: cross },
            Self::Rows => Size { width: cross, height: main },
        }
    }
}

impl<T> Size<T> {
    /// Create a [`Size`] for given `width` and `height` `T`.
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
    /// Create a [`Size`] where `width` and `height` are set to `value`.
    pub fn all(value: T) -> Self
    where
        T: Clone,
    {
        Size { width: value.clone(), height: value }
    }
    /// Apply `f` on `width` and `height`, returning a `Size` with the output
    /// values of `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Size<U> {
        Size { width: f(self.width), height: f(self.height) }
    }
}

impl Size<u32> {
    /// A `Size<u32>` with 0 width and 0 height.
    pub const ZERO: Self = Size { width: 0, height: 0 };
}

impl<T: Copy> Oriented<T> {
    /// Create an [`Oriented`] for given `main` and `cross` `T`.
    pub const fn new(main: T, cross: T) -> Self {
        Self { main, cross }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Cols => f.write_str("width"),
            Flow::Rows => f.write_str("height"),
        }
    }
}
impl<T: fmt::Display> fmt::Display for Size<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}
