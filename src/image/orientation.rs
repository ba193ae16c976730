//! EXIF orientation handling.
//!
//! The eight EXIF orientation cases, each paired with the pixel transform
//! that brings the stored buffer to visual upright. Applied once at load
//! time; derivatives carry no orientation tag afterwards.

use image::DynamicImage;

/// Image orientation per the EXIF orientation tag (values 1-8).
///
/// Each variant names the transform that must be applied to the stored
/// pixels so that (0,0) lands at the upper-left of the visually upright
/// image.
///
/// | EXIF | Variant    | Transform              | Swaps axes? |
/// |------|------------|------------------------|-------------|
/// | 1    | Identity   | none                   | no          |
/// | 2    | FlipH      | horizontal flip        | no          |
/// | 3    | Rotate180  | 180° rotation          | no          |
/// | 4    | FlipV      | vertical flip          | no          |
/// | 5    | Transpose  | 90° CW + flip          | yes         |
/// | 6    | Rotate90   | 90° CW rotation        | yes         |
/// | 7    | Transverse | 270° CW + flip         | yes         |
/// | 8    | Rotate270  | 270° CW rotation       | yes         |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Identity,
    FlipH,
    Rotate180,
    FlipV,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Create from an EXIF orientation tag (1-8). Returns `None` for
    /// invalid values.
    pub const fn from_exif(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Identity),
            2 => Some(Self::FlipH),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipV),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Convert back to the EXIF orientation tag (1-8).
    pub const fn to_exif(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::FlipH => 2,
            Self::Rotate180 => 3,
            Self::FlipV => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Whether the upright transform swaps width and height.
    pub const fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Stored dimensions to upright dimensions.
    pub const fn upright_dimensions(self, w: u32, h: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Apply the upright transform to a pixel buffer.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Identity => image,
            Self::FlipH => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipV => image.flipv(),
            Self::Transpose => image.rotate90().fliph(),
            Self::Rotate90 => image.rotate90(),
            Self::Transverse => image.rotate270().fliph(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}
