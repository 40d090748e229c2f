use image::RgbaImage;

use super::{CroppableBuffer, reconstruct};
use crate::error::{Result, SparrowError};
use crate::geometry::Rect;

/// Trimming information needed to restore a sprite's original frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    /// The packer stored the sprite as-is
    #[default]
    None,
    /// Offset of the packed pixels inside the original frame, negated,
    /// and the original frame size
    Frame {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl Trim {
    /// Build a trim from raw frame values. All-zero means no trim was applied.
    pub fn from_frame(x: i32, y: i32, width: i32, height: i32) -> Self {
        if x == 0 && y == 0 && width == 0 && height == 0 {
            Trim::None
        } else {
            Trim::Frame {
                x,
                y,
                width,
                height,
            }
        }
    }

    /// Raw frame values `(x, y, width, height)`, all zero for [`Trim::None`]
    pub fn frame(&self) -> (i32, i32, i32, i32) {
        match *self {
            Trim::None => (0, 0, 0, 0),
            Trim::Frame {
                x,
                y,
                width,
                height,
            } => (x, y, width, height),
        }
    }

    pub fn is_trimmed(&self) -> bool {
        matches!(self, Trim::Frame { .. })
    }
}

/// A named sprite inside a packed sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    trim: Trim,
}

impl Region {
    /// Create an untrimmed region
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            trim: Trim::None,
        }
    }

    /// Create an untrimmed region covering `rect`
    ///
    /// Fails if a coordinate does not fit the record format's signed fields.
    pub fn from_rect(name: impl Into<String>, rect: Rect) -> Result<Self> {
        let name = name.into();
        let field = |v: u32| {
            i32::try_from(v).map_err(|_e| SparrowError::geometry(&name, "rectangle out of range"))
        };
        let (x, y, width, height) = (
            field(rect.x)?,
            field(rect.y)?,
            field(rect.width)?,
            field(rect.height)?,
        );
        Ok(Self::new(name, x, y, width, height))
    }

    pub fn with_trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn trim(&self) -> Trim {
        self.trim
    }

    /// Location of the sprite inside the packed sheet.
    ///
    /// Negative coordinates and empty rectangles are rejected.
    pub fn packed_rect(&self) -> Result<Rect> {
        let coord = |v: i32, what: &str| {
            u32::try_from(v)
                .map_err(|_e| SparrowError::geometry(&self.name, format!("negative {what} ({v})")))
        };
        let rect = Rect::new(
            coord(self.x, "x")?,
            coord(self.y, "y")?,
            coord(self.width, "width")?,
            coord(self.height, "height")?,
        );
        if rect.is_empty() {
            return Err(SparrowError::geometry(
                &self.name,
                format!("empty packed rectangle ({}x{})", rect.width, rect.height),
            ));
        }
        Ok(rect)
    }

    /// Reconstruct this sprite's untrimmed image from the packed sheet
    pub fn image<B: CroppableBuffer + ?Sized>(&self, packed: &B) -> Result<RgbaImage> {
        reconstruct(packed, self)
    }
}
