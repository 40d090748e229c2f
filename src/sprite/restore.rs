use image::{RgbaImage, imageops};

use super::{CroppableBuffer, PixelBuffer, Region, Trim};
use crate::error::{Result, SparrowError};
use crate::geometry::Rect;

/// Transparent border widths added around an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Largest restored frame, in bytes of RGBA pixels
const MAX_FRAME_BYTES: u64 = 1 << 30;

/// Rebuild the untrimmed image of `region` from the packed sheet.
///
/// Without a trim frame this is the packed rectangle converted to RGBA.
/// With one, the part of the packed rectangle visible through the frame is
/// copied out and surrounded by transparent pixels until the result matches
/// the frame size exactly. Only the visible part and the final frame are
/// ever allocated.
pub fn reconstruct<B>(packed: &B, region: &Region) -> Result<RgbaImage>
where
    B: CroppableBuffer + ?Sized,
{
    let name = region.name();
    let rect = region.packed_rect()?;
    let sheet = packed.extent();
    if !sheet.contains(&rect) {
        return Err(SparrowError::geometry(
            name,
            format!(
                "packed rectangle {}x{}+{}+{} lies outside the {}x{} sheet",
                rect.width, rect.height, rect.x, rect.y, sheet.width, sheet.height
            ),
        ));
    }

    let Trim::Frame {
        x: frame_x,
        y: frame_y,
        width: frame_width,
        height: frame_height,
    } = region.trim()
    else {
        return Ok(packed.region_of_interest(rect));
    };

    if frame_width <= 0 || frame_height <= 0 {
        return Err(SparrowError::geometry(
            name,
            format!("frame size must be positive, got {frame_width}x{frame_height}"),
        ));
    }
    let (width, height) = (frame_width.unsigned_abs(), frame_height.unsigned_abs());
    if u64::from(width) * u64::from(height) * 4 > MAX_FRAME_BYTES {
        return Err(SparrowError::geometry(
            name,
            format!("frame {width}x{height} is too large"),
        ));
    }

    let columns = Span::clip(name, "x", frame_x, frame_width, rect.width)?;
    let rows = Span::clip(name, "y", frame_y, frame_height, rect.height)?;

    if columns.len == 0 || rows.len == 0 {
        return Ok(RgbaImage::new(width, height));
    }

    let visible = packed.region_of_interest(Rect::new(
        rect.x + columns.start,
        rect.y + rows.start,
        columns.len,
        rows.len,
    ));
    Ok(pad(
        &visible,
        Padding {
            top: rows.before,
            right: columns.after,
            bottom: rows.after,
            left: columns.before,
        },
    ))
}

/// Like [`reconstruct`], for buffers whose cropping support is only known at runtime
pub fn reconstruct_dyn(packed: &dyn PixelBuffer, region: &Region) -> Result<RgbaImage> {
    let croppable = packed
        .croppable()
        .ok_or(SparrowError::CroppingUnsupported)?;
    reconstruct(croppable, region)
}

/// Surround `image` with transparent pixels. Always allocates a new buffer.
pub fn pad(image: &RgbaImage, padding: Padding) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut result = RgbaImage::new(
        width
            .saturating_add(padding.left)
            .saturating_add(padding.right),
        height
            .saturating_add(padding.top)
            .saturating_add(padding.bottom),
    );
    imageops::replace(
        &mut result,
        image,
        i64::from(padding.left),
        i64::from(padding.top),
    );
    result
}

/// One axis of a trim frame laid over the packed pixels:
/// `before` transparent pixels, `len` packed pixels from `start`, then
/// `after` transparent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    before: u32,
    start: u32,
    len: u32,
    after: u32,
}

impl Span {
    /// Frame pixel `i` shows packed pixel `offset + i` when that lies in
    /// `0..packed_len`. An offset past the packed edge cannot be cropped.
    fn clip(
        name: &str,
        axis: &str,
        offset: i32,
        frame_len: i32,
        packed_len: u32,
    ) -> Result<Self> {
        let (offset, frame_len, packed_len) = (
            i64::from(offset),
            i64::from(frame_len),
            i64::from(packed_len),
        );
        if offset > packed_len {
            return Err(SparrowError::geometry(
                name,
                format!("frame {axis} offset {offset} exceeds packed size {packed_len}"),
            ));
        }

        let start = offset.max(0);
        let end = (offset + frame_len).min(packed_len).max(start);
        let before = (start - offset).min(frame_len);
        let len = end - start;
        let after = frame_len - before - len;

        let field = |v: i64| {
            u32::try_from(v)
                .map_err(|_e| SparrowError::geometry(name, format!("frame {axis} out of range")))
        };
        Ok(Self {
            before: field(before)?,
            start: field(start)?,
            len: field(len)?,
            after: field(after)?,
        })
    }
}
