use image::error::{ImageError, LimitError, LimitErrorKind};
use image::{ImageBuffer, ImageResult, Rgb, RgbImage};
use std::convert::TryFrom;
use std::path::Path;

use crate::walls::WallMap;

pub type Colour = [u8; 3];

pub const BLACK: Colour = [0, 0, 0];
pub const WHITE: Colour = [0xff, 0xff, 0xff];

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RenderOptions {
    cell_side_pixels_length: u8,
    wall_colour: Colour,
    background_colour: Colour,
}

impl RenderOptions {
    /// Side length of a cell in pixels, never less than 1.
    #[inline]
    pub fn cell_side_pixels_length(&self) -> u32 {
        u32::from(self.cell_side_pixels_length.max(1))
    }

    #[inline]
    pub fn wall_colour(&self) -> Colour {
        self.wall_colour
    }

    #[inline]
    pub fn background_colour(&self) -> Colour {
        self.background_colour
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                wall_colour: BLACK,
                background_colour: WHITE,
            },
        }
    }

    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> RenderOptionsBuilder {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }

    pub fn wall_colour(mut self, colour: Colour) -> RenderOptionsBuilder {
        self.options.wall_colour = colour;
        self
    }

    pub fn background_colour(mut self, colour: Colour) -> RenderOptionsBuilder {
        self.options.background_colour = colour;
        self
    }

    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// A straight horizontal or vertical wall, inclusive pixel coordinates.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallLine {
    pub from: (u32, u32),
    pub to: (u32, u32),
}

/// Pixels spanned by `cells_count` cells plus the closing wall, None when that does not fit
/// in a `u32`.
pub fn pixel_extent(cells_count: usize, cell_pixels: u32) -> Option<u32> {
    u32::try_from(cells_count)
        .ok()
        .and_then(|cells| cells.checked_mul(cell_pixels))
        .and_then(|pixels| pixels.checked_add(1))
}

/// Pixel dimensions of a rendered maze, the walls on the far edges included.
pub fn image_dimensions(walls: &WallMap, options: &RenderOptions) -> ImageResult<(u32, u32)> {
    let cell_pixels = options.cell_side_pixels_length();
    match (pixel_extent(walls.row_length().0, cell_pixels),
           pixel_extent(walls.column_length().0, cell_pixels)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError))),
    }
}

/// Every wall line to draw.
///
/// The north and west boundaries come first, then each cell contributes its closed right and
/// bottom walls.
pub fn wall_lines(walls: &WallMap, options: &RenderOptions) -> ImageResult<Vec<WallLine>> {
    let cell_pixels = options.cell_side_pixels_length();
    let (img_width, img_height) = image_dimensions(walls, options)?;

    let mut lines = vec![
        WallLine { from: (0, 0), to: (img_width - 1, 0) },
        WallLine { from: (0, 0), to: (0, img_height - 1) },
    ];

    for (coord, cell_walls) in walls.iter() {
        let x1 = coord.x * cell_pixels;
        let y1 = coord.y * cell_pixels;
        let x2 = (coord.x + 1) * cell_pixels;
        let y2 = (coord.y + 1) * cell_pixels;

        if cell_walls.wall_right {
            lines.push(WallLine { from: (x2, y1), to: (x2, y2) });
        }
        if cell_walls.wall_bottom {
            lines.push(WallLine { from: (x1, y2), to: (x2, y2) });
        }
    }

    Ok(lines)
}

pub fn render_image(walls: &WallMap, options: &RenderOptions) -> ImageResult<RgbImage> {
    let (img_width, img_height) = image_dimensions(walls, options)?;
    let mut img: RgbImage = ImageBuffer::from_pixel(img_width, img_height, Rgb(options.background_colour()));

    let wall = Rgb(options.wall_colour());
    for WallLine { from: (x1, y1), to: (x2, y2) } in wall_lines(walls, options)? {
        for x in x1..=x2 {
            for y in y1..=y2 {
                img.put_pixel(x, y, wall);
            }
        }
    }

    Ok(img)
}

/// Render the maze and save it as an image, the format following the path's extension.
pub fn render_png<P: AsRef<Path>>(walls: &WallMap, options: &RenderOptions, path: P) -> ImageResult<()> {
    render_image(walls, options)?.save(path)
}
