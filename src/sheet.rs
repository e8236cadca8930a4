//! Sprite sheet loading and cell lookup
//!
//! A sprite sheet is a single image holding a square grid of icons (16x16 by
//! default). The frame size is derived once from the sheet dimensions and every
//! token maps to one frame-sized rectangle.

use std::path::Path;

use image::{imageops, DynamicImage, RgbaImage};

use crate::error::PanelError;
use crate::token::Token;

/// Number of cells along each axis of an opcode sprite sheet.
pub const GRID_SIZE: u32 = 16;

/// Pixel dimensions of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Pixel bounds of one cell inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Divide `extent` by `grid`, rounding to nearest with ties to even.
///
/// ```
/// use hexpanel::sheet::frame_extent;
///
/// assert_eq!(frame_extent(256, 16), 16);
/// assert_eq!(frame_extent(250, 16), 16); // 15.625
/// assert_eq!(frame_extent(40, 16), 2);   // 2.5 ties to even
/// assert_eq!(frame_extent(56, 16), 4);   // 3.5 ties to even
/// ```
pub fn frame_extent(extent: u32, grid: u32) -> u32 {
    let quotient = extent / grid;
    let twice_remainder = 2 * (extent % grid);
    if twice_remainder > grid || (twice_remainder == grid && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Frame size for a sheet of the given dimensions.
pub fn frame_size(width: u32, height: u32, grid: u32) -> FrameSize {
    FrameSize { width: frame_extent(width, grid), height: frame_extent(height, grid) }
}

/// An immutable sprite sheet with its derived frame size.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
    frame: FrameSize,
}

impl SpriteSheet {
    /// Load a sheet from an image file using the default 16x16 grid.
    pub fn open(path: &Path) -> Result<Self, PanelError> {
        Self::open_with_grid(path, GRID_SIZE)
    }

    /// Load a sheet from an image file with a custom grid size.
    pub fn open_with_grid(path: &Path, grid: u32) -> Result<Self, PanelError> {
        let image = image::open(path)
            .map_err(|source| PanelError::SheetLoad { path: path.to_path_buf(), source })?;
        log::debug!("Loaded sprite sheet '{}' ({}x{})", path.display(), image.width(), image.height());
        Self::with_grid(image, grid)
    }

    /// Build a sheet from an in-memory image using the default 16x16 grid.
    pub fn from_image(image: impl Into<DynamicImage>) -> Result<Self, PanelError> {
        Self::with_grid(image, GRID_SIZE)
    }

    /// Build a sheet from an in-memory image with a custom grid size.
    pub fn with_grid(image: impl Into<DynamicImage>, grid: u32) -> Result<Self, PanelError> {
        if grid == 0 {
            return Err(PanelError::EmptyGrid);
        }

        let image = image.into().into_rgba8();
        let (width, height) = image.dimensions();
        let frame = frame_size(width, height, grid);
        if frame.width == 0 || frame.height == 0 {
            return Err(PanelError::SheetTooSmall { width, height, grid });
        }

        log::debug!("Frame size {}x{} for {}x{} grid", frame.width, frame.height, grid, grid);
        Ok(Self { image, frame })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel bounds of the cell a token addresses.
    ///
    /// The column selects x and the row selects y.
    pub fn cell_rect(&self, token: Token) -> CellRect {
        CellRect {
            x: u32::from(token.col) * self.frame.width,
            y: u32::from(token.row) * self.frame.height,
            width: self.frame.width,
            height: self.frame.height,
        }
    }

    /// Crop the cell a token addresses.
    ///
    /// Fails if the cell extends past the sheet, which happens when the frame
    /// size was rounded up.
    pub fn get_cell(&self, token: Token) -> Result<RgbaImage, PanelError> {
        let rect = self.cell_rect(token);
        if rect.right() > self.width() || rect.bottom() > self.height() {
            return Err(PanelError::CellOutOfBounds {
                token,
                rect,
                sheet_size: self.dimensions(),
            });
        }

        Ok(imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height).to_image())
    }

    /// Parse a raw two-digit token and crop its cell.
    pub fn get_cell_str(&self, text: &str) -> Result<RgbaImage, PanelError> {
        self.get_cell(Token::parse(text)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgba;

    /// Sheet where every pixel encodes its own coordinates.
    pub(crate) fn coordinate_sheet(width: u32, height: u32) -> SpriteSheet {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x / 256) * 16 + y / 256) as u8, 255])
        });
        SpriteSheet::from_image(image).unwrap()
    }

    #[test]
    fn test_frame_size_exact() {
        assert_eq!(frame_size(256, 256, 16), FrameSize { width: 16, height: 16 });
        assert_eq!(frame_size(512, 256, 16), FrameSize { width: 32, height: 16 });
    }

    #[test]
    fn test_frame_size_rounds_to_nearest() {
        assert_eq!(frame_extent(300, 16), 19); // 18.75
        assert_eq!(frame_extent(290, 16), 18); // 18.125
        assert_eq!(frame_extent(24, 16), 2); // 1.5 ties to even
        assert_eq!(frame_extent(8, 16), 0); // 0.5 ties to even
    }

    #[test]
    fn test_cell_rect_example() {
        let sheet = coordinate_sheet(256, 256);
        let rect = sheet.cell_rect(Token::parse("4B").unwrap());
        assert_eq!(rect, CellRect { x: 176, y: 64, width: 16, height: 16 });
        assert_eq!((rect.right(), rect.bottom()), (192, 80));
    }

    #[test]
    fn test_get_cell_top_left_matches_every_token() {
        let sheet = coordinate_sheet(256, 256);
        for byte in 0..=255u8 {
            let token = Token::from_byte(byte);
            let cell = sheet.get_cell(token).unwrap();
            assert_eq!(cell.dimensions(), (16, 16));
            let expected_x = u32::from(token.col) * 16;
            let expected_y = u32::from(token.row) * 16;
            assert_eq!(*cell.get_pixel(0, 0), *sheet.image().get_pixel(expected_x, expected_y));
            assert_eq!(
                *cell.get_pixel(15, 15),
                *sheet.image().get_pixel(expected_x + 15, expected_y + 15)
            );
        }
    }

    #[test]
    fn test_non_square_sheet() {
        let sheet = coordinate_sheet(512, 256);
        let cell = sheet.get_cell_str("21").unwrap();
        assert_eq!(cell.dimensions(), (32, 16));
        assert_eq!(*cell.get_pixel(0, 0), Rgba([32, 32, 0, 255]));
    }

    #[test]
    fn test_get_cell_str_rejects_bad_token() {
        let sheet = coordinate_sheet(256, 256);
        assert!(matches!(sheet.get_cell_str("G1"), Err(PanelError::Token(_))));
        assert!(matches!(sheet.get_cell_str("123"), Err(PanelError::Token(_))));
    }

    #[test]
    fn test_rounded_up_frame_overflows_last_column() {
        // 250 / 16 = 15.625 -> 16, so column 15 spans 240..256
        let sheet = coordinate_sheet(250, 250);
        assert_eq!(sheet.frame(), FrameSize { width: 16, height: 16 });
        assert!(sheet.get_cell_str("0E").is_ok());
        let err = sheet.get_cell_str("0F").unwrap_err();
        assert!(matches!(err, PanelError::CellOutOfBounds { .. }));
    }

    #[test]
    fn test_sheet_too_small() {
        let err = SpriteSheet::from_image(RgbaImage::new(4, 64)).unwrap_err();
        assert!(matches!(err, PanelError::SheetTooSmall { width: 4, height: 64, grid: 16 }));
    }

    #[test]
    fn test_custom_grid() {
        let sheet = SpriteSheet::with_grid(RgbaImage::new(64, 64), 4).unwrap();
        assert_eq!(sheet.frame(), FrameSize { width: 16, height: 16 });
        assert!(sheet.get_cell_str("33").is_ok());
        assert!(matches!(sheet.get_cell_str("04"), Err(PanelError::CellOutOfBounds { .. })));
        assert!(matches!(SpriteSheet::with_grid(RgbaImage::new(64, 64), 0), Err(PanelError::EmptyGrid)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = SpriteSheet::open(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, PanelError::SheetLoad { .. }));
        assert!(err.to_string().contains("definitely/not/here.png"));
    }
}
