//! Panel composition - pastes token cells side by side onto one canvas

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::color::BLACK;
use crate::error::PanelError;
use crate::sheet::SpriteSheet;
use crate::token::{parse_instructions, Token};

/// What to do with cells that land past the right edge of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Keep the canvas at sheet size; pixels beyond its edge are dropped
    #[default]
    Clip,
    /// Widen the canvas so every cell fits
    Extend,
}

/// Widest panel `Overflow::Extend` will allocate, in pixels.
pub const MAX_PANEL_WIDTH: u32 = 1 << 16;

/// Options controlling panel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    pub overflow: Overflow,
    pub background: Rgba<u8>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self { overflow: Overflow::Clip, background: BLACK }
    }
}

/// Compose the cells for `tokens` into a single panel.
///
/// The canvas starts at the full sheet size filled with the background color,
/// and cell `i` is pasted at `x = i * frame_width, y = 0`.
///
/// ```
/// use hexpanel::panel::{compose, ComposeOptions};
/// use hexpanel::sheet::SpriteSheet;
/// use hexpanel::token::parse_instructions;
///
/// let sheet = SpriteSheet::from_image(image::RgbaImage::new(256, 256)).unwrap();
/// let tokens = parse_instructions("00 FF").unwrap();
/// let panel = compose(&sheet, &tokens, &ComposeOptions::default()).unwrap();
/// assert_eq!(panel.dimensions(), (256, 256));
/// ```
pub fn compose(
    sheet: &SpriteSheet,
    tokens: &[Token],
    options: &ComposeOptions,
) -> Result<RgbaImage, PanelError> {
    let frame = sheet.frame();
    let (sheet_width, sheet_height) = sheet.dimensions();
    let needed_width =
        u32::try_from(tokens.len()).ok().and_then(|n| n.checked_mul(frame.width));
    let canvas_width = match (options.overflow, needed_width) {
        (Overflow::Clip, _) => sheet_width,
        (Overflow::Extend, Some(width)) if width <= MAX_PANEL_WIDTH => sheet_width.max(width),
        (Overflow::Extend, _) => {
            return Err(PanelError::PanelTooWide {
                cells: tokens.len(),
                frame_width: frame.width,
                max: MAX_PANEL_WIDTH,
            });
        }
    };

    if needed_width.map_or(true, |width| width > canvas_width) {
        log::warn!(
            "{} cells need more than the {}px panel width; clipping",
            tokens.len(),
            canvas_width
        );
    }

    let cells = tokens.iter().map(|&token| sheet.get_cell(token)).collect::<Result<Vec<_>, _>>()?;

    let mut canvas = RgbaImage::from_pixel(canvas_width, sheet_height, options.background);
    for (i, cell) in cells.iter().enumerate() {
        let x = i as i64 * i64::from(frame.width);
        if x >= i64::from(canvas_width) {
            break;
        }
        imageops::replace(&mut canvas, cell, x, 0);
    }

    log::debug!("Composed {} cells onto {}x{} panel", cells.len(), canvas_width, sheet_height);
    Ok(canvas)
}

/// Parse an instruction string and compose its panel.
pub fn compose_str(
    sheet: &SpriteSheet,
    line: &str,
    options: &ComposeOptions,
) -> Result<RgbaImage, PanelError> {
    let tokens = parse_instructions(line)?;
    compose(sheet, &tokens, options)
}
