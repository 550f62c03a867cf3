use super::layout::Matrix;
use super::quartile::{quartile_boundaries, Palette, QuartileBoundaries};
use crate::error::Result;
use chrono::TimeZone;
use std::io::Write;

pub const CELL_STRIDE: u32 = 13;
pub const CELL_SIZE: u32 = 11;
pub const MARGIN: u32 = 13;
const CELL_OFFSET: u32 = MARGIN + 1;

/// A positioned, coloured cell of the streak graphic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub fill: &'static str,
    pub score: u32,
    pub date: String,
}

/// Canvas size for a matrix: one stride per column/row plus the margin.
pub fn canvas_size<Tz: TimeZone>(matrix: &Matrix<Tz>) -> (u32, u32) {
    (
        CELL_STRIDE * matrix.num_columns() as u32 + MARGIN,
        CELL_STRIDE * matrix.num_rows() as u32 + MARGIN,
    )
}

pub fn rects<Tz: TimeZone>(
    matrix: &Matrix<Tz>,
    boundaries: Option<&QuartileBoundaries>,
    palette: &Palette,
) -> Vec<Rect> {
    matrix
        .cells()
        .map(|(col, row, stat)| Rect {
            x: col as u32 * CELL_STRIDE + CELL_OFFSET,
            y: row as u32 * CELL_STRIDE + CELL_OFFSET,
            size: CELL_SIZE,
            fill: palette.fill(boundaries, stat.score),
            score: stat.score,
            date: stat.iso_date(),
        })
        .collect()
}

/// Writes the streak graphic as an SVG document.
///
/// Colour levels come from the quartiles of `scores`, which are sorted here so
/// callers can pass them in calendar order.
pub fn write_svg<Tz: TimeZone, W: Write>(
    matrix: &Matrix<Tz>,
    scores: &[u32],
    palette: &Palette,
    out: &mut W,
) -> Result<()> {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let boundaries = quartile_boundaries(&sorted);

    let (width, height) = canvas_size(matrix);
    writeln!(out, r#"<?xml version="1.0"?>"#)?;
    writeln!(
        out,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    )?;
    for rect in rects(matrix, boundaries.as_ref(), palette) {
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" style="fill:{}" data-count="{}" data-date="{}" />"#,
            rect.x, rect.y, rect.size, rect.size, rect.fill, rect.score, rect.date
        )?;
    }
    writeln!(out, "</svg>")?;
    out.flush()?;
    Ok(())
}
