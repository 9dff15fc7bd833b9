// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-page layout — a story of blocks rendered top to bottom into a
// printpdf operation list.
//
// There is no pagination: a block that would cross the bottom margin fails
// with a layout error naming its stage.

use medreport_core::config::{RgbColor, StyleConfig, mm_to_pt};
use medreport_core::error::{ReportError, Result};
use medreport_core::types::A4_MM;
use printpdf::{
    Color, Line, LinePoint, Mm, Op, PaintMode, PdfPage, Point, Polygon, PolygonRing, Pt, Rgb,
    TextItem, WindingOrder, XObjectId, XObjectTransform,
};
use tracing::{debug, trace};

use crate::pdf::markup::{RichText, Span};
use crate::pdf::metrics::{builtin_font, line_width, wrap_spans};

/// Baseline offset from the top of a line box, as a fraction of font size.
const ASCENT: f32 = 0.78;

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Where the logo sits relative to the hospital name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoPlacement {
    /// Logo at the left margin, name underneath.
    Above,
    /// Logo at the left margin, name to its right.
    Beside,
    /// Logo and name both centred.
    Centered,
}

/// An image already registered with the PDF document.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub id: XObjectId,
    pub width_px: u32,
    pub height_px: u32,
}

/// One row of a [`Table`].
#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<RichText>,
    pub header: bool,
}

/// Fixed-column table with a grid.
#[derive(Debug, Clone)]
pub struct Table {
    column_widths: Vec<f32>,
    rows: Vec<TableRow>,
}

impl Table {
    /// A table with the given column widths in points.
    pub fn new(column_widths: Vec<f32>) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
        }
    }

    /// Append a row. Fails if the cell count differs from the column count.
    pub fn push_row(&mut self, cells: Vec<RichText>, header: bool) -> Result<()> {
        if cells.len() != self.column_widths.len() {
            return Err(ReportError::layout(
                "table",
                format!(
                    "row {} has {} cells, expected {}",
                    self.rows.len(),
                    cells.len(),
                    self.column_widths.len()
                ),
            ));
        }
        self.rows.push(TableRow { cells, header });
        Ok(())
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// A unit of page content.
#[derive(Debug, Clone)]
pub enum Block {
    /// Centred document title.
    Title(RichText),
    /// Optional logo with the hospital name as caption.
    Logo {
        image: Option<LogoImage>,
        caption: RichText,
        placement: LogoPlacement,
    },
    /// A paragraph at subheader size.
    Line { text: RichText, align: Align },
    /// Two paragraphs sharing a row, left and right aligned.
    Columns { left: RichText, right: RichText },
    Table(Table),
    /// A bold label followed by body paragraphs, optionally on a filled box
    /// with one row per paragraph.
    Section {
        label: RichText,
        body: Vec<RichText>,
        boxed: bool,
    },
    Spacer(f32),
}

/// Ordered blocks, each tagged with the stage name used in layout errors.
#[derive(Debug, Clone, Default)]
pub struct Story {
    items: Vec<(&'static str, Block)>,
}

impl Story {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: &'static str, block: Block) {
        self.items.push((stage, block));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Block)> {
        self.items.iter()
    }

    /// The first block tagged `stage`.
    pub fn find(&self, stage: &str) -> Option<&Block> {
        self.items
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, block)| block)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

/// Wrapped lines of a paragraph plus the size they were wrapped at.
struct Wrapped {
    lines: Vec<Vec<Span>>,
    size: f32,
}

/// A single A4 page being filled from the top.
pub struct PageCanvas<'a> {
    style: &'a StyleConfig,
    width: f32,
    height: f32,
    /// Distance from the top edge to the next free line.
    cursor: f32,
    ops: Vec<Op>,
}

impl<'a> PageCanvas<'a> {
    pub fn a4(style: &'a StyleConfig) -> Self {
        Self {
            style,
            width: mm_to_pt(A4_MM.0),
            height: mm_to_pt(A4_MM.1),
            cursor: style.page_margin,
            ops: Vec::new(),
        }
    }

    /// Distance from the top edge to the next free line.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Lay out every block of the story in order.
    pub fn render_story(&mut self, story: &Story) -> Result<()> {
        for (stage, block) in story.iter() {
            self.render(stage, block)?;
            trace!(stage, cursor = self.cursor, "Block placed");
        }
        debug!(
            blocks = story.len(),
            used_pt = self.cursor,
            ops = self.ops.len(),
            "Story laid out"
        );
        Ok(())
    }

    /// Finish the page.
    pub fn into_page(self) -> PdfPage {
        PdfPage::new(Mm(A4_MM.0), Mm(A4_MM.1), self.ops)
    }

    pub fn render(&mut self, stage: &str, block: &Block) -> Result<()> {
        match block {
            Block::Title(text) => {
                let wrapped = self.wrap(text, self.content_width(), self.style.title_size);
                self.reserve(self.wrapped_height(&wrapped), stage)?;
                let (x, width) = (self.left(), self.content_width());
                self.cursor = self.draw_wrapped(&wrapped, x, width, self.cursor, Align::Center);
            }
            Block::Logo {
                image,
                caption,
                placement,
            } => self.render_logo(stage, image.as_ref(), caption, *placement)?,
            Block::Line { text, align } => {
                let wrapped = self.wrap(text, self.content_width(), self.style.subheader_size);
                self.reserve(self.wrapped_height(&wrapped), stage)?;
                let (x, width) = (self.left(), self.content_width());
                self.cursor = self.draw_wrapped(&wrapped, x, width, self.cursor, *align);
            }
            Block::Columns { left, right } => {
                let half = self.content_width() / 2.0;
                let size = self.style.subheader_size;
                let left_lines = self.wrap(left, half, size);
                let right_lines = self.wrap(right, half, size);
                let height = self
                    .wrapped_height(&left_lines)
                    .max(self.wrapped_height(&right_lines));
                self.reserve(height, stage)?;

                let top = self.cursor;
                let x = self.left();
                self.draw_wrapped(&left_lines, x, half, top, Align::Left);
                self.draw_wrapped(&right_lines, x + half, half, top, Align::Right);
                self.cursor = top + height;
            }
            Block::Table(table) => self.render_table(stage, table)?,
            Block::Section { label, body, boxed } => {
                self.render_section(stage, label, body, *boxed)?
            }
            Block::Spacer(height) => self.cursor += height,
        }
        Ok(())
    }

    // -- Blocks -------------------------------------------------------------

    fn render_logo(
        &mut self,
        stage: &str,
        image: Option<&LogoImage>,
        caption: &RichText,
        placement: LogoPlacement,
    ) -> Result<()> {
        let size = self.style.subheader_size;
        let content_width = self.content_width();
        let caption_align = match placement {
            LogoPlacement::Centered => Align::Center,
            LogoPlacement::Above | LogoPlacement::Beside => Align::Left,
        };

        let Some(image) = image else {
            let wrapped = self.wrap(caption, content_width, size);
            self.reserve(self.wrapped_height(&wrapped), stage)?;
            let x = self.left();
            self.cursor = self.draw_wrapped(&wrapped, x, content_width, self.cursor, caption_align);
            return Ok(());
        };

        let box_size = self.style.logo_size;
        let (logo_w, logo_h) = fit_square(image.width_px, image.height_px, box_size);

        match placement {
            LogoPlacement::Above | LogoPlacement::Centered => {
                let wrapped = self.wrap(caption, content_width, size);
                let height = box_size + self.style.label_spacing + self.wrapped_height(&wrapped);
                self.reserve(height, stage)?;

                let box_x = match placement {
                    LogoPlacement::Centered => self.left() + (content_width - box_size) / 2.0,
                    _ => self.left(),
                };
                let x = box_x + (box_size - logo_w) / 2.0;
                let y = self.cursor + (box_size - logo_h) / 2.0;
                self.draw_image(image, x, y, logo_w, logo_h);
                self.cursor += box_size + self.style.label_spacing;
                let left = self.left();
                self.cursor =
                    self.draw_wrapped(&wrapped, left, content_width, self.cursor, caption_align);
            }
            LogoPlacement::Beside => {
                let gap = 2.0 * self.style.cell_padding;
                let caption_width = (content_width - box_size - gap).max(1.0);
                let wrapped = self.wrap(caption, caption_width, size);
                let caption_h = self.wrapped_height(&wrapped);
                let height = box_size.max(caption_h);
                self.reserve(height, stage)?;

                let top = self.cursor;
                let x = self.left();
                self.draw_image(
                    image,
                    x + (box_size - logo_w) / 2.0,
                    top + (height - logo_h) / 2.0,
                    logo_w,
                    logo_h,
                );
                let caption_top = top + (height - caption_h) / 2.0;
                self.draw_wrapped(&wrapped, x + box_size + gap, caption_width, caption_top, Align::Left);
                self.cursor = top + height;
            }
        }
        Ok(())
    }

    fn render_table(&mut self, stage: &str, table: &Table) -> Result<()> {
        let pad = self.style.cell_padding;
        // Centred on the page; a table wider than the text column runs into
        // both side margins equally.
        let x0 = (self.width - table.width()) / 2.0;

        // Wrap every cell first so the whole table is reserved at once.
        let mut layout = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            let size = if row.header {
                self.style.table_header_size
            } else {
                self.style.body_size
            };
            let cells: Vec<Wrapped> = row
                .cells
                .iter()
                .zip(table.column_widths())
                .map(|(cell, width)| self.wrap(cell, (width - 2.0 * pad).max(1.0), size))
                .collect();
            let content = cells
                .iter()
                .map(|cell| self.wrapped_height(cell))
                .fold(0.0f32, f32::max);
            // Header rows carry double bottom padding.
            let bottom_pad = if row.header { 2.0 * pad } else { pad };
            layout.push((row.header, cells, pad + content + bottom_pad));
        }
        let total: f32 = layout.iter().map(|(_, _, height)| height).sum();
        self.reserve(total, stage)?;

        let top = self.cursor;
        let mut row_top = top;
        for (header, cells, row_h) in &layout {
            let fill = if *header {
                self.style.accent_color
            } else {
                self.style.row_color
            };
            self.fill_rect(x0, row_top, table.width(), *row_h, fill);

            let mut cell_x = x0;
            for (cell, width) in cells.iter().zip(table.column_widths()) {
                self.draw_wrapped(cell, cell_x + pad, width - 2.0 * pad, row_top + pad, Align::Center);
                cell_x += width;
            }
            row_top += row_h;
        }

        // Grid.
        let mut boundaries = vec![top];
        let mut y = top;
        for (_, _, row_h) in &layout {
            y += row_h;
            boundaries.push(y);
        }
        for y in &boundaries {
            self.stroke_line((x0, *y), (x0 + table.width(), *y));
        }
        let mut x = x0;
        self.stroke_line((x, top), (x, top + total));
        for width in table.column_widths() {
            x += width;
            self.stroke_line((x, top), (x, top + total));
        }

        self.cursor = top + total;
        Ok(())
    }

    fn render_section(
        &mut self,
        stage: &str,
        label: &RichText,
        body: &[RichText],
        boxed: bool,
    ) -> Result<()> {
        let content_width = self.content_width();
        let label_lines = self.wrap(label, content_width, self.style.subheader_size);
        let label_h = self.wrapped_height(&label_lines) + self.style.label_spacing;

        if !boxed {
            let paragraphs: Vec<Wrapped> = body
                .iter()
                .map(|text| self.wrap(text, content_width, self.style.body_size))
                .collect();
            let body_h: f32 = paragraphs.iter().map(|p| self.wrapped_height(p)).sum();
            self.reserve(label_h + body_h, stage)?;

            let x = self.left();
            self.cursor = self.draw_wrapped(&label_lines, x, content_width, self.cursor, Align::Left);
            self.cursor += self.style.label_spacing;
            for paragraph in &paragraphs {
                self.cursor = self.draw_wrapped(paragraph, x, content_width, self.cursor, Align::Left);
            }
            return Ok(());
        }

        let pad = self.style.cell_padding;
        let box_w = self.style.section_width.min(content_width);
        let box_x = self.left() + (content_width - box_w) / 2.0;
        let inner_w = (box_w - 2.0 * pad).max(1.0);
        let rows: Vec<Wrapped> = body
            .iter()
            .map(|text| self.wrap(text, inner_w, self.style.body_size))
            .collect();
        // An empty list still gets a visible, one-line box.
        let empty_row_h = self.line_height(self.style.body_size) + 2.0 * pad;
        let box_h = if rows.is_empty() {
            empty_row_h
        } else {
            rows.iter()
                .map(|row| self.wrapped_height(row) + 2.0 * pad)
                .sum()
        };
        self.reserve(label_h + box_h, stage)?;

        let x = self.left();
        self.cursor = self.draw_wrapped(&label_lines, x, content_width, self.cursor, Align::Left);
        self.cursor += self.style.label_spacing;

        let top = self.cursor;
        self.fill_rect(box_x, top, box_w, box_h, self.style.section_color);
        let mut row_top = top;
        for row in &rows {
            let bottom = self.draw_wrapped(row, box_x + pad, inner_w, row_top + pad, Align::Left);
            row_top = bottom + pad;
        }
        self.cursor = top + box_h;
        Ok(())
    }

    // -- Geometry -------------------------------------------------------------

    fn left(&self) -> f32 {
        self.style.page_margin
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * self.style.page_margin
    }

    fn line_height(&self, size: f32) -> f32 {
        size + self.style.leading
    }

    fn wrap(&self, text: &RichText, width: f32, size: f32) -> Wrapped {
        let lines = text
            .lines()
            .iter()
            .flat_map(|line| wrap_spans(line, width, size))
            .collect();
        Wrapped { lines, size }
    }

    fn wrapped_height(&self, wrapped: &Wrapped) -> f32 {
        wrapped.lines.len() as f32 * self.line_height(wrapped.size)
    }

    /// Fail if `height` more points would cross the bottom margin.
    fn reserve(&self, height: f32, stage: &str) -> Result<()> {
        let limit = self.height - self.style.page_margin;
        if self.cursor + height > limit {
            return Err(ReportError::layout(
                stage,
                format!(
                    "content needs {:.1}pt but only {:.1}pt remain on the page",
                    height,
                    (limit - self.cursor).max(0.0)
                ),
            ));
        }
        Ok(())
    }

    /// PDF y coordinate (from the bottom edge) of a distance from the top.
    fn pdf_y(&self, from_top: f32) -> f32 {
        self.height - from_top
    }

    // -- Drawing --------------------------------------------------------------

    /// Draw wrapped lines starting at `top`; returns the distance from the top
    /// edge just below the last line.
    fn draw_wrapped(&mut self, wrapped: &Wrapped, x: f32, width: f32, top: f32, align: Align) -> f32 {
        let line_h = self.line_height(wrapped.size);
        let mut line_top = top;
        for line in &wrapped.lines {
            if !line.is_empty() {
                let line_w = line_width(line, wrapped.size);
                let line_x = match align {
                    Align::Left => x,
                    Align::Center => x + (width - line_w) / 2.0,
                    Align::Right => x + width - line_w,
                };
                let baseline = line_top + self.style.leading / 2.0 + wrapped.size * ASCENT;
                self.draw_spans(line, line_x, baseline, wrapped.size);
            }
            line_top += line_h;
        }
        line_top
    }

    fn draw_spans(&mut self, spans: &[Span], x: f32, baseline: f32, size: f32) {
        let y = self.pdf_y(baseline);
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor {
            col: color(self.style.text_color),
        });
        self.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        for span in spans {
            let font = builtin_font(span.weight);
            self.ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font,
            });
            self.ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(span.text.clone())],
                font,
            });
        }
        self.ops.push(Op::EndTextSection);
    }

    fn draw_image(&mut self, image: &LogoImage, x: f32, top: f32, width: f32, height: f32) {
        let bottom = self.pdf_y(top + height);
        // At 72 dpi one pixel is one point, so the scale is the target size in
        // points over the pixel size.
        self.ops.push(Op::UseXobject {
            id: image.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(bottom)),
                rotate: None,
                scale_x: Some(width / image.width_px.max(1) as f32),
                scale_y: Some(height / image.height_px.max(1) as f32),
                dpi: Some(72.0),
            },
        });
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, fill: RgbColor) {
        let bottom = self.pdf_y(top + height);
        let corners = [
            (x, bottom),
            (x + width, bottom),
            (x + width, bottom + height),
            (x, bottom + height),
        ];
        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetFillColor { col: color(fill) });
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: corners.iter().map(|&(x, y)| line_point(x, y)).collect(),
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let (from_y, to_y) = (self.pdf_y(from.1), self.pdf_y(to.1));
        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetOutlineColor {
            col: color(self.style.text_color),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(self.style.grid_thickness),
        });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![line_point(from.0, from_y), line_point(to.0, to_y)],
                is_closed: false,
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }
}

/// Display size of a `width_px` x `height_px` image scaled to fit inside a
/// `box_size` square, keeping its aspect ratio.
fn fit_square(width_px: u32, height_px: u32, box_size: f32) -> (f32, f32) {
    let (w, h) = (width_px.max(1) as f32, height_px.max(1) as f32);
    let scale = (box_size / w).min(box_size / h);
    (w * scale, h * scale)
}

fn color(rgb: RgbColor) -> Color {
    let (r, g, b) = rgb.to_unit();
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_ops(ops: &[Op]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => Some(
                    items
                        .iter()
                        .filter_map(|item| match item {
                            TextItem::Text(text) => Some(text.clone()),
                            _ => None,
                        })
                        .collect::<String>(),
                ),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn table_rejects_wrong_row_shape() {
        let mut table = Table::new(vec![100.0, 100.0]);
        table
            .push_row(vec![RichText::plain("a"), RichText::plain("b")], true)
            .unwrap();
        let err = table
            .push_row(vec![RichText::plain("only one")], false)
            .unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 cells, expected 2"));
    }

    #[test]
    fn blocks_advance_the_cursor() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        let start = canvas.cursor();
        canvas
            .render("title", &Block::Title(RichText::strong("Patient Report")))
            .unwrap();
        let after_title = canvas.cursor();
        assert!(after_title > start);
        canvas.render("gap", &Block::Spacer(12.0)).unwrap();
        assert_eq!(canvas.cursor(), after_title + 12.0);
    }

    #[test]
    fn overflow_is_a_layout_error_naming_the_stage() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        let body = vec![RichText::plain("word ".repeat(4000))];
        let err = canvas
            .render(
                "instructions",
                &Block::Section {
                    label: RichText::strong("Special Instructions"),
                    body,
                    boxed: true,
                },
            )
            .unwrap_err();
        match err {
            ReportError::Layout { stage, .. } => assert_eq!(stage, "instructions"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_boxed_section_still_draws_label_and_box() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        let before = canvas.cursor();
        canvas
            .render(
                "medicines",
                &Block::Section {
                    label: RichText::strong("Medicine Recommendations"),
                    body: Vec::new(),
                    boxed: true,
                },
            )
            .unwrap();
        assert!(canvas.cursor() > before + style.subheader_size);
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::DrawPolygon { .. })));
        assert_eq!(text_ops(&canvas.ops), vec!["Medicine Recommendations"]);
    }

    #[test]
    fn columns_emit_left_before_right() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        canvas
            .render(
                "doctor",
                &Block::Columns {
                    left: RichText::plain("Dr. John Doe"),
                    right: RichText::plain("October 16, 2026"),
                },
            )
            .unwrap();
        assert_eq!(text_ops(&canvas.ops), vec!["Dr. John Doe", "October 16, 2026"]);
    }

    #[test]
    fn logo_fits_inside_its_square() {
        let (w, h) = fit_square(1, 500, 60.0);
        assert!((h - 60.0).abs() < 1e-3);
        assert!(w < 1.0);

        let (w, h) = fit_square(300, 100, 60.0);
        assert!((w - 60.0).abs() < 1e-3);
        assert!((h - 20.0).abs() < 1e-3);

        assert_eq!(fit_square(0, 0, 60.0), (60.0, 60.0));
    }

    #[test]
    fn wide_table_is_centred_on_the_page() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        let widths = vec![144.0, 216.0, 72.0, 57.6];
        let total: f32 = widths.iter().sum();
        assert!(total > canvas.content_width());

        let mut table = Table::new(widths);
        table
            .push_row((0..4).map(|_| RichText::strong("h")).collect(), true)
            .unwrap();
        canvas.render("demographics", &Block::Table(table)).unwrap();

        let left = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::DrawPolygon { polygon } => Some(polygon.rings[0].points[0].p.x.0),
                _ => None,
            })
            .unwrap();
        assert!((left - (canvas.width - total) / 2.0).abs() < 1e-3);
        assert!(left > 0.0);
    }

    #[test]
    fn table_text_in_row_order() {
        let style = StyleConfig::default();
        let mut canvas = PageCanvas::a4(&style);
        let mut table = Table::new(vec![100.0, 100.0]);
        table
            .push_row(vec![RichText::strong("Gender"), RichText::strong("Age")], true)
            .unwrap();
        table
            .push_row(vec![RichText::plain(""), RichText::plain("25")], false)
            .unwrap();
        canvas.render("demographics", &Block::Table(table)).unwrap();
        assert_eq!(text_ops(&canvas.ops), vec!["Gender", "Age", "25"]);
    }
}
