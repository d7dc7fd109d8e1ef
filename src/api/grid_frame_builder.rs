use chrono::NaiveDateTime;
use tracing::debug;

use crate::core::{Alignment, DateTimeGrid, HeaderRow, Rect, RowController};
use crate::error::{GanttError, GanttResult};
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextPrimitive};

use super::{GridStyle, RenderParams};

/// Turns grid state into background and header frames.
///
/// Background frames live in scene coordinates. Header frames live in header
/// widget coordinates: scene x minus the horizontal scroll `offset`.
#[derive(Debug, Clone, Copy)]
pub struct GridFrameBuilder<'a> {
    grid: &'a DateTimeGrid,
    style: &'a GridStyle,
    params: RenderParams,
}

impl<'a> GridFrameBuilder<'a> {
    #[must_use]
    pub fn new(grid: &'a DateTimeGrid, style: &'a GridStyle) -> Self {
        Self {
            grid,
            style,
            params: RenderParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: RenderParams) -> Self {
        self.params = params;
        self
    }

    /// Background of the exposed scene area: free days, scale lines, row
    /// separators, the no-information area and the time line.
    pub fn build_background(
        &self,
        exposed: Rect,
        rows: Option<&dyn RowController>,
        now: NaiveDateTime,
    ) -> GanttResult<RenderFrame> {
        self.validate_pass(exposed)?;
        let mut frame = RenderFrame::new(exposed);

        self.push_free_days(&mut frame, exposed)?;
        self.push_scale_lines(&mut frame, exposed)?;
        if let Some(rows) = rows {
            if self.grid.row_separators() {
                self.push_row_separators(&mut frame, exposed, rows);
            }
            self.push_no_information(&mut frame, exposed, rows);
        }
        self.push_time_line(&mut frame, exposed, now);

        debug!(
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            "built grid background frame"
        );
        Ok(frame)
    }

    /// Two-row header: upper scale in the top half, lower scale below.
    pub fn build_header(
        &self,
        header: Rect,
        exposed: Rect,
        offset: f64,
    ) -> GanttResult<RenderFrame> {
        self.validate_pass(header)?;
        if !offset.is_finite() {
            return Err(GanttError::InvalidData(
                "header offset must be finite".to_owned(),
            ));
        }

        let mut frame = RenderFrame::new(header);
        let left = exposed.left().max(header.left());
        let right = exposed.right().min(header.right());
        if right <= left {
            return Ok(frame);
        }

        let row_height = header.height / 2.0;
        let upper = Rect::new(header.x, header.y, header.width, row_height);
        let lower = Rect::new(header.x, header.y + row_height, header.width, row_height);
        self.push_header_row(&mut frame, HeaderRow::Upper, upper, left, right, offset)?;
        self.push_header_row(&mut frame, HeaderRow::Lower, lower, left, right, offset)?;

        frame.push_line(LinePrimitive::horizontal(
            lower.top(),
            left,
            right,
            self.params.scale_stroke_width(self.style.header_border_width),
            self.style.header_border_color,
        ));

        debug!(
            texts = frame.texts.len(),
            lines = frame.lines.len(),
            "built grid header frame"
        );
        Ok(frame)
    }

    fn validate_pass(&self, area: Rect) -> GanttResult<()> {
        if !area.is_valid() {
            let viewport = area.viewport();
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.style.validate()?;
        self.params.validate()
    }

    fn push_free_days(&self, frame: &mut RenderFrame, exposed: Rect) -> GanttResult<()> {
        let Some(fill) = self.style.free_day_fill else {
            return Ok(());
        };
        if self.grid.free_days().is_empty() {
            return Ok(());
        }

        for day in self.grid.visible_days(exposed.left(), exposed.right())? {
            if !day.is_free {
                continue;
            }
            let x0 = day.x.max(exposed.left());
            let x1 = (day.x + day.width).min(exposed.right());
            if x1 > x0 {
                frame.push_rect(RectPrimitive::new(
                    x0,
                    exposed.top(),
                    x1 - x0,
                    exposed.height,
                    fill,
                ));
            }
        }
        Ok(())
    }

    fn push_scale_lines(&self, frame: &mut RenderFrame, exposed: Rect) -> GanttResult<()> {
        let upper = self.grid.formatter_for(HeaderRow::Upper);
        let minor_width = self.params.scale_stroke_width(self.style.grid_line_width);
        let major_width = self.params.scale_stroke_width(self.style.major_line_width);

        for cell in self
            .grid
            .header_cells(HeaderRow::Lower, exposed.left(), exposed.right())?
        {
            if cell.x < exposed.left() || cell.x > exposed.right() {
                continue;
            }
            let is_major = upper.current_range_begin(cell.begin) == cell.begin;
            let (width, color) = if is_major {
                (major_width, self.style.major_line_color)
            } else {
                (minor_width, self.style.grid_line_color)
            };
            frame.push_line(LinePrimitive::vertical(
                cell.x,
                exposed.top(),
                exposed.bottom(),
                width,
                color,
            ));
        }
        Ok(())
    }

    fn push_row_separators(
        &self,
        frame: &mut RenderFrame,
        exposed: Rect,
        rows: &dyn RowController,
    ) {
        let width = self
            .params
            .scale_stroke_width(self.style.row_separator_width);
        let first = rows.index_at(exposed.top()).unwrap_or(0);

        for row in first..rows.row_count() {
            let Some(geometry) = rows.row_geometry(row) else {
                continue;
            };
            if geometry.start > exposed.bottom() {
                break;
            }
            let y = geometry.end();
            if y < exposed.top() || y > exposed.bottom() {
                continue;
            }
            frame.push_line(LinePrimitive::horizontal(
                y,
                exposed.left(),
                exposed.right(),
                width,
                self.style.row_separator_color,
            ));
        }
    }

    fn push_no_information(
        &self,
        frame: &mut RenderFrame,
        exposed: Rect,
        rows: &dyn RowController,
    ) {
        let Some(fill) = self.style.no_information_fill else {
            return;
        };
        let rows_bottom = rows.total_height();
        if !rows_bottom.is_finite() || rows_bottom >= exposed.bottom() {
            return;
        }

        let top = rows_bottom.max(exposed.top());
        frame.push_rect(RectPrimitive::new(
            exposed.left(),
            top,
            exposed.width,
            exposed.bottom() - top,
            fill,
        ));
    }

    fn push_time_line(&self, frame: &mut RenderFrame, exposed: Rect, now: NaiveDateTime) {
        let Some(x) = self.grid.time_line_position(now) else {
            return;
        };
        if x < exposed.left() || x > exposed.right() {
            return;
        }
        frame.push_line(LinePrimitive::vertical(
            x,
            exposed.top(),
            exposed.bottom(),
            self.params.scale_stroke_width(self.style.time_line_width),
            self.style.time_line_color,
        ));
    }

    fn push_header_row(
        &self,
        frame: &mut RenderFrame,
        row: HeaderRow,
        area: Rect,
        left: f64,
        right: f64,
        offset: f64,
    ) -> GanttResult<()> {
        let border_width = self
            .params
            .scale_stroke_width(self.style.header_border_width);
        let padding = self.style.header_text_padding_px;
        let text_y = area.top() + area.height / 2.0;

        for cell in self
            .grid
            .header_cells(row, offset + left, offset + right)?
        {
            let x = cell.x - offset;
            let cell_right = x + cell.width;
            if (left..=right).contains(&cell_right) {
                frame.push_line(LinePrimitive::vertical(
                    cell_right,
                    area.top(),
                    area.bottom(),
                    border_width,
                    self.style.header_border_color,
                ));
            }

            if cell.text.is_empty() {
                continue;
            }
            let text_x = match cell.alignment {
                Alignment::Left => x + padding,
                Alignment::Center => x + cell.width / 2.0,
                Alignment::Right => cell_right - padding,
            };
            frame.push_text(TextPrimitive::new(
                cell.text,
                text_x,
                text_y,
                self.style.header_font_size_px,
                self.style.header_text_color,
                cell.alignment.into(),
            ));
        }
        Ok(())
    }
}
