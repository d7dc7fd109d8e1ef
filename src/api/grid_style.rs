use crate::error::{GanttError, GanttResult};
use crate::render::Color;

/// Colors and stroke widths used by the grid and header frame builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Background of free days; `None` leaves them unmarked.
    pub free_day_fill: Option<Color>,
    /// Area below the last row; `None` leaves it empty.
    pub no_information_fill: Option<Color>,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    /// Lower-scale boundaries that also start an upper-scale range.
    pub major_line_color: Color,
    pub major_line_width: f64,
    pub row_separator_color: Color,
    pub row_separator_width: f64,
    pub time_line_color: Color,
    pub time_line_width: f64,
    pub header_border_color: Color,
    pub header_border_width: f64,
    pub header_text_color: Color,
    pub header_font_size_px: f64,
    pub header_text_padding_px: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            free_day_fill: Some(Color::rgb(0.93, 0.93, 0.93)),
            no_information_fill: None,
            grid_line_color: Color::rgb(0.85, 0.85, 0.85),
            grid_line_width: 1.0,
            major_line_color: Color::rgb(0.6, 0.6, 0.6),
            major_line_width: 1.0,
            row_separator_color: Color::rgb(0.85, 0.85, 0.85),
            row_separator_width: 1.0,
            time_line_color: Color::rgb(0.86, 0.2, 0.2),
            time_line_width: 2.0,
            header_border_color: Color::rgb(0.7, 0.7, 0.7),
            header_border_width: 1.0,
            header_text_color: Color::rgb(0.1, 0.1, 0.1),
            header_font_size_px: 12.0,
            header_text_padding_px: 4.0,
        }
    }
}

impl GridStyle {
    pub fn validate(&self) -> GanttResult<()> {
        for color in [self.free_day_fill, self.no_information_fill]
            .into_iter()
            .flatten()
        {
            color.validate()?;
        }
        for color in [
            self.grid_line_color,
            self.major_line_color,
            self.row_separator_color,
            self.time_line_color,
            self.header_border_color,
            self.header_text_color,
        ] {
            color.validate()?;
        }

        for (name, width) in [
            ("grid_line_width", self.grid_line_width),
            ("major_line_width", self.major_line_width),
            ("row_separator_width", self.row_separator_width),
            ("time_line_width", self.time_line_width),
            ("header_border_width", self.header_border_width),
        ] {
            if !width.is_finite() || width < 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.header_font_size_px.is_finite() || self.header_font_size_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "header font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.header_text_padding_px.is_finite() || self.header_text_padding_px < 0.0 {
            return Err(GanttError::InvalidData(
                "header text padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Per-pass render parameters.
///
/// `scale_factor` scales every stroke, e.g. when rendering for print at a
/// different resolution than the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub scale_factor: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

impl RenderParams {
    pub fn with_scale_factor(scale_factor: f64) -> GanttResult<Self> {
        let params = Self { scale_factor };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(self) -> GanttResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(GanttError::InvalidData(
                "render scale factor must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Scaled stroke width. A zero (hairline) width becomes one scaled pixel.
    #[must_use]
    pub fn scale_stroke_width(self, width: f64) -> f64 {
        let scaled = width * self.scale_factor;
        if scaled == 0.0 {
            self.scale_factor
        } else {
            scaled
        }
    }
}
