use plotters::style::{RGBAColor, RGBColor};
use plotters_backend::FontFamily;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Line colours for parent customers
pub const SERIES_PALETTE: [RGBColor; 10] = [
    RGBColor(135, 206, 250), // Light sky blue
    RGBColor(255, 165, 79),
    RGBColor(124, 205, 124),
    RGBColor(238, 99, 99),
    RGBColor(186, 148, 255),
    RGBColor(205, 170, 125),
    RGBColor(255, 130, 200),
    RGBColor(180, 180, 180),
    RGBColor(220, 220, 90),
    RGBColor(72, 209, 204),
];

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(13, 13, 13, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub point_radius: i32,
    pub font_family: FontFamily<'static>,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 960,
            height: 420,
            line_width: 2,
            point_radius: 3,
            font_family: FontFamily::SansSerif,
            font_size: 15,
            margin: 10,
            label_area_size: 60,
        }
    }
}

/// Colour for a parent customer, stable for as long as its name is.
pub fn series_color(group: &str) -> RGBColor {
    let mut hasher = DefaultHasher::new();
    group.hash(&mut hasher);
    SERIES_PALETTE[(hasher.finish() % SERIES_PALETTE.len() as u64) as usize]
}
