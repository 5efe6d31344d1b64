use crate::models::category::Category;
use egui::Color32;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse `#RRGGBB` or `#RGB`.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color32::from_rgb(r, g, b))
    } else if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
        Some(Color32::from_rgb(r, g, b))
    } else {
        None
    }
}

pub(crate) fn category_color(category: &Category) -> Color32 {
    parse_hex_color(&category.color).unwrap_or(Color32::GRAY)
}

/// Black or white, whichever reads better on `background`.
pub(crate) fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[derive(Clone, Copy)]
pub(crate) struct SlotGridPalette {
    pub empty_bg: Color32,
    pub hour_line: Color32,
    pub half_hour_line: Color32,
    pub time_text: Color32,
    pub note_text: Color32,
    pub selection: Color32,
    pub focus_ring: Color32,
    pub editor_marker: Color32,
}

impl SlotGridPalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        let accent = visuals.selection.bg_fill;
        Self {
            empty_bg: visuals.extreme_bg_color,
            hour_line: visuals.widgets.noninteractive.bg_stroke.color,
            half_hour_line: with_alpha(visuals.widgets.noninteractive.bg_stroke.color, 90),
            time_text: visuals.weak_text_color(),
            note_text: visuals.text_color(),
            selection: with_alpha(accent, if visuals.dark_mode { 110 } else { 80 }),
            focus_ring: accent,
            editor_marker: visuals.hyperlink_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#2D5F3E"), Some(Color32::from_rgb(0x2D, 0x5F, 0x3E)));
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(0x2D, 0x5F, 0x3E)), Color32::WHITE);
    }
}
