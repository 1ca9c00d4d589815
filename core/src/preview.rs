use crate::selection::Selection;

pub const DEFAULT_PREVIEW_FONT: &str = "Arial";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewStyle {
    pub font_family: String,
    pub font_weight: String,
    pub font_style: &'static str,
}

impl PreviewStyle {
    pub fn for_selection(selection: &Selection, fallback_font: &str) -> Self {
        let font_family = if selection.family.is_empty() {
            fallback_font.to_string()
        } else {
            selection.family.clone()
        };
        let digits: String = selection
            .weight
            .chars()
            .filter(|ch| ch.is_ascii_digit())
            .collect();
        let font_weight = if digits.is_empty() {
            "normal".to_string()
        } else {
            digits
        };
        let font_style = if selection.italic { "italic" } else { "normal" };
        Self {
            font_family,
            font_weight,
            font_style,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "font-family: {}; font-weight: {}; font-style: {};",
            css_family(&self.font_family),
            self.font_weight,
            self.font_style
        )
    }
}

fn css_family(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
