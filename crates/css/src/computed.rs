use crate::inline::inline_declarations;
use crate::values::{
    Display, Length, Rgba, parse_background_color, parse_color, parse_display, parse_length,
};
use html::Node;

/// The handful of inline properties the content painter honors. Everything else in host
/// styles is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InlineLook {
    pub color: Option<Rgba>,
    pub background: Option<Rgba>,
    pub font_size: Option<Length>,
    pub display: Option<Display>,
    pub padding: Option<Length>,
    pub border_radius: Option<Length>,
}

impl InlineLook {
    pub const NONE: InlineLook = InlineLook {
        color: None,
        background: None,
        font_size: None,
        display: None,
        padding: None,
        border_radius: None,
    };
}

impl Default for InlineLook {
    fn default() -> Self {
        Self::NONE
    }
}

/// Later declarations win, as in a single style attribute.
pub fn compute_inline_look(node: &Node) -> InlineLook {
    let mut look = InlineLook::NONE;
    for d in inline_declarations(node) {
        match d.name.as_str() {
            "color" => look.color = parse_color(&d.value).or(look.color),
            "background" => look.background = parse_background_color(&d.value).or(look.background),
            "background-color" => look.background = parse_color(&d.value).or(look.background),
            "font-size" => look.font_size = parse_length(&d.value).or(look.font_size),
            "display" => look.display = parse_display(&d.value).or(look.display),
            "padding" => {
                // shorthand: the first component stands in for all sides
                let first = d.value.split_ascii_whitespace().next().unwrap_or("");
                look.padding = parse_length(first).or(look.padding);
            }
            "border-radius" => look.border_radius = parse_length(&d.value).or(look.border_radius),
            _ => {}
        }
    }
    look
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    #[test]
    fn host_pill_style_is_understood() {
        let dom = parse_document(
            r#"<span style="background:#2EBD2E; border-radius:8px; padding:4px; display:inline-block; cursor:pointer; font-size:16px; color:white;">x</span>"#,
        );
        let look = compute_inline_look(&dom.children()[0]);
        assert_eq!(
            look,
            InlineLook {
                color: Some((255, 255, 255, 255)),
                background: Some((0x2E, 0xBD, 0x2E, 255)),
                font_size: Some(Length::Px(16.0)),
                display: Some(Display::InlineBlock),
                padding: Some(Length::Px(4.0)),
                border_radius: Some(Length::Px(8.0)),
            }
        );
    }

    #[test]
    fn unstyled_element_has_no_look() {
        let dom = parse_document("<b>x</b>");
        assert_eq!(compute_inline_look(&dom.children()[0]), InlineLook::NONE);
    }

    #[test]
    fn invalid_values_keep_earlier_ones() {
        let dom = parse_document(r#"<b style="color: red; color: nonsense">x</b>"#);
        assert_eq!(compute_inline_look(&dom.children()[0]).color, Some((255, 0, 0, 255)));
    }
}
