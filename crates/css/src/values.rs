pub type Rgba = (u8, u8, u8, u8);

/// CSS Length value, currently only supports `px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        match self {
            Length::Px(v) => v,
        }
    }
}

/// CSS `display` value, limited to what inline host markup uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    None,
}

pub fn parse_color(value: &str) -> Option<Rgba> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize, w: usize| -> Option<u8> {
            let digits = &hex[i * w..i * w + w];
            let v = u8::from_str_radix(digits, 16).ok()?;
            Some(if w == 1 { v * 17 } else { v })
        };
        return match hex.len() {
            3 => Some((channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 255)),
            6 => Some((channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 255)),
            _ => None,
        };
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
        let parts: Vec<u8> = args
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        return match parts.as_slice() {
            [r, g, b] => Some((*r, *g, *b, 255)),
            _ => None,
        };
    }

    let named = match s.as_str() {
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "orange" => (255, 165, 0, 255),
        "red" => (255, 0, 0, 255),
        "transparent" => (0, 0, 0, 0),
        "white" => (255, 255, 255, 255),
        "yellow" => (255, 255, 0, 255),
        _ => return None,
    };
    Some(named)
}

/// `background` shorthand: the first component that parses as a color.
pub fn parse_background_color(value: &str) -> Option<Rgba> {
    value.split_ascii_whitespace().find_map(parse_color)
}

/// Only `<number>px` is supported; `0` is accepted unitless.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    if v == "0" {
        return Some(Length::Px(0.0));
    }
    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    (num.is_finite() && num >= 0.0).then_some(Length::Px(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "none" => Some(Display::None),
        _ => None,
    }
}
