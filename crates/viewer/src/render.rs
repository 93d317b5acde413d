//! egui painter for the displayed tree: inline flow inside a fixed-height scroll region.

use crate::toggle::is_toggle;
use crate::widget::HtmlViewer;
use css::{Display, Length, Rgba, compute_inline_look};
use egui::{
    Color32, CornerRadius, CursorIcon, Frame, Label, Margin, RichText, ScrollArea, Sense, Ui,
};
use html::{Id, Node};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "div", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "ol", "p", "pre", "section", "table", "tr", "ul",
];
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "template", "title"];
/// Nested boxes deeper than this are painted as one flat run of text.
const MAX_PAINT_DEPTH: usize = 32;

#[derive(Clone, Copy)]
struct Inherited {
    color: Color32,
    font_size: Option<f32>,
}

/// Paint the viewer's content. Returns the id of the node clicked this frame, if any; text
/// labels report their own id, styled boxes report their element's id.
pub fn paint_content(ui: &mut Ui, viewer: &HtmlViewer) -> Option<Id> {
    let container = match viewer.container() {
        Ok(container) => container,
        Err(err) => {
            ui.colored_label(Color32::RED, err.to_string());
            return None;
        }
    };

    let height = viewer.height_px();
    let mut clicked = None;
    ScrollArea::vertical()
        .id_salt("toggle_viewer_content")
        .max_height(height)
        .min_scrolled_height(height)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                let inherited = Inherited {
                    color: ui.visuals().text_color(),
                    font_size: None,
                };
                for child in container.children() {
                    paint_node(ui, child, inherited, 0, &mut clicked);
                }
            });
        });
    clicked
}

fn paint_node(
    ui: &mut Ui,
    node: &Node,
    inherited: Inherited,
    depth: usize,
    clicked: &mut Option<Id>,
) {
    if depth >= MAX_PAINT_DEPTH {
        paint_flat(ui, node, inherited, clicked);
        return;
    }
    match node {
        Node::Text { id, text } => paint_text(ui, *id, text, inherited, clicked),
        Node::Element {
            id, name, children, ..
        } => {
            if HIDDEN_ELEMENTS.contains(&name.as_str()) {
                return;
            }
            if name == "br" {
                ui.end_row();
                return;
            }
            let look = compute_inline_look(node);
            let block = match look.display {
                Some(Display::None) => return,
                Some(Display::Block) => true,
                Some(Display::Inline | Display::InlineBlock) => false,
                None => BLOCK_ELEMENTS.contains(&name.as_str()),
            };
            let inner = Inherited {
                color: look.color.map(to_color32).unwrap_or(inherited.color),
                font_size: look.font_size.map(Length::px).or(inherited.font_size),
            };

            if block {
                ui.end_row();
            }
            match look.background {
                Some(bg) => {
                    let frame = Frame::new()
                        .fill(to_color32(bg))
                        .corner_radius(CornerRadius::same(px_to_u8(look.border_radius)))
                        .inner_margin(Margin::same(px_to_i8(look.padding)));
                    let response = frame
                        .show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                for child in children {
                                    paint_node(ui, child, inner, depth + 1, clicked);
                                }
                            });
                        })
                        .response
                        .interact(Sense::click());
                    let response = if is_toggle(node) {
                        response.on_hover_cursor(CursorIcon::PointingHand)
                    } else {
                        response
                    };
                    if response.clicked() {
                        *clicked = Some(*id);
                    }
                }
                None => {
                    for child in children {
                        paint_node(ui, child, inner, depth + 1, clicked);
                    }
                }
            }
            if block {
                ui.end_row();
            }
        }
        Node::Document { children, .. } => {
            for child in children {
                paint_node(ui, child, inherited, depth + 1, clicked);
            }
        }
        Node::Comment { .. } => {}
    }
}

fn paint_text(ui: &mut Ui, id: Id, text: &str, inherited: Inherited, clicked: &mut Option<Id>) {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return;
    }
    let mut rich = RichText::new(text).color(inherited.color);
    if let Some(size) = inherited.font_size {
        rich = rich.size(size);
    }
    if ui.add(Label::new(rich).sense(Sense::click())).clicked() {
        *clicked = Some(id);
    }
}

/// Text and line breaks of a subtree in document order, without per-element boxes. Text labels
/// still report their own id, so toggles inside stay clickable.
fn paint_flat(ui: &mut Ui, node: &Node, inherited: Inherited, clicked: &mut Option<Id>) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::Text { id, text } => paint_text(ui, *id, text, inherited, clicked),
            Node::Element { name, .. } if name == "br" => ui.end_row(),
            Node::Element { name, .. } if HIDDEN_ELEMENTS.contains(&name.as_str()) => continue,
            _ => {}
        }
        stack.extend(node.children().iter().rev());
    }
}

/// HTML whitespace collapsing for inline text: any run of ASCII whitespace becomes one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

fn to_color32((r, g, b, a): Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn px_to_u8(len: Option<Length>) -> u8 {
    len.map_or(0.0, Length::px).round().clamp(0.0, u8::MAX as f32) as u8
}

fn px_to_i8(len: Option<Length>) -> i8 {
    len.map_or(0.0, Length::px).round().clamp(0.0, i8::MAX as f32) as i8
}
