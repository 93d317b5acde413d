use crate::error::{ViewerError, ViewerResult};
use core_types::{FAILURE_TONE, SUCCESS_TONE};
use css::set_inline_shorthand;
use html::Node;
use html::dom_utils::{has_class, set_text_content, text_content};

/// Marker class of a toggle element.
pub const TOGGLE_CLASS: &str = "toggle";
pub const ORIGINAL_ATTR: &str = "data-original";
pub const CORRECTED_ATTR: &str = "data-corrected";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleState {
    Original,
    Corrected,
}

impl ToggleState {
    pub fn tone(self) -> &'static str {
        match self {
            ToggleState::Original => FAILURE_TONE,
            ToggleState::Corrected => SUCCESS_TONE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub state: ToggleState,
    pub text: String,
}

pub fn is_toggle(node: &Node) -> bool {
    node.is_element() && has_class(node, TOGGLE_CLASS)
}

/// Flip a toggle element between its two alternatives.
///
/// Text equal to the original switches to the corrected alternative on the success tone.
/// Anything else, including text matching neither alternative, switches back to the original on
/// the failure tone. Both data attributes must be present; the element is left untouched
/// otherwise.
pub fn toggle_element(node: &mut Node) -> ViewerResult<ToggleOutcome> {
    let id = node.id();
    let original = node
        .attr(ORIGINAL_ATTR)
        .ok_or(ViewerError::MissingToggleData {
            node: id,
            attribute: ORIGINAL_ATTR,
        })?
        .to_string();
    let corrected = node
        .attr(CORRECTED_ATTR)
        .ok_or(ViewerError::MissingToggleData {
            node: id,
            attribute: CORRECTED_ATTR,
        })?
        .to_string();

    let (state, text) = if text_content(node) == original {
        (ToggleState::Corrected, corrected)
    } else {
        (ToggleState::Original, original)
    };

    if !set_text_content(node, &text) || !set_inline_shorthand(node, "background", state.tone()) {
        return Err(ViewerError::NotAnElement { node: id });
    }
    log::debug!(target: "viewer.toggle", "{id} -> {state:?} {text:?}");
    Ok(ToggleOutcome { state, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{Id, inner_html, parse_document};

    fn first_child(markup: &str) -> Node {
        parse_document(markup)
            .children()
            .first()
            .cloned()
            .expect("markup has a top-level node")
    }

    #[test]
    fn original_flips_to_corrected_on_success_tone() {
        let mut span =
            first_child(r#"<span class="toggle" data-original="A" data-corrected="B">A</span>"#);
        let outcome = toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(
            outcome,
            ToggleOutcome {
                state: ToggleState::Corrected,
                text: "B".to_string()
            }
        );
        assert_eq!(text_content(&span), "B");
        assert_eq!(span.attr("style"), Some("background: #2EBD2E;"));
    }

    #[test]
    fn corrected_flips_back_to_original_on_failure_tone() {
        let mut span =
            first_child(r#"<span class="toggle" data-original="A" data-corrected="B">B</span>"#);
        let outcome = toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(outcome.state, ToggleState::Original);
        assert_eq!(text_content(&span), "A");
        assert_eq!(span.attr("style"), Some("background: #DB0000;"));
    }

    #[test]
    fn unrecognized_text_flips_to_original() {
        let mut span =
            first_child(r#"<span class="toggle" data-original="A" data-corrected="B">zzz</span>"#);
        let outcome = toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(outcome.state, ToggleState::Original);
        assert_eq!(text_content(&span), "A");
    }

    #[test]
    fn comparison_uses_decoded_values() {
        let mut span = first_child(
            r#"<span class="toggle" data-original="it&#x27;s &amp; that" data-corrected="its">it's &amp; that</span>"#,
        );
        toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(text_content(&span), "its");
    }

    #[test]
    fn nested_markup_is_compared_by_text_content() {
        let mut span = first_child(
            r#"<span class="toggle" data-original="big cat" data-corrected="big dog"><b>big</b> cat</span>"#,
        );
        toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(
            inner_html(&span),
            "big dog",
            "children are replaced by one text node"
        );
    }

    #[test]
    fn missing_corrected_fails_loudly_and_leaves_element_untouched() {
        let mut span = first_child(r#"<span class="toggle" data-original="A">A</span>"#);
        let before = span.clone();
        let err = toggle_element(&mut span).expect_err("missing attribute");
        assert_eq!(
            err,
            ViewerError::MissingToggleData {
                node: Id::UNSET,
                attribute: CORRECTED_ATTR
            }
        );
        assert_eq!(span, before);
    }

    #[test]
    fn missing_original_is_reported_first() {
        let mut span = first_child(r#"<span class="toggle">A</span>"#);
        let err = toggle_element(&mut span).expect_err("missing attributes");
        assert!(
            matches!(err, ViewerError::MissingToggleData { attribute, .. } if attribute == ORIGINAL_ATTR),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn empty_alternative_is_allowed() {
        let mut span =
            first_child(r#"<span class="toggle" data-original="the" data-corrected="">the</span>"#);
        toggle_element(&mut span).expect("empty corrected text is still present");
        assert_eq!(text_content(&span), "");
        toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(text_content(&span), "the");
    }

    #[test]
    fn equal_alternatives_stay_on_success_tone() {
        let mut span =
            first_child(r#"<span class="toggle" data-original="ok" data-corrected="ok">ok</span>"#);
        for _ in 0..2 {
            let outcome = toggle_element(&mut span).expect("well-formed toggle");
            assert_eq!(outcome.state, ToggleState::Corrected);
        }
        assert_eq!(span.attr("style"), Some("background: #2EBD2E;"));
    }

    #[test]
    fn toggle_marker_is_a_class_token() {
        assert!(is_toggle(&first_child(r#"<span class="word toggle">x</span>"#)));
        assert!(!is_toggle(&first_child(r#"<span class="toggles">x</span>"#)));
        assert!(!is_toggle(&Node::text("toggle")));
    }
}
