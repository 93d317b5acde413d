use crate::error::{ViewerError, ViewerResult};
use crate::toggle::{is_toggle, toggle_element};
use bus::ValueSink;
use core_types::{ComponentArgs, ReportSeq};
use html::debug::outline_from_dom;
use html::dom_utils::{plain_text, set_attr};
use html::traverse::{assign_node_ids, find_node_by_id, find_node_by_id_mut, find_parent_id};
use html::{Id, Node, inner_html, outer_html, parse_fragment};

/// `id` attribute of the scroll region that wraps the host content.
pub const CONTAINER_ELEMENT_ID: &str = "content";
const OUTLINE_CAP: usize = 200;

/// Host content rendered into a fixed-height scroll region, plus the click handling that flips
/// toggle elements and reports the result.
///
/// The tree is a document holding exactly one container element; host markup lives beneath it.
/// Toggles mutate the tree in place until the host pushes different markup.
#[derive(Debug)]
pub struct HtmlViewer {
    host_html: String,
    height_px: f32,
    dom: Node,
    container_id: Id,
    next_seq: ReportSeq,
}

impl HtmlViewer {
    pub fn new(args: &ComponentArgs) -> Self {
        let height_px = args.height_px();
        let (dom, container_id) = build_tree(&args.html, height_px);
        log::debug!(
            target: "viewer.sync",
            "initial render: {} bytes, height {height_px}px",
            args.html.len()
        );
        Self {
            host_html: args.html.clone(),
            height_px,
            dom,
            container_id,
            next_seq: 1,
        }
    }

    /// Apply a host render. Returns `true` when the tree was rebuilt, which discards every
    /// unreported and reported toggle since the last rebuild.
    pub fn sync(&mut self, args: &ComponentArgs) -> bool {
        let height_px = args.height_px();
        if args.html == self.host_html {
            if height_px != self.height_px {
                log::debug!(target: "viewer.sync", "height {} -> {height_px}px", self.height_px);
                self.height_px = height_px;
                self.write_container_height();
            }
            return false;
        }

        let (dom, container_id) = build_tree(&args.html, height_px);
        log::info!(
            target: "viewer.sync",
            "host pushed new content ({} bytes); local toggles discarded",
            args.html.len()
        );
        self.host_html = args.html.clone();
        self.height_px = height_px;
        self.dom = dom;
        self.container_id = container_id;
        if log::log_enabled!(target: "viewer.sync", log::Level::Trace) {
            for line in outline_from_dom(&self.dom, OUTLINE_CAP) {
                log::trace!(target: "viewer.sync", "{line}");
            }
        }
        true
    }

    pub fn height_px(&self) -> f32 {
        self.height_px
    }

    pub fn container_id(&self) -> Id {
        self.container_id
    }

    pub fn dom(&self) -> &Node {
        &self.dom
    }

    /// Markup last supplied by the host, before any toggle.
    pub fn host_html(&self) -> &str {
        &self.host_html
    }

    pub fn container(&self) -> ViewerResult<&Node> {
        find_node_by_id(&self.dom, self.container_id)
            .filter(|n| n.is_element())
            .ok_or(ViewerError::ContainerMissing)
    }

    /// Serialized children of the container: what the host receives after a toggle.
    pub fn reported_value(&self) -> ViewerResult<String> {
        Ok(inner_html(self.container()?))
    }

    /// The whole scroll region as markup, container included.
    pub fn rendered_markup(&self) -> ViewerResult<String> {
        Ok(outer_html(self.container()?))
    }

    /// Current content as download-ready plain text.
    pub fn plain_text(&self) -> ViewerResult<String> {
        Ok(plain_text(self.container()?))
    }

    /// Handle a click on node `target`.
    ///
    /// Text nodes stand for their parent element. Clicks on anything that is not a toggle
    /// element (or on unknown ids) do nothing and report nothing. A toggle is flipped, then the
    /// container's inner HTML is handed to `sink` before this returns.
    pub fn click(
        &mut self,
        target: Id,
        sink: &mut dyn ValueSink,
    ) -> ViewerResult<Option<String>> {
        let Some(element_id) = self.resolve_click_target(target) else {
            return Ok(None);
        };
        // nothing is flipped unless the result can be reported
        self.container()?;
        let Some(element) = find_node_by_id_mut(&mut self.dom, element_id) else {
            return Ok(None);
        };
        if !is_toggle(element) {
            return Ok(None);
        }

        if let Err(err) = toggle_element(element) {
            log::error!(target: "viewer.toggle", "{err}");
            return Err(err);
        }
        // the new text node needs an id to stay clickable
        assign_node_ids(&mut self.dom);

        let value = self.reported_value()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        log::debug!(target: "viewer.toggle", "report #{seq}: {} bytes", value.len());
        sink.set_component_value(seq, value.clone());
        Ok(Some(value))
    }

    fn resolve_click_target(&self, target: Id) -> Option<Id> {
        if target == Id::UNSET {
            return None;
        }
        let node = find_node_by_id(&self.dom, target)?;
        match node {
            Node::Element { .. } => Some(target),
            Node::Text { .. } => find_parent_id(&self.dom, target),
            Node::Document { .. } | Node::Comment { .. } => None,
        }
    }

    fn write_container_height(&mut self) {
        let style = container_style(self.height_px);
        if let Some(container) = find_node_by_id_mut(&mut self.dom, self.container_id) {
            set_attr(container, "style", &style);
        }
    }
}

fn container_style(height_px: f32) -> String {
    format!("height: {height_px}px; overflow-y: auto")
}

fn build_tree(host_html: &str, height_px: f32) -> (Node, Id) {
    let container = Node::element(
        "div",
        vec![
            ("id".to_string(), Some(CONTAINER_ELEMENT_ID.to_string())),
            ("style".to_string(), Some(container_style(height_px))),
        ],
        parse_fragment(host_html),
    );
    let mut dom = Node::Document {
        id: Id::UNSET,
        doctype: None,
        children: vec![container],
    };
    assign_node_ids(&mut dom);
    let container_id = dom.children()[0].id();
    (dom, container_id)
}
