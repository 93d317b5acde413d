//! Toggle viewer widget: host markup in a scroll region whose toggle spans flip between an
//! original and a corrected text, reporting the edited markup back to the host.

pub mod app;
pub mod error;
pub mod markup;
pub mod render;
pub mod toggle;
pub mod widget;

pub use app::ViewerApp;
pub use error::{ViewerError, ViewerResult};
pub use markup::{CorrectionDocument, ToggleSpan, wrap_document};
pub use render::paint_content;
pub use toggle::{ToggleOutcome, ToggleState, toggle_element};
pub use widget::{CONTAINER_ELEMENT_ID, HtmlViewer};
