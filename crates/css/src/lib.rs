pub mod computed;
pub mod inline;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use computed::{InlineLook, compute_inline_look};
pub use inline::{get_inline_style, inline_declarations, set_inline_shorthand};
pub use syntax::{Declaration, parse_declarations, serialize_declarations, set_shorthand};
pub use values::{Display, Length, Rgba, parse_background_color, parse_color, parse_length};
