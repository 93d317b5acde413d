use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Monotonic per-widget counter stamped on every reported value.
pub type ReportSeq = u64;

/// Scroll-region height when the host omits one, or sends one that cannot be used.
pub const DEFAULT_HEIGHT_PX: f32 = 400.0;

/// Background of a toggle showing its corrected alternative.
pub const SUCCESS_TONE: &str = "#2EBD2E";
/// Background of a toggle showing its original alternative.
pub const FAILURE_TONE: &str = "#DB0000";

/// Arguments the host passes on every render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentArgs {
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("invalid component args: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComponentArgs {
    pub fn new(html: impl Into<String>, height: Option<f64>) -> Self {
        Self {
            html: html.into(),
            height,
        }
    }

    pub fn from_json(input: &str) -> Result<Self, ArgsError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Effective height. A missing, `null` or zero height means "use the default".
    ///
    /// Negative and non-finite heights are not valid CSS heights; they are clamped to
    /// [`DEFAULT_HEIGHT_PX`] too.
    pub fn height_px(&self) -> f32 {
        match self.height {
            Some(h) if h.is_finite() && h > 0.0 => h as f32,
            _ => DEFAULT_HEIGHT_PX,
        }
    }
}
