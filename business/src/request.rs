//! The encode request edited by the input panel.

use std::any::Any;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use qrgen_states::{State, state_assign_impl};
use serde::{Deserialize, Serialize};

use crate::AppConfig;

/// Smallest selectable output size in pixels.
pub const SIZE_MIN: u32 = 128;
/// Largest selectable output size in pixels.
pub const SIZE_MAX: u32 = 512;
/// Step of the size slider.
pub const SIZE_STEP: u32 = 32;

pub const DEFAULT_SIZE: u32 = 256;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// QR redundancy tier, trading capacity for damage resilience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    #[serde(rename = "L")]
    Low,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "Q")]
    Quartile,
    #[serde(rename = "H")]
    High,
}

impl ErrorCorrection {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::Quartile, Self::High];

    /// Single-letter code used by the QR standard.
    pub fn code(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::Quartile => 'Q',
            Self::High => 'H',
        }
    }

    /// Approximate share of codewords that can be restored.
    pub fn recovery_percent(self) -> u8 {
        match self {
            Self::Low => 7,
            Self::Medium => 15,
            Self::Quartile => 25,
            Self::High => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (7%)",
            Self::Medium => "Medium (15%)",
            Self::Quartile => "Quartile (25%)",
            Self::High => "High (30%)",
        }
    }
}

impl Display for ErrorCorrection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::Low),
            "M" | "MEDIUM" => Ok(Self::Medium),
            "Q" | "QUARTILE" => Ok(Self::Quartile),
            "H" | "HIGH" => Ok(Self::High),
            other => Err(format!("unknown error correction level: {other}")),
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => Self::L,
            ErrorCorrection::Medium => Self::M,
            ErrorCorrection::Quartile => Self::Q,
            ErrorCorrection::High => Self::H,
        }
    }
}

/// Everything needed to produce one QR rendering.
///
/// Fields are stored exactly as typed; colors in particular are not checked
/// here and an invalid one only surfaces when the encoder rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub text: String,
    pub size_px: u32,
    pub foreground: String,
    pub background: String,
    pub error_correction: ErrorCorrection,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            size_px: DEFAULT_SIZE,
            foreground: DEFAULT_FOREGROUND.to_owned(),
            background: DEFAULT_BACKGROUND.to_owned(),
            error_correction: ErrorCorrection::default(),
        }
    }
}

impl EncodeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Initial request seeded from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            text: String::new(),
            size_px: config.default_size,
            foreground: config.default_foreground.clone(),
            background: config.default_background.clone(),
            error_correction: config.default_error_correction,
        }
    }

    pub fn with_size(mut self, size_px: u32) -> Self {
        self.size_px = size_px;
        self
    }

    pub fn with_colors(mut self, foreground: impl Into<String>, background: impl Into<String>) -> Self {
        self.foreground = foreground.into();
        self.background = background.into();
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Character count shown under the text box.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_size(&mut self, size_px: u32) {
        self.size_px = size_px;
    }

    pub fn set_foreground(&mut self, color: impl Into<String>) {
        self.foreground = color.into();
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = color.into();
    }

    pub fn set_error_correction(&mut self, level: ErrorCorrection) {
        self.error_correction = level;
    }
}

/// Whether `size` is one of the slider stops.
pub fn is_selectable_size(size: u32) -> bool {
    (SIZE_MIN..=SIZE_MAX).contains(&size) && (size - SIZE_MIN) % SIZE_STEP == 0
}

impl State for EncodeRequest {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
