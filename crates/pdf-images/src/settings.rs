use crate::constants::{
    DEFAULT_CUSTOM_DPI, DEFAULT_OUTPUT_NAME, MAX_CUSTOM_DPI, MIN_CUSTOM_DPI, OUTPUT_EXTENSION,
};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTier {
    Low,
    #[default]
    Medium,
    High,
    Ultra,
    /// Use the DPI entered by the user
    Custom,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Low,
        QualityTier::Medium,
        QualityTier::High,
        QualityTier::Ultra,
        QualityTier::Custom,
    ];

    /// DPI of the preset, `None` for `Custom`
    pub fn fixed_dpi(self) -> Option<u32> {
        match self {
            QualityTier::Low => Some(72),
            QualityTier::Medium => Some(150),
            QualityTier::High => Some(300),
            QualityTier::Ultra => Some(600),
            QualityTier::Custom => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
            QualityTier::Ultra => "ultra",
            QualityTier::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Low => "Low (72 DPI)",
            QualityTier::Medium => "Medium (150 DPI)",
            QualityTier::High => "High (300 DPI)",
            QualityTier::Ultra => "Ultra HD (600 DPI)",
            QualityTier::Custom => "Custom DPI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Parse a tier key, falling back to `Medium` for anything unknown
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }
}

/// Page size catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    A3,
    A5,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::A4,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::A3,
        PageSize::A5,
    ];

    /// (width, height) in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A5 => (148.0, 210.0),
        }
    }

    pub fn orientation(self) -> Orientation {
        let (width, height) = self.dimensions_mm();
        Orientation::from_dimensions(width, height)
    }

    pub fn key(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::A3 => "a3",
            PageSize::A5 => "a5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageSize::A4 => "A4 (210 × 297 mm)",
            PageSize::Letter => "US Letter (8.5 × 11 in)",
            PageSize::Legal => "US Legal (8.5 × 14 in)",
            PageSize::A3 => "A3 (297 × 420 mm)",
            PageSize::A5 => "A5 (148 × 210 mm)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Parse a page size key, falling back to A4 for anything unknown
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }
}

/// Settings applied to the whole exported document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportSettings {
    pub quality: QualityTier,

    // Only read when `quality` is `Custom`; always within the DPI bounds
    #[cfg_attr(feature = "serde", serde(deserialize_with = "serde_impls::clamped_dpi"))]
    custom_dpi: u32,

    pub page_size: PageSize,

    /// File stem of the output; blank means "document"
    pub output_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            quality: QualityTier::Medium,
            custom_dpi: DEFAULT_CUSTOM_DPI,
            page_size: PageSize::A4,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn custom_dpi(&self) -> u32 {
        self.custom_dpi
    }

    /// Store a custom DPI, clamped to the accepted range
    pub fn set_custom_dpi(&mut self, dpi: i64) {
        self.custom_dpi = clamp_dpi(dpi);
    }

    /// Builder-style variant of [`set_custom_dpi`](Self::set_custom_dpi)
    pub fn with_custom_dpi(mut self, dpi: i64) -> Self {
        self.set_custom_dpi(dpi);
        self
    }

    pub fn dpi(&self) -> u32 {
        resolve_dpi(self)
    }

    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        resolve_page_dimensions(self.page_size)
    }

    pub fn orientation(&self) -> Orientation {
        self.page_size.orientation()
    }

    /// Name of the exported file, e.g. `document.pdf`
    pub fn output_file_name(&self) -> String {
        let stem = if self.output_name.trim().is_empty() {
            DEFAULT_OUTPUT_NAME.to_string()
        } else {
            self.output_name.replace(['/', '\\'], "_")
        };
        format!("{stem}.{OUTPUT_EXTENSION}")
    }

    /// Load settings from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let settings = serde_json::from_slice(&bytes)
            .map_err(|e| ConvertError::Config(format!("Failed to parse settings: {}", e)))?;
        Ok(settings)
    }

    /// Save settings to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::Config(format!("Failed to serialize settings: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// DPI to record for an export: the custom value for `Custom`, else the preset
pub fn resolve_dpi(settings: &ExportSettings) -> u32 {
    settings
        .quality
        .fixed_dpi()
        .unwrap_or(settings.custom_dpi)
}

/// Millimeter (width, height) of a catalog page size
pub fn resolve_page_dimensions(page_size: PageSize) -> (f32, f32) {
    page_size.dimensions_mm()
}

pub fn clamp_dpi(dpi: i64) -> u32 {
    dpi.clamp(MIN_CUSTOM_DPI as i64, MAX_CUSTOM_DPI as i64) as u32
}

/// Parse DPI text the way the settings field does: the leading integer is
/// used, anything unparseable counts as 0, and the result is clamped.
pub fn parse_custom_dpi(text: &str) -> u32 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let number = &text[..end];

    let value = match number.parse::<i64>() {
        Ok(value) => value,
        Err(_) if number.trim_start_matches(['+', '-']).is_empty() => 0,
        Err(_) if number.starts_with('-') => i64::MIN,
        Err(_) => i64::MAX,
    };
    clamp_dpi(value)
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Tiers and page sizes are stored as their lowercase keys; unknown keys
    // fall back to the defaults instead of failing the whole file.
    impl Serialize for QualityTier {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.key())
        }
    }

    impl<'de> Deserialize<'de> for QualityTier {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let key = String::deserialize(deserializer)?;
            Ok(QualityTier::from_key_or_default(&key))
        }
    }

    impl Serialize for PageSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.key())
        }
    }

    impl<'de> Deserialize<'de> for PageSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let key = String::deserialize(deserializer)?;
            Ok(PageSize::from_key_or_default(&key))
        }
    }

    pub(super) fn clamped_dpi<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dpi = i64::deserialize(deserializer)?;
        Ok(clamp_dpi(dpi))
    }
}
