// Headshot style catalog

use serde::{Deserialize, Serialize};

/// Identifier for a headshot style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HeadshotStyle {
    Corporate,
    Startup,
    Outdoor,
    Studio,
    FaceSwap,
    Custom,
}

impl HeadshotStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => "corporate",
            HeadshotStyle::Startup => "startup",
            HeadshotStyle::Outdoor => "outdoor",
            HeadshotStyle::Studio => "studio",
            HeadshotStyle::FaceSwap => "faceswap",
            HeadshotStyle::Custom => "custom",
        }
    }

    /// Parse a style tag as typed by the user
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "corporate" => Some(HeadshotStyle::Corporate),
            "startup" | "tech" => Some(HeadshotStyle::Startup),
            "outdoor" => Some(HeadshotStyle::Outdoor),
            "studio" => Some(HeadshotStyle::Studio),
            "faceswap" | "swap" => Some(HeadshotStyle::FaceSwap),
            "custom" => Some(HeadshotStyle::Custom),
            _ => None,
        }
    }
}

/// A predefined editing style with a fixed prompt template
#[derive(Debug, Clone)]
pub struct StyleOption {
    pub id: HeadshotStyle,
    pub label: &'static str,
    pub description: &'static str,
    pub prompt_template: &'static str,
    pub icon: &'static str,
}

/// Preset styles offered to the user, in display order.
/// Face swap and custom edits are separate modes without a template.
pub const HEADSHOT_STYLES: &[StyleOption] = &[
    StyleOption {
        id: HeadshotStyle::Corporate,
        label: "Corporate",
        description: "Professional grey backdrop, suit/business attire, soft studio lighting.",
        prompt_template: "Transform this person into a professional corporate headshot. Grey studio background, business attire, high quality, photorealistic, sharp focus.",
        icon: "🏢",
    },
    StyleOption {
        id: HeadshotStyle::Startup,
        label: "Tech / Startup",
        description: "Modern office bokeh, smart casual, approachable and bright.",
        prompt_template: "Transform this person into a modern tech worker headshot. Blurred modern open-plan office background, smart casual clothing, bright friendly lighting.",
        icon: "💻",
    },
    StyleOption {
        id: HeadshotStyle::Outdoor,
        label: "Outdoor",
        description: "Natural light, park or city background, relaxed professional.",
        prompt_template: "Transform this person into a professional outdoor headshot. Soft natural lighting, blurred nature or city background, relaxed but professional look.",
        icon: "🌳",
    },
    StyleOption {
        id: HeadshotStyle::Studio,
        label: "Dark Studio",
        description: "Dramatic lighting, black or dark textured background.",
        prompt_template: "Transform this person into a dramatic studio headshot. Black or dark textured background, rim lighting, high contrast, professional portrait.",
        icon: "📸",
    },
];

/// Find the preset entry for a style, if it has one
pub fn lookup(style: HeadshotStyle) -> Option<&'static StyleOption> {
    HEADSHOT_STYLES.iter().find(|s| s.id == style)
}
