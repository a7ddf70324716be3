//! Static reference data: style presets, colour swatches and the default
//! brand logo.

use crate::types::{BrandLogo, ColorSwatch, LogoId, Preset, SourceRef};

/* --------------------------------------------------------------------------
   Presets
   -------------------------------------------------------------------------- */

/// Preset selected on a fresh configuration.
pub const DEFAULT_PRESET_ID: &str = "avenue-montaigne";

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "avenue-montaigne",
        label: "Avenue Montaigne",
        description: "Classic Marble & Gold",
        icon: "Layout",
    },
    Preset {
        id: "jardin-palais",
        label: "Jardin du Palais",
        description: "Dreamy Garden Floral",
        icon: "Flower2",
    },
    Preset {
        id: "solid-chic",
        label: "Solid Chic",
        description: "Premium Texture Catalog",
        icon: "Square",
    },
    Preset {
        id: "artisanal-atelier",
        label: "Artisanal Atelier",
        description: "Warm Limestone Craft",
        icon: "Coffee",
    },
    Preset {
        id: "champagne-soiree",
        label: "Champagne Soirée",
        description: "Festive Silk & Bokeh",
        icon: "Palette",
    },
    Preset {
        id: "saint-germain",
        label: "Saint-Germain Chic",
        description: "Modern Minimal Pastel",
        icon: "Sun",
    },
    Preset {
        id: "ai-magic",
        label: "AI Magic",
        description: "Creative Exploration",
        icon: "Wand2",
    },
];

pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/* --------------------------------------------------------------------------
   Colours
   -------------------------------------------------------------------------- */

pub const DEFAULT_COLOR_NAME: &str = "Ivory Cream";

pub const LUXE_COLORS: &[ColorSwatch] = &[
    ColorSwatch { name: "Ivory Cream", value: "#FAF9F6" },
    ColorSwatch { name: "Rose Quartz", value: "#FDF0F0" },
    ColorSwatch { name: "Sage Leaf", value: "#E9F0E9" },
    ColorSwatch { name: "Noir Slate", value: "#2A2A2A" },
    ColorSwatch { name: "French Navy", value: "#1A2A3A" },
    ColorSwatch { name: "Sandstone", value: "#E5D3B3" },
];

pub fn find_color(name: &str) -> Option<&'static ColorSwatch> {
    LUXE_COLORS.iter().find(|c| c.name == name)
}

/* --------------------------------------------------------------------------
   Logos
   -------------------------------------------------------------------------- */

pub const DEFAULT_LOGO_ID: &str = "default";
pub const DEFAULT_LOGO_NAME: &str = "La Paris Gold";
pub const DEFAULT_LOGO_URL: &str = "https://images.unsplash.com/photo-1549488344-cbb6c34ce08b?q=80&w=200&h=200&auto=format&fit=crop";

/// The logo every registry starts with.
pub fn default_logo() -> BrandLogo {
    BrandLogo {
        id: LogoId::from(DEFAULT_LOGO_ID),
        name: DEFAULT_LOGO_NAME.to_string(),
        source: SourceRef::Url(DEFAULT_LOGO_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_is_in_catalog() {
        assert!(find_preset(DEFAULT_PRESET_ID).is_some());
    }

    #[test]
    fn default_color_is_in_catalog() {
        assert_eq!(find_color(DEFAULT_COLOR_NAME).unwrap().value, "#FAF9F6");
    }

    #[test]
    fn preset_ids_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
