//! Color tokens: shared semantic scales and per-brand palettes

use ds_types::Brand;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Steps of every color scale, lightest first
pub const STEPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Ten-step color scale keyed by `STEPS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale(pub [&'static str; 10]);

impl ColorScale {
    pub fn get(&self, step: u16) -> Option<&'static str> {
        STEPS.iter().position(|&s| s == step).map(|i| self.0[i])
    }

    pub fn entries(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        STEPS.iter().copied().zip(self.0.iter().copied())
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STEPS.len()))?;
        for (step, value) in self.entries() {
            map.serialize_entry(&step.to_string(), value)?;
        }
        map.end()
    }
}

/// Translucent overlay scale keyed `50A` .. `900A`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaScale(pub [&'static str; 10]);

impl AlphaScale {
    pub fn entries(&self) -> impl Iterator<Item = (String, &'static str)> + '_ {
        STEPS
            .iter()
            .map(|s| format!("{}A", s))
            .zip(self.0.iter().copied())
    }
}

impl Serialize for AlphaScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STEPS.len()))?;
        for (step, value) in self.entries() {
            map.serialize_entry(&step, value)?;
        }
        map.end()
    }
}

pub const INFO: ColorScale = ColorScale([
    "#fafdfe", "#ecf6fe", "#cee8fd", "#82c3f7", "#3b91d8", "#0b7ad5", "#024db1", "#01377e",
    "#01214c", "#011128",
]);

pub const SUCCESS: ColorScale = ColorScale([
    "#fafffa", "#e8fde8", "#b6f7b6", "#88e788", "#0ab80a", "#008a00", "#016f01", "#015103",
    "#013d03", "#001e01",
]);

pub const WARNING: ColorScale = ColorScale([
    "#fffdfa", "#fef7eb", "#fceacf", "#f2c788", "#eda63b", "#d28107", "#a86706", "#6e4302",
    "#3c2401", "#1e1201",
]);

pub const CRITICAL: ColorScale = ColorScale([
    "#fffafa", "#fef0f0", "#fecdcd", "#fb9d9d", "#e23c3c", "#b30909", "#950404", "#720303",
    "#3c0101", "#1e0101",
]);

pub const NEUTRAL: ColorScale = ColorScale([
    "#fdfdfd", "#fafafa", "#f5f5f5", "#e6e6e6", "#d6d6d6", "#b0b0b0", "#949494", "#666666",
    "#424242", "#1a1a1a",
]);

pub const ALPHA: AlphaScale = AlphaScale([
    "rgba(8, 8, 8, 0.02)",
    "rgba(8, 8, 8, 0.08)",
    "rgba(8, 8, 8, 0.21)",
    "rgba(8, 8, 8, 0.32)",
    "rgba(8, 8, 8, 0.42)",
    "rgba(8, 8, 8, 0.55)",
    "rgba(8, 8, 8, 0.67)",
    "rgba(8, 8, 8, 0.82)",
    "rgba(8, 8, 8, 0.92)",
    "rgba(8, 8, 8, 0.96)",
]);

/// Semantic color shared by every brand
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SemanticColor {
    pub label: &'static str,
    pub accent: &'static str,
    pub scale: ColorScale,
}

impl SemanticColor {
    /// CSS variable prefix, e.g. `color-info`
    pub fn prefix(&self) -> String {
        format!("color-{}", self.label.to_lowercase())
    }
}

pub const SEMANTIC_COLORS: [SemanticColor; 5] = [
    SemanticColor { label: "Info", accent: "#0b7ad5", scale: INFO },
    SemanticColor { label: "Success", accent: "#008a00", scale: SUCCESS },
    SemanticColor { label: "Warning", accent: "#d28107", scale: WARNING },
    SemanticColor { label: "Critical", accent: "#b30909", scale: CRITICAL },
    SemanticColor { label: "Neutral", accent: "#666666", scale: NEUTRAL },
];

/// Primary and secondary palettes of one brand
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BrandPalette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
}

const KBZ_BANK: BrandPalette = BrandPalette {
    primary: ColorScale([
        "#fafcff", "#f0f5ff", "#e1ecfe", "#92bafb", "#1464eb", "#002c76", "#012460", "#011b47",
        "#03122b", "#010913",
    ]),
    secondary: ColorScale([
        "#fefbfb", "#fdf2f3", "#f9d2d4", "#f3a5a9", "#c94a50", "#b51f26", "#911218", "#69070b",
        "#3d0104", "#280103",
    ]),
};

const KBZ_PAY: BrandPalette = BrandPalette {
    primary: ColorScale([
        "#fafdff", "#e5f2ff", "#d7ebfe", "#86c0f9", "#1371cd", "#0054a6", "#00468a", "#00386f",
        "#002a53", "#001c37",
    ]),
    secondary: ColorScale([
        "#fafeff", "#e7f9fe", "#d0f2fb", "#9ae1f4", "#84d9f0", "#5ad2f2", "#15b9e5", "#13a2c9",
        "#0f708a", "#0a4757",
    ]),
};

const PREMIUM_BANK: BrandPalette = BrandPalette {
    primary: ColorScale([
        "#fbfcfe", "#f0f4fa", "#dae2f1", "#b7c5e1", "#435d89", "#1d2d49", "#152237", "#0e1725",
        "#080e16", "#030507",
    ]),
    secondary: ColorScale([
        "#fefdfb", "#f6f3e9", "#ede4cf", "#e2d3b1", "#d7c293", "#cbb075", "#b99546", "#957737",
        "#685427", "#3b3016",
    ]),
};

pub fn brand_palette(brand: Brand) -> &'static BrandPalette {
    match brand {
        Brand::KbzBank => &KBZ_BANK,
        Brand::KbzPay => &KBZ_PAY,
        Brand::PremiumBank => &PREMIUM_BANK,
    }
}

/// Display metadata of a brand
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BrandMeta {
    pub label: &'static str,
    pub primary_hex: &'static str,
    pub secondary_hex: &'static str,
}

pub fn brand_meta(brand: Brand) -> BrandMeta {
    let (primary_hex, secondary_hex) = match brand {
        Brand::KbzBank => ("#002c76", "#b51f26"),
        Brand::KbzPay => ("#0054a6", "#5ad2f2"),
        Brand::PremiumBank => ("#1d2d49", "#cbb075"),
    };
    BrandMeta {
        label: brand.label(),
        primary_hex,
        secondary_hex,
    }
}

/// Brand typeface (Google Fonts)
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BrandFont {
    pub name: &'static str,
    pub url: &'static str,
    pub css_var: &'static str,
}

pub fn brand_font(brand: Brand) -> BrandFont {
    match brand {
        Brand::KbzBank => BrandFont {
            name: "Poppins",
            url: "https://fonts.google.com/specimen/Poppins",
            css_var: "--font-poppins",
        },
        Brand::KbzPay => BrandFont {
            name: "Nunito",
            url: "https://fonts.google.com/specimen/Nunito",
            css_var: "--font-nunito",
        },
        Brand::PremiumBank => BrandFont {
            name: "Inter",
            url: "https://fonts.google.com/specimen/Inter",
            css_var: "--font-inter",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_500_matches_brand_meta() {
        for brand in Brand::ALL {
            let palette = brand_palette(brand);
            let meta = brand_meta(brand);
            assert_eq!(palette.primary.get(500), Some(meta.primary_hex));
            assert_eq!(palette.secondary.get(500), Some(meta.secondary_hex));
        }
    }

    #[test]
    fn test_scale_lookup() {
        assert_eq!(INFO.get(50), Some("#fafdfe"));
        assert_eq!(NEUTRAL.get(900), Some("#1a1a1a"));
        assert_eq!(INFO.get(550), None);
    }

    #[test]
    fn test_scale_serializes_as_step_map() {
        let json = serde_json::to_value(CRITICAL).unwrap();
        assert_eq!(json["500"], "#b30909");
        let json = serde_json::to_value(ALPHA).unwrap();
        assert_eq!(json["900A"], "rgba(8, 8, 8, 0.96)");
    }

    #[test]
    fn test_brand_fonts() {
        assert_eq!(brand_font(Brand::KbzBank).name, "Poppins");
        assert_eq!(brand_font(Brand::KbzPay).name, "Nunito");
        assert_eq!(brand_font(Brand::PremiumBank).css_var, "--font-inter");
    }
}
