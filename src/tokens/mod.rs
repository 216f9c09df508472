//! Design tokens for the KBZ brand family
//!
//! Colors, numeric scales and typography. Values are in px unless noted.
//! Semantic colors and numeric scales are shared by every brand; primary and
//! secondary palettes and the typeface differ per brand.

pub mod colors;
pub mod css;
pub mod scales;
pub mod typography;

use ds_types::{Brand, TypographyLocale};
use serde::Serialize;

pub use colors::{brand_font, brand_meta, brand_palette, BrandFont, BrandMeta, BrandPalette, ColorScale};
pub use css::{all_brands_stylesheet, css_variables, stylesheet};
pub use scales::{token_groups, Shadow, Token, TokenGroup, SHADOWS};
pub use typography::{typography_groups, TextStyle, TypographyGroup};

/// Everything for one brand
#[derive(Debug, Clone, Serialize)]
pub struct BrandTokens {
    pub brand: Brand,
    pub meta: BrandMeta,
    pub font: BrandFont,
    pub palette: BrandPalette,
}

impl BrandTokens {
    pub fn for_brand(brand: Brand) -> Self {
        Self {
            brand,
            meta: brand_meta(brand),
            font: brand_font(brand),
            palette: *brand_palette(brand),
        }
    }
}

/// The complete token set, as served by the JSON API
#[derive(Debug, Clone, Serialize)]
pub struct TokenSet {
    pub brands: Vec<BrandTokens>,
    pub semantic_colors: Vec<colors::SemanticColor>,
    pub alpha: colors::AlphaScale,
    pub groups: Vec<TokenGroup>,
    pub shadows: Vec<Shadow>,
    pub typography_latin: Vec<TypographyGroup>,
    pub typography_mm: Vec<TypographyGroup>,
    pub line_height_pct: &'static str,
}

pub fn token_set() -> TokenSet {
    TokenSet {
        brands: Brand::ALL.iter().map(|&b| BrandTokens::for_brand(b)).collect(),
        semantic_colors: colors::SEMANTIC_COLORS.to_vec(),
        alpha: colors::ALPHA,
        groups: token_groups(),
        shadows: SHADOWS.to_vec(),
        typography_latin: typography_groups(TypographyLocale::Latin),
        typography_mm: typography_groups(TypographyLocale::Myanmar),
        line_height_pct: typography::LINE_HEIGHT_PCT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_set_json() {
        let json = serde_json::to_value(token_set()).unwrap();
        assert_eq!(json["brands"].as_array().unwrap().len(), 3);
        assert_eq!(json["brands"][1]["brand"], "kbz-pay");
        assert_eq!(json["brands"][1]["meta"]["label"], "KBZ Pay");
        assert_eq!(json["brands"][2]["palette"]["secondary"]["500"], "#cbb075");
        assert_eq!(json["semantic_colors"][0]["label"], "Info");
        assert_eq!(json["line_height_pct"], "150%");
        assert_eq!(json["typography_mm"][0]["label"], "Display (MM)");
    }
}
