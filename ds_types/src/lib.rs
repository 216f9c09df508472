//! Design System Types - Level 1 Foundation Types
//!
//! Pure data types that every other layer of the design system depends on:
//! component categories, brand themes and typography locales.
//!
//! ## Critical Rules
//!
//! 1. **NO BUSINESS LOGIC** - Only data structures, parsing and display
//! 2. **NO WORKSPACE DEPENDENCIES** - This crate sits at the bottom
//! 3. **SERIALIZABLE** - All types support serde

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Error returned when a string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown brand '{0}'")]
    UnknownBrand(String),

    #[error("Unknown typography locale '{0}'")]
    UnknownLocale(String),
}

// ============================================================================
// COMPONENT CATEGORY
// ============================================================================

/// Atomic-design classification of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Atoms,
    Molecules,
    Organisms,
    Templates,
    Pages,
}

impl Category {
    /// All categories in presentation order
    pub const ALL: [Category; 5] = [
        Category::Atoms,
        Category::Molecules,
        Category::Organisms,
        Category::Templates,
        Category::Pages,
    ];

    /// Stored and displayed name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Atoms => "Atoms",
            Category::Molecules => "Molecules",
            Category::Organisms => "Organisms",
            Category::Templates => "Templates",
            Category::Pages => "Pages",
        }
    }

    /// Badge palette name used by the UI
    pub fn badge_tone(&self) -> &'static str {
        match self {
            Category::Atoms | Category::Molecules => "blue",
            Category::Organisms => "emerald",
            Category::Templates => "amber",
            Category::Pages => "rose",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Atoms
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeParseError::UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// BRAND
// ============================================================================

/// Tenant theme. Each brand has its own palette and typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Brand {
    KbzBank,
    KbzPay,
    PremiumBank,
}

impl Brand {
    pub const ALL: [Brand; 3] = [Brand::KbzBank, Brand::KbzPay, Brand::PremiumBank];

    /// Value of the `data-brand` attribute
    pub fn slug(&self) -> &'static str {
        match self {
            Brand::KbzBank => "kbz-bank",
            Brand::KbzPay => "kbz-pay",
            Brand::PremiumBank => "premium-bank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Brand::KbzBank => "KBZ Bank",
            Brand::KbzPay => "KBZ Pay",
            Brand::PremiumBank => "Premium Bank",
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Brand::KbzBank
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Brand {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Brand::ALL
            .into_iter()
            .find(|b| b.slug().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeParseError::UnknownBrand(s.to_string()))
    }
}

// ============================================================================
// TYPOGRAPHY LOCALE
// ============================================================================

/// Typography scale selector. Myanmar uses a slightly compressed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypographyLocale {
    Latin,
    Myanmar,
}

impl TypographyLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypographyLocale::Latin => "latin",
            TypographyLocale::Myanmar => "mm",
        }
    }
}

impl FromStr for TypographyLocale {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latin" | "en" => Ok(TypographyLocale::Latin),
            "mm" | "my" | "myanmar" => Ok(TypographyLocale::Myanmar),
            _ => Err(TypeParseError::UnknownLocale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_presentation_order() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["Atoms", "Molecules", "Organisms", "Templates", "Pages"]
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Organisms".parse::<Category>(), Ok(Category::Organisms));
        assert_eq!(" pages ".parse::<Category>(), Ok(Category::Pages));
        assert_eq!(
            "Widgets".parse::<Category>(),
            Err(TypeParseError::UnknownCategory("Widgets".to_string()))
        );
    }

    #[test]
    fn test_category_serde_uses_exact_name() {
        let json = serde_json::to_string(&Category::Templates).unwrap();
        assert_eq!(json, "\"Templates\"");
        let back: Category = serde_json::from_str("\"Molecules\"").unwrap();
        assert_eq!(back, Category::Molecules);
    }

    #[test]
    fn test_brand_slugs() {
        assert_eq!(Brand::KbzPay.slug(), "kbz-pay");
        assert_eq!("premium-bank".parse::<Brand>(), Ok(Brand::PremiumBank));
        assert!("mm".parse::<Brand>().is_err());
        assert_eq!(Brand::default(), Brand::KbzBank);
        assert_eq!(
            serde_json::to_string(&Brand::PremiumBank).unwrap(),
            "\"premium-bank\""
        );
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("MM".parse::<TypographyLocale>(), Ok(TypographyLocale::Myanmar));
        assert_eq!("latin".parse::<TypographyLocale>(), Ok(TypographyLocale::Latin));
        assert!("fr".parse::<TypographyLocale>().is_err());
    }
}
