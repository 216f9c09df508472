//! Numeric tokens shared across all brands, in px

use serde::Serialize;

pub type Scale = &'static [(&'static str, u32)];

pub const SPACING: Scale = &[
    ("0", 0),
    ("1", 4),
    ("2", 8),
    ("3", 12),
    ("4", 16),
    ("5", 20),
    ("6", 24),
    ("7", 28),
    ("8", 32),
    ("9", 36),
];

pub const SIZE: Scale = &[
    ("0", 0),
    ("1", 8),
    ("2", 12),
    ("3", 16),
    ("4", 24),
    ("5", 28),
    ("6", 32),
    ("7", 44),
    ("8", 48),
    ("9", 56),
];

pub const RADIUS_FULL: u32 = 9999;

pub const BORDER_RADIUS: Scale = &[
    ("0", 0),
    ("1", 4),
    ("2", 8),
    ("3", 12),
    ("4", 16),
    ("5", 20),
    ("6", 24),
    ("full", RADIUS_FULL),
];

pub const ELEVATION: Scale = &[
    ("0", 0),
    ("1", 1),
    ("2", 2),
    ("3", 3),
    ("4", 4),
    ("5", 7),
    ("6", 16),
];

pub const SEMANTIC_SPACING: Scale = &[("xs", 4), ("sm", 8), ("md", 12), ("lg", 16), ("xl", 24)];

pub const SEMANTIC_RADIUS: Scale = &[("sm", 4), ("md", 8), ("lg", 16), ("full", RADIUS_FULL)];

pub const ICON_SIZE: Scale = &[("xs", 8), ("sm", 16), ("md", 24), ("lg", 28)];

pub const AVATAR_SIZE: Scale = &[("sm", 24), ("md", 28), ("lg", 32)];

/// Look up a value by key in a scale
pub fn value(scale: Scale, key: &str) -> Option<u32> {
    scale.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Composite shadow built from elevation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shadow {
    pub name: &'static str,
    pub x: u32,
    pub y: u32,
    pub blur: u32,
}

impl Shadow {
    /// Offsets only, e.g. `1px 2px 7px`
    pub fn offsets(&self) -> String {
        format!("{}px {}px {}px", self.x, self.y, self.blur)
    }

    /// `box-shadow` value with the sample tint
    pub fn css(&self) -> String {
        format!("{} rgba(0,44,118,0.15)", self.offsets())
    }
}

/// sm = elevation 0/1/3, md = 1/2/5, lg = 2/4/6
pub const SHADOWS: [Shadow; 3] = [
    Shadow { name: "sm", x: 0, y: 1, blur: 3 },
    Shadow { name: "md", x: 1, y: 2, blur: 7 },
    Shadow { name: "lg", x: 2, y: 4, blur: 16 },
];

/// How the tokens page previews a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenVisual {
    Bar,
    Box,
    Radius,
    Shadow,
}

/// One named numeric token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub name: String,
    pub value: u32,
    pub unit: &'static str,
}

impl Token {
    /// `var(--name)` reference
    pub fn var(&self) -> String {
        format!("var(--{})", self.name)
    }
}

/// A labelled group of numeric tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGroup {
    pub label: &'static str,
    pub description: &'static str,
    pub visual: TokenVisual,
    pub tokens: Vec<Token>,
}

fn group(
    label: &'static str,
    description: &'static str,
    prefix: &str,
    visual: TokenVisual,
    scale: Scale,
) -> TokenGroup {
    TokenGroup {
        label,
        description,
        visual,
        tokens: scale
            .iter()
            .map(|(key, value)| Token {
                name: format!("{}-{}", prefix, key),
                value: *value,
                unit: "px",
            })
            .collect(),
    }
}

/// Every numeric token group in display order
pub fn token_groups() -> Vec<TokenGroup> {
    vec![
        group("Spacing", "Base spacing scale - 4px grid", "spacing", TokenVisual::Bar, SPACING),
        group(
            "Size",
            "Component size scale - used for icons, avatars, touch targets",
            "size",
            TokenVisual::Box,
            SIZE,
        ),
        group(
            "Border Radius",
            "Corner radius tokens from sharp to pill",
            "radius",
            TokenVisual::Radius,
            BORDER_RADIUS,
        ),
        group(
            "Elevation",
            "Shadow depth levels - maps to shadow x/y/blur offsets",
            "elevation",
            TokenVisual::Shadow,
            ELEVATION,
        ),
        group(
            "Semantic Spacing",
            "Named aliases for common spacing needs",
            "spacing",
            TokenVisual::Bar,
            SEMANTIC_SPACING,
        ),
        group(
            "Semantic Radius",
            "Named aliases for common radius needs",
            "radius",
            TokenVisual::Radius,
            SEMANTIC_RADIUS,
        ),
        group("Icon Sizes", "Standardised icon dimensions", "icon", TokenVisual::Box, ICON_SIZE),
        group(
            "Avatar Sizes",
            "Standardised avatar dimensions",
            "avatar",
            TokenVisual::Box,
            AVATAR_SIZE,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_aliases_follow_primitives() {
        assert_eq!(value(SEMANTIC_SPACING, "xs"), value(SPACING, "1"));
        assert_eq!(value(SEMANTIC_SPACING, "xl"), value(SPACING, "6"));
        assert_eq!(value(SEMANTIC_RADIUS, "lg"), value(BORDER_RADIUS, "4"));
        assert_eq!(value(ICON_SIZE, "lg"), value(SIZE, "5"));
        assert_eq!(value(AVATAR_SIZE, "lg"), value(SIZE, "6"));
    }

    #[test]
    fn test_shadows_follow_elevation() {
        let md = SHADOWS[1];
        assert_eq!(Some(md.x), value(ELEVATION, "1"));
        assert_eq!(Some(md.y), value(ELEVATION, "2"));
        assert_eq!(Some(md.blur), value(ELEVATION, "5"));
        assert_eq!(md.offsets(), "1px 2px 7px");
    }

    #[test]
    fn test_token_groups() {
        let groups = token_groups();
        let labels: Vec<_> = groups.iter().map(|g| g.label).collect();
        assert_eq!(
            labels,
            vec![
                "Spacing",
                "Size",
                "Border Radius",
                "Elevation",
                "Semantic Spacing",
                "Semantic Radius",
                "Icon Sizes",
                "Avatar Sizes"
            ]
        );
        let radius = &groups[2];
        let last = radius.tokens.last().unwrap();
        assert_eq!(last.name, "radius-full");
        assert_eq!(last.value, 9999);
        assert_eq!(last.var(), "var(--radius-full)");
    }
}
