//! Typography tokens for the Latin and Myanmar locales

use ds_types::TypographyLocale;
use serde::Serialize;

/// Line height as a percentage of font size
pub const LINE_HEIGHT_PCT: &str = "150%";

/// One text style: font size and line height in px
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub group: &'static str,
    pub key: &'static str,
    pub name: &'static str,
    pub font_size: u32,
    pub line_height: u32,
}

impl TextStyle {
    const fn new(
        group: &'static str,
        key: &'static str,
        name: &'static str,
        font_size: u32,
        line_height: u32,
    ) -> Self {
        Self {
            group,
            key,
            name,
            font_size,
            line_height,
        }
    }

    /// CSS variable holding the font size, e.g. `--font-size-body-01`
    pub fn css_var(&self) -> String {
        format!("--font-size-{}", self.key)
    }
}

pub const LATIN: [TextStyle; 17] = [
    TextStyle::new("Display", "display-01", "Display 01", 56, 91),
    TextStyle::new("Display", "display-02", "Display 02", 48, 78),
    TextStyle::new("Header", "h1", "H1", 40, 65),
    TextStyle::new("Header", "h2", "H2", 36, 58),
    TextStyle::new("Header", "h3", "H3", 32, 52),
    TextStyle::new("Header", "h4", "H4", 28, 45),
    TextStyle::new("Header", "h5", "H5", 24, 39),
    TextStyle::new("Header", "h6", "H6", 22, 36),
    TextStyle::new("Title", "title-01", "Title 01", 18, 29),
    TextStyle::new("Title", "title-02", "Title 02", 16, 26),
    TextStyle::new("Body", "body-01", "Body 01", 15, 24),
    TextStyle::new("Body", "body-02", "Body 02", 14, 23),
    TextStyle::new("Label", "label-01", "Label 01", 13, 21),
    TextStyle::new("Label", "label-02", "Label 02", 12, 19),
    TextStyle::new("Label", "label-03", "Label 03", 11, 18),
    TextStyle::new("Overline", "overline-01", "Overline 01", 13, 21),
    TextStyle::new("Overline", "overline-02", "Overline 02", 12, 19),
];

/// Compressed font sizes; line heights match the Latin scale
pub const MYANMAR: [TextStyle; 17] = [
    TextStyle::new("Display", "display-01", "Display 01", 50, 91),
    TextStyle::new("Display", "display-02", "Display 02", 44, 78),
    TextStyle::new("Header", "h1", "H1", 37, 65),
    TextStyle::new("Header", "h2", "H2", 34, 58),
    TextStyle::new("Header", "h3", "H3", 30, 52),
    TextStyle::new("Header", "h4", "H4", 26, 45),
    TextStyle::new("Header", "h5", "H5", 22, 39),
    TextStyle::new("Header", "h6", "H6", 20, 36),
    TextStyle::new("Title", "title-01", "Title 01", 16, 29),
    TextStyle::new("Title", "title-02", "Title 02", 14, 26),
    TextStyle::new("Body", "body-01", "Body 01", 13, 24),
    TextStyle::new("Body", "body-02", "Body 02", 12, 23),
    TextStyle::new("Label", "label-01", "Label 01", 11, 21),
    TextStyle::new("Label", "label-02", "Label 02", 10, 19),
    TextStyle::new("Label", "label-03", "Label 03", 9, 18),
    TextStyle::new("Overline", "overline-01", "Overline 01", 11, 21),
    TextStyle::new("Overline", "overline-02", "Overline 02", 10, 19),
];

pub fn styles(locale: TypographyLocale) -> &'static [TextStyle; 17] {
    match locale {
        TypographyLocale::Latin => &LATIN,
        TypographyLocale::Myanmar => &MYANMAR,
    }
}

/// Text styles sharing a group label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypographyGroup {
    pub label: String,
    pub tokens: Vec<TextStyle>,
}

/// Styles grouped for display; Myanmar labels carry a ` (MM)` suffix
pub fn typography_groups(locale: TypographyLocale) -> Vec<TypographyGroup> {
    let suffix = match locale {
        TypographyLocale::Latin => "",
        TypographyLocale::Myanmar => " (MM)",
    };
    let mut groups: Vec<TypographyGroup> = Vec::new();
    for style in styles(locale) {
        let label = format!("{}{}", style.group, suffix);
        match groups.last_mut() {
            Some(group) if group.label == label => group.tokens.push(*style),
            _ => groups.push(TypographyGroup {
                label,
                tokens: vec![*style],
            }),
        }
    }
    groups
}

/// Myanmar vs Latin font size for one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleComparison {
    pub group: &'static str,
    pub name: &'static str,
    pub myanmar: u32,
    pub latin: u32,
    pub diff: i64,
}

pub fn locale_comparison() -> Vec<LocaleComparison> {
    MYANMAR
        .iter()
        .zip(LATIN.iter())
        .map(|(mm, latin)| LocaleComparison {
            group: mm.group,
            name: mm.name,
            myanmar: mm.font_size,
            latin: latin.font_size,
            diff: i64::from(mm.font_size) - i64::from(latin.font_size),
        })
        .collect()
}
