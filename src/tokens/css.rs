//! CSS custom properties generated from the token set

use std::fmt::Write;

use ds_types::{Brand, TypographyLocale};

use super::colors::{brand_font, brand_palette, ALPHA, SEMANTIC_COLORS};
use super::scales::{token_groups, SHADOWS};
use super::typography::{styles, LINE_HEIGHT_PCT};

/// Every custom property for `brand`, as `(name, value)` pairs with the
/// leading `--` included in the name
pub fn css_variables(brand: Brand) -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = Vec::new();
    let mut push = |name: String, value: String| {
        if !vars.iter().any(|(n, _)| *n == name) {
            vars.push((name, value));
        }
    };

    let palette = brand_palette(brand);
    for (step, hex) in palette.primary.entries() {
        push(format!("--color-primary-{}", step), hex.to_string());
    }
    for (step, hex) in palette.secondary.entries() {
        push(format!("--color-secondary-{}", step), hex.to_string());
    }
    for color in SEMANTIC_COLORS.iter() {
        let prefix = color.prefix();
        for (step, hex) in color.scale.entries() {
            push(format!("--{}-{}", prefix, step), hex.to_string());
        }
    }
    for (step, value) in ALPHA.entries() {
        push(format!("--color-alpha-{}", step), value.to_string());
    }

    for group in token_groups() {
        for token in group.tokens {
            push(format!("--{}", token.name), format!("{}{}", token.value, token.unit));
        }
    }
    for shadow in SHADOWS.iter() {
        push(format!("--shadow-{}", shadow.name), shadow.css());
    }

    for style in styles(TypographyLocale::Latin) {
        push(style.css_var(), format!("{}px", style.font_size));
        push(
            format!("--line-height-{}", style.key),
            format!("{}px", style.line_height),
        );
    }
    push("--line-height-pct".to_string(), LINE_HEIGHT_PCT.to_string());

    let font = brand_font(brand);
    push(
        "--font-sans".to_string(),
        format!(
            "var({}, '{}'), ui-sans-serif, system-ui, sans-serif",
            font.css_var, font.name
        ),
    );

    vars
}

/// A rule block declaring every variable of `brand` under `selector`
pub fn stylesheet(brand: Brand, selector: &str) -> String {
    let mut css = String::new();
    let _ = writeln!(css, "{} {{", selector);
    for (name, value) in css_variables(brand) {
        let _ = writeln!(css, "  {}: {};", name, value);
    }
    css.push_str("}\n");
    css
}

/// Stylesheet for every brand keyed by `[data-brand]`, with the default
/// brand also bound to `:root`
pub fn all_brands_stylesheet() -> String {
    let mut css = stylesheet(Brand::default(), ":root");
    for brand in Brand::ALL {
        css.push_str(&stylesheet(brand, &format!("[data-brand=\"{}\"]", brand.slug())));
    }
    css
}
