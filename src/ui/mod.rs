//! Server-rendered pages
//!
//! Page bodies are rendered from handlebars templates and then wrapped in one
//! of three layouts: the public layout (sidebar, brand switcher, theme toggle),
//! the admin layout (admin navigation) or the bare layout used by sign-in and
//! setup pages.

use chrono::DateTime;
use ds_types::{Brand, Category};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::auth::AdminUser;
use crate::error::Result;
use crate::tokens::all_brands_stylesheet;

pub mod views;

pub use views::{ActiveNav, SidebarView};

/// Stylesheet served at `/assets/site.css`
pub const SITE_CSS: &str = include_str!("../../templates/assets/site.css");

/// Script served at `/assets/site.js`
pub const SITE_JS: &str = include_str!("../../templates/assets/site.js");

const TEMPLATES: [(&str, &str); 12] = [
    ("layout", include_str!("../../templates/layout.hbs")),
    ("admin_layout", include_str!("../../templates/admin_layout.hbs")),
    ("bare_layout", include_str!("../../templates/bare_layout.hbs")),
    ("gallery", include_str!("../../templates/gallery.hbs")),
    ("component_detail", include_str!("../../templates/component_detail.hbs")),
    ("tokens", include_str!("../../templates/tokens.hbs")),
    ("not_found", include_str!("../../templates/not_found.hbs")),
    ("admin_login", include_str!("../../templates/admin_login.hbs")),
    ("admin_dashboard", include_str!("../../templates/admin_dashboard.hbs")),
    ("admin_form", include_str!("../../templates/admin_form.hbs")),
    ("admin_setup", include_str!("../../templates/admin_setup.hbs")),
    ("env_setup", include_str!("../../templates/env_setup.hbs")),
];

/// Public-page chrome
#[derive(Debug, Clone)]
pub struct PublicChrome {
    pub title: String,
    pub brand: Brand,
    pub path: String,
    pub sidebar: SidebarView,
}

/// Highlighted entry of the admin navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminNav {
    Dashboard,
    NewComponent,
    Nothing,
}

/// Template registry plus the layouts around it
pub struct PageRenderer {
    registry: Handlebars<'static>,
    brand_css: String,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();

        // Register helpers
        registry.register_helper("badge_tone", Box::new(badge_tone_helper));
        registry.register_helper("plural", Box::new(plural_helper));
        registry.register_helper("short_date", Box::new(short_date_helper));
        registry.register_helper("numeric_date", Box::new(numeric_date_helper));
        registry.register_helper("min", Box::new(min_helper));

        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self {
            registry,
            brand_css: all_brands_stylesheet(),
        })
    }

    /// Render one template without a layout
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        Ok(self.registry.render(template, data)?)
    }

    pub fn public_page<T: Serialize>(
        &self,
        chrome: &PublicChrome,
        template: &str,
        data: &T,
    ) -> Result<String> {
        let body = self.render(template, data)?;
        self.render(
            "layout",
            &json!({
                "title": chrome.title,
                "brand": chrome.brand.slug(),
                "brands": views::brand_options(chrome.brand),
                "path": chrome.path,
                "sidebar": chrome.sidebar,
                "brand_css": self.brand_css,
                "body": body,
            }),
        )
    }

    pub fn admin_page<T: Serialize>(
        &self,
        title: &str,
        admin: &AdminUser,
        nav: AdminNav,
        template: &str,
        data: &T,
    ) -> Result<String> {
        let body = self.render(template, data)?;
        self.render(
            "admin_layout",
            &json!({
                "title": title,
                "admin_email": admin.email,
                "dashboard_active": nav == AdminNav::Dashboard,
                "new_active": nav == AdminNav::NewComponent,
                "brand_css": self.brand_css,
                "body": body,
            }),
        )
    }

    pub fn bare_page<T: Serialize>(&self, title: &str, template: &str, data: &T) -> Result<String> {
        let body = self.render(template, data)?;
        self.render(
            "bare_layout",
            &json!({
                "title": title,
                "brand_css": self.brand_css,
                "body": body,
            }),
        )
    }
}

// Handlebars helpers

fn badge_tone_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    let tone = param
        .parse::<Category>()
        .map(|c| c.badge_tone())
        .unwrap_or("neutral");
    out.write(tone)?;
    Ok(())
}

/// `{{plural 3 "component"}}` writes `3 components`
fn plural_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let count = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    let noun = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");
    let suffix = if count == 1 { "" } else { "s" };
    out.write(&format!("{} {}{}", count, noun, suffix))?;
    Ok(())
}

fn write_date(
    h: &handlebars::Helper,
    out: &mut dyn handlebars::Output,
    format: &str,
) -> handlebars::HelperResult {
    let raw = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => out.write(&date.format(format).to_string())?,
        Err(_) => out.write(raw)?,
    }
    Ok(())
}

/// `Mar 4, 2025`
fn short_date_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    write_date(h, out, "%b %-d, %Y")
}

/// `3/4/2025`
fn numeric_date_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    write_date(h, out, "%-m/%-d/%Y")
}

fn min_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let a = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    let b = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(a);
    out.write(&a.min(b).to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> PageRenderer {
        PageRenderer::new().unwrap()
    }

    #[test]
    fn test_all_templates_register() {
        let pages = renderer();
        assert!(pages.brand_css.contains("[data-brand=\"kbz-pay\"]"));
    }

    #[test]
    fn test_helpers() {
        let pages = renderer();
        let out = pages
            .registry
            .render_template(
                "{{plural one \"item\"}}|{{plural many \"item\"}}|{{badge_tone cat}}|{{min big 36}}",
                &json!({ "one": 1, "many": 4, "cat": "Atoms", "big": 56 }),
            )
            .unwrap();
        assert_eq!(out, format!("1 item|4 items|{}|36", Category::Atoms.badge_tone()));
    }

    #[test]
    fn test_date_helpers() {
        let pages = renderer();
        let out = pages
            .registry
            .render_template(
                "{{short_date d}} / {{numeric_date d}}",
                &json!({ "d": "2025-03-04T10:00:00Z" }),
            )
            .unwrap();
        assert_eq!(out, "Mar 4, 2025 / 3/4/2025");
    }

    #[test]
    fn test_bare_page_wraps_body() {
        let pages = renderer();
        let html = pages
            .bare_page("Sign in", "admin_login", &views::LoginView::default())
            .unwrap();
        assert!(html.contains("<title>Sign in"));
        assert!(html.contains("Sign in to manage your design system"));
    }
}
