//! WCAG AA compliance tests for theme color contrast ratios
//!
//! Validates that both themes meet accessibility standards:
//! - Text/background: ≥4.5:1 (WCAG AA for normal text)
//! - Borders, item fills, item labels: ≥3.0:1 (WCAG AA for UI components)

use blockfall::theme::{ColorScheme, Theme};
use ratatui::style::Color;

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        other => panic!("theme colors must be RGB, got {other:?}"),
    }
}

/// Calculate relative luminance for sRGB color (WCAG formula)
fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = rgb(color);
    let channel = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Calculate contrast ratio between two colors (WCAG formula)
fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

fn schemes() -> [(Theme, ColorScheme); 2] {
    [
        (Theme::Dark, Theme::Dark.colors()),
        (Theme::Light, Theme::Light.colors()),
    ]
}

#[test]
fn text_on_background_meets_wcag_aa() {
    for (theme, c) in schemes() {
        let contrast = contrast_ratio(c.text, c.background);
        assert!(
            contrast >= 4.5,
            "{theme}: text/background contrast {contrast:.2}:1 fails WCAG AA (need ≥4.5:1)"
        );

        let dim = contrast_ratio(c.text_dim, c.background);
        assert!(
            dim >= 4.5,
            "{theme}: text dim/background contrast {dim:.2}:1 fails WCAG AA (need ≥4.5:1)"
        );
    }
}

#[test]
fn borders_meet_wcag_aa_ui() {
    for (theme, c) in schemes() {
        for (name, color) in [
            ("focus border", c.focus_border),
            ("unfocused border", c.unfocused_border),
            ("selection", c.selection),
            ("toast", c.toast_success),
        ] {
            let contrast = contrast_ratio(color, c.background);
            assert!(
                contrast >= 3.0,
                "{theme}: {name} contrast {contrast:.2}:1 fails WCAG AA for UI components"
            );
        }
    }
}

#[test]
fn item_labels_readable_across_heat_ramp() {
    for (theme, c) in schemes() {
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let fill = c.heat(t);
            let contrast = contrast_ratio(c.item_label, fill);
            assert!(
                contrast >= 3.0,
                "{theme}: label on heat({t}) contrast {contrast:.2}:1 too low"
            );
        }
    }
}

#[test]
fn heat_endpoints_stand_out_from_background() {
    for (theme, c) in schemes() {
        assert!(contrast_ratio(c.heat_cold, c.background) >= 3.0, "{theme}: cold fill");
        assert!(contrast_ratio(c.heat_hot, c.background) >= 3.0, "{theme}: hot fill");
    }
}
