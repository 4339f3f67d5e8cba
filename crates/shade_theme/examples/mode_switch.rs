//! Walkthrough of mode switching and ambient tracking.
//!
//! ```bash
//! cargo run -p shade_theme --example mode_switch
//! ```

use std::sync::Arc;

use shade_theme::{ColorMode, ScopeOptions, SimulatedAmbient, ThemeScope};

fn main() {
    let ambient = SimulatedAmbient::new(false);
    let scope = ThemeScope::root(
        ScopeOptions::new().with_color_mode(ColorMode::Auto),
        Arc::new(ambient.clone()),
    );

    let _guard = scope.on_change(|| println!("  (scope changed)"));

    report("initial (auto, ambient light)", &scope);

    ambient.set_prefers_dark(true);
    report("ambient flipped to dark", &scope);

    scope.set_color_mode(ColorMode::Day);
    report("pinned to day", &scope);

    scope.set_color_mode(ColorMode::Night);
    report("pinned to night", &scope);
}

fn report(label: &str, scope: &ThemeScope) {
    let context = scope.context();
    println!(
        "{label}: mode={} polarity={} scheme={} text={:?}",
        context.color_mode(),
        context.polarity(),
        context.scheme_name(),
        context.resolved_theme().get_str("colors.text").unwrap_or("-"),
    );
}
