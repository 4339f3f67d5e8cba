use std::sync::Arc;

use shade_theme::{
    ColorMode, FixedAmbient, Polarity, ScopeOptions, SimulatedAmbient, Theme, ThemeScope,
};

fn sample_theme() -> Theme {
    Theme::from_toml_str(
        r##"
        [colors]
        text = "black"

        [color_schemes.dark.colors]
        text = "white"

        [color_schemes.dark_dimmed.colors]
        text = "#d1d7e0"
        "##,
    )
    .unwrap()
}

fn day_root(theme: Theme) -> ThemeScope {
    ThemeScope::root(
        ScopeOptions::new().with_theme(theme),
        Arc::new(FixedAmbient::unsupported()),
    )
}

#[test]
fn descendant_without_theme_sees_ancestor_colors_exactly() {
    let ancestor = day_root(sample_theme());
    let descendant = ancestor.nested(ScopeOptions::new().with_theme(Theme::new()));

    assert_eq!(
        descendant.resolved_theme().get_str("colors.text"),
        Some("black")
    );
}

#[test]
fn descendant_without_mode_follows_a_night_ancestor() {
    let ancestor = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Night),
        Arc::new(FixedAmbient::unsupported()),
    );
    let descendant = ancestor.nested(ScopeOptions::new());

    assert_eq!(descendant.polarity(), Polarity::Night);
    assert_eq!(descendant.scheme_name(), "dark");
    assert_eq!(
        descendant.resolved_theme().get_str("colors.text"),
        Some("white")
    );
}

#[test]
fn set_color_mode_flips_resolved_colors_synchronously() {
    let scope = day_root(sample_theme());
    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("black"));

    scope.context().set_color_mode(ColorMode::Night);

    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("white"));
}

#[test]
fn ambient_flip_under_auto_rerenders_without_any_call() {
    let ambient = SimulatedAmbient::new(false);
    let scope = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Auto),
        Arc::new(ambient.clone()),
    );
    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("black"));

    ambient.set_prefers_dark(true);

    assert_eq!(scope.polarity(), Polarity::Night);
    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("white"));
}

#[test]
fn day_scheme_override_beats_the_light_default() {
    let scope = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Day)
            .with_day_scheme("dark"),
        Arc::new(FixedAmbient::unsupported()),
    );

    assert_eq!(scope.polarity(), Polarity::Day);
    assert_eq!(scope.scheme_name(), "dark");
    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("white"));
}

#[test]
fn night_scheme_override_selects_the_dimmed_variant() {
    let scope = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Night)
            .with_night_scheme("dark_dimmed"),
        Arc::new(FixedAmbient::unsupported()),
    );

    assert_eq!(
        scope.resolved_theme().get_str("colors.text"),
        Some("#d1d7e0")
    );
}

#[test]
fn unknown_scheme_falls_back_to_the_base_theme() {
    let scope = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_night_scheme("nonexistent")
            .with_color_mode(ColorMode::Night),
        Arc::new(FixedAmbient::unsupported()),
    );

    assert_eq!(scope.resolved_theme().get_str("colors.text"), Some("black"));
}

#[test]
fn scheme_overrides_inherit_by_substitution() {
    let ambient = SimulatedAmbient::new(false);
    let ancestor = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Auto)
            .with_night_scheme("dark_dimmed"),
        Arc::new(ambient.clone()),
    );
    let descendant = ancestor.nested(ScopeOptions::new());

    ambient.set_prefers_dark(true);

    assert_eq!(descendant.scheme_name(), "dark_dimmed");
    assert_eq!(
        descendant.resolved_theme().get_str("colors.text"),
        Some("#d1d7e0")
    );
}

#[test]
fn forked_nested_state_receives_ambient_changes_at_its_own_layer() {
    let ambient = SimulatedAmbient::new(false);
    let ancestor = ThemeScope::root(
        ScopeOptions::new()
            .with_theme(sample_theme())
            .with_color_mode(ColorMode::Auto),
        Arc::new(ambient.clone()),
    );
    // no own mode: forks an auto machine seeded from the ancestor
    let descendant = ancestor.nested(ScopeOptions::new());

    // the descendant pins itself to day; the ancestor stays on auto
    descendant.set_color_mode(ColorMode::Day);
    ambient.set_prefers_dark(true);

    assert_eq!(ancestor.polarity(), Polarity::Night);
    assert_eq!(descendant.polarity(), Polarity::Day);
}

#[test]
fn change_notifications_fire_once_per_transition() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let scope = day_root(sample_theme());
    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&notifications);
    let guard = scope.on_change(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    scope.set_color_mode(ColorMode::Night);
    scope.set_color_mode(ColorMode::Night);
    scope.set_color_mode(ColorMode::Day);
    assert_eq!(notifications.load(Ordering::SeqCst), 2);

    drop(guard);
    scope.set_color_mode(ColorMode::Night);
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[test]
fn deep_nesting_composes_theme_overrides_in_order() {
    let root = day_root(sample_theme());
    let middle = root.nested(
        ScopeOptions::new()
            .with_theme(Theme::from_toml_str("[colors]\naccent = \"blue\"\n").unwrap()),
    );
    let leaf = middle.nested(
        ScopeOptions::new()
            .with_theme(Theme::from_toml_str("[colors]\naccent = \"teal\"\n").unwrap()),
    );

    let resolved = leaf.resolved_theme();
    assert_eq!(resolved.get_str("colors.text"), Some("black"));
    assert_eq!(resolved.get_str("colors.accent"), Some("teal"));
    assert_eq!(
        middle.resolved_theme().get_str("colors.accent"),
        Some("blue")
    );
}

#[test]
fn variable_map_reflects_the_active_scheme() {
    let scope = day_root(sample_theme());
    assert_eq!(scope.resolved_theme().to_variable_map()["colors.text"], "black");

    scope.set_color_mode(ColorMode::Night);
    assert_eq!(scope.resolved_theme().to_variable_map()["colors.text"], "white");
}
