//! Property-based tests for flag resolution.
//!
//! These tests use proptest to verify resolution invariants hold across
//! randomly generated settings and overrides.

use proptest::prelude::*;

use launchdeck::core::flags::{explain, resolve, FlagOverrides, FlagState, BUILT_IN_FLAGS};
use launchdeck::core::settings::GlobalSettings;
use launchdeck::core::types::FlagName;

/// Strategy for generating valid custom flag names.
fn custom_flag() -> impl Strategy<Value = String> {
    "--[a-z][a-z0-9-]{0,12}(=[a-z0-9]{1,6})?"
}

fn flag_state() -> impl Strategy<Value = FlagState> {
    prop_oneof![
        Just(FlagState::Global),
        Just(FlagState::On),
        Just(FlagState::Off),
    ]
}

/// Settings with random global defaults and up to five custom flags.
fn settings() -> impl Strategy<Value = GlobalSettings> {
    (
        prop::collection::vec(any::<bool>(), BUILT_IN_FLAGS.len()),
        prop::collection::vec(custom_flag(), 0..5),
    )
        .prop_map(|(defaults, customs)| {
            let mut settings = GlobalSettings::default();
            for (gf, enabled) in settings.global_flags.iter_mut().zip(defaults) {
                gf.enabled = enabled;
            }
            for flag in customs {
                if BUILT_IN_FLAGS.iter().any(|d| d.name == flag) {
                    continue;
                }
                settings.add_custom_flag(&flag).unwrap();
            }
            settings
        })
}

/// Settings plus overrides over a mix of known and unknown flag names.
fn scenario() -> impl Strategy<Value = (GlobalSettings, FlagOverrides)> {
    settings().prop_flat_map(|settings| {
        let mut names: Vec<String> = BUILT_IN_FLAGS.iter().map(|d| d.name.to_string()).collect();
        names.extend(settings.custom_flags.iter().cloned());
        names.push("--not-in-catalog".to_string());
        names.push("--removed-custom".to_string());

        let names_len = names.len();
        prop::collection::vec((prop::sample::select(names), flag_state()), 0..names_len * 2)
            .prop_map(move |pairs| {
                let mut overrides = FlagOverrides::new();
                for (name, state) in pairs {
                    overrides.set(&name, state);
                }
                (settings.clone(), overrides)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Globals come first in catalog order, then customs in insertion order.
    #[test]
    fn resolution_preserves_catalog_order((settings, overrides) in scenario()) {
        let resolved = resolve(&settings, &overrides);

        let mut catalog: Vec<String> = settings
            .global_flags
            .iter()
            .map(|gf| gf.flag_name.clone())
            .collect();
        for custom in &settings.custom_flags {
            if !catalog.contains(custom) {
                catalog.push(custom.clone());
            }
        }

        let expected: Vec<String> = catalog
            .into_iter()
            .filter(|name| resolved.contains(name))
            .collect();
        prop_assert_eq!(resolved, expected);
    }

    /// A flag is emitted iff its override says on, or there is no override
    /// and its default is on.
    #[test]
    fn override_or_default_decides((settings, overrides) in scenario()) {
        let resolved = resolve(&settings, &overrides);

        for gf in &settings.global_flags {
            let expected = match overrides.get(&gf.flag_name) {
                FlagState::On => true,
                FlagState::Off => false,
                FlagState::Global => gf.enabled,
            };
            prop_assert_eq!(resolved.contains(&gf.flag_name), expected, "{}", gf.flag_name);
        }
        for custom in &settings.custom_flags {
            let expected = overrides.get(custom) != FlagState::Off;
            prop_assert_eq!(resolved.contains(custom), expected, "{}", custom);
        }
    }

    /// Override keys outside the catalog never reach a launch.
    #[test]
    fn unknown_overrides_never_emitted((settings, overrides) in scenario()) {
        let resolved = resolve(&settings, &overrides);
        prop_assert!(!resolved.iter().any(|f| f == "--not-in-catalog"));
        prop_assert!(!resolved.iter().any(|f| f == "--removed-custom"));
    }

    /// Every flag appears at most once and every emitted flag is valid.
    #[test]
    fn emitted_flags_unique_and_valid((settings, overrides) in scenario()) {
        let resolved = resolve(&settings, &overrides);
        for (i, flag) in resolved.iter().enumerate() {
            prop_assert!(FlagName::is_valid(flag), "{}", flag);
            prop_assert!(!resolved[i + 1..].contains(flag), "duplicate {}", flag);
        }
    }

    /// Three cycles of any flag restore the original resolution.
    #[test]
    fn three_cycles_are_identity(
        (settings, overrides) in scenario(),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = explain(&settings, &overrides)
            .into_iter()
            .map(|f| f.name)
            .collect();
        let name = &names[pick.index(names.len())];

        let before = resolve(&settings, &overrides);
        let mut cycled = overrides.clone();
        for _ in 0..3 {
            cycled.cycle(name);
        }
        prop_assert_eq!(cycled.get(name), overrides.get(name));
        prop_assert_eq!(resolve(&settings, &cycled), before);
    }

    /// Pruning changes nothing about the resolved flags.
    #[test]
    fn pruning_preserves_resolution((settings, overrides) in scenario()) {
        let before = resolve(&settings, &overrides);
        let mut pruned = overrides.clone();
        let removed = pruned.prune(&settings);

        prop_assert_eq!(resolve(&settings, &pruned), before);
        prop_assert!(removed.iter().all(|k| k == "--not-in-catalog" || k == "--removed-custom"));
    }

    /// Overrides survive a JSON round trip unchanged.
    #[test]
    fn overrides_persist((_settings, overrides) in scenario()) {
        let json = serde_json::to_string(&overrides).unwrap();
        let back: FlagOverrides = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, overrides);
    }
}
