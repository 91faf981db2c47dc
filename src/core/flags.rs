//! core::flags
//!
//! Flag catalog, per-project overrides, and flag resolution.
//!
//! # Resolution
//!
//! The flags passed to a launch come from three places:
//!
//! 1. The built-in catalog ([`BUILT_IN_FLAGS`]), whose on/off default lives in
//!    [`GlobalSettings::global_flags`]
//! 2. User-defined custom flags ([`GlobalSettings::custom_flags`]), on by default
//! 3. Per-project [`FlagOverrides`], which force a flag on or off
//!
//! For every catalog entry an explicit override wins, otherwise the entry's
//! default applies. Output order is catalog order: global flags in the order
//! they appear in settings, then custom flags in declaration order. Override
//! keys that name no catalog entry are never emitted.
//!
//! # Example
//!
//! ```
//! use launchdeck::core::flags::{resolve, FlagOverrides, FlagState};
//! use launchdeck::core::settings::{GlobalFlagState, GlobalSettings};
//!
//! let settings = GlobalSettings {
//!     global_flags: vec![
//!         GlobalFlagState::new("--verbose", true),
//!         GlobalFlagState::new("--dangerously-skip-permissions", false),
//!     ],
//!     custom_flags: vec!["--foo".to_string()],
//!     ..Default::default()
//! };
//!
//! let mut overrides = FlagOverrides::new();
//! overrides.set("--dangerously-skip-permissions", FlagState::On);
//! overrides.set("--foo", FlagState::Off);
//!
//! assert_eq!(
//!     resolve(&settings, &overrides),
//!     vec!["--verbose", "--dangerously-skip-permissions"],
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::settings::GlobalSettings;

/// Human-readable metadata for a built-in flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Flags the launcher knows about out of the box.
pub const BUILT_IN_FLAGS: &[FlagDefinition] = &[
    FlagDefinition {
        name: "--dangerously-skip-permissions",
        label: "Skip Permissions",
        description: "Skip the permission prompt for tool use (use with caution)",
    },
    FlagDefinition {
        name: "--verbose",
        label: "Verbose Output",
        description: "Enable verbose logging output",
    },
];

/// Look up a built-in flag definition by name.
pub fn definition(name: &str) -> Option<&'static FlagDefinition> {
    BUILT_IN_FLAGS.iter().find(|def| def.name == name)
}

/// Per-project override state of a single flag.
///
/// Toggling cycles `Global -> On -> Off -> Global`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlagState {
    /// No override; the global default applies.
    #[default]
    Global,
    /// Forced on for this project.
    On,
    /// Forced off for this project.
    Off,
}

impl FlagState {
    /// The state after one toggle.
    pub fn next(self) -> Self {
        match self {
            FlagState::Global => FlagState::On,
            FlagState::On => FlagState::Off,
            FlagState::Off => FlagState::Global,
        }
    }

    /// Build from the persisted optional-boolean form.
    pub fn from_override(value: Option<bool>) -> Self {
        match value {
            None => FlagState::Global,
            Some(true) => FlagState::On,
            Some(false) => FlagState::Off,
        }
    }

    /// Convert to the persisted optional-boolean form.
    pub fn as_override(self) -> Option<bool> {
        match self {
            FlagState::Global => None,
            FlagState::On => Some(true),
            FlagState::Off => Some(false),
        }
    }

    /// Apply this state on top of a default.
    pub fn apply(self, default: bool) -> bool {
        self.as_override().unwrap_or(default)
    }
}

impl fmt::Display for FlagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagState::Global => "global",
            FlagState::On => "on",
            FlagState::Off => "off",
        };
        f.write_str(s)
    }
}

impl FromStr for FlagState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" | "default" | "inherit" => Ok(FlagState::Global),
            "on" | "true" => Ok(FlagState::On),
            "off" | "false" => Ok(FlagState::Off),
            other => Err(format!(
                "invalid flag state '{}', must be one of: global, on, off",
                other
            )),
        }
    }
}

/// Per-project flag overrides.
///
/// Only `On` and `Off` are stored; `Global` is represented by the key being
/// absent. The persisted form is a JSON object of flag name to boolean, and
/// `null` values written by older releases read back as absent.
///
/// Keys are not validated against the catalog. Unknown keys are harmless to
/// resolution and can be removed with [`FlagOverrides::prune`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides(IndexMap<String, bool>);

impl FlagOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a flag.
    pub fn get(&self, name: &str) -> FlagState {
        FlagState::from_override(self.0.get(name).copied())
    }

    /// Set a flag's state. `Global` removes the key.
    pub fn set(&mut self, name: &str, state: FlagState) {
        match state.as_override() {
            Some(value) => {
                self.0.insert(name.to_string(), value);
            }
            None => {
                self.0.shift_remove(name);
            }
        }
    }

    /// Advance a flag one step through the toggle cycle and return the new state.
    pub fn cycle(&mut self, name: &str) -> FlagState {
        let next = self.get(name).next();
        self.set(name, next);
        next
    }

    /// Remove keys that name neither a global nor a custom flag.
    ///
    /// Returns the removed keys in their original order.
    pub fn prune(&mut self, settings: &GlobalSettings) -> Vec<String> {
        let catalog = FlagCatalog::from_settings(settings);
        let stale: Vec<String> = self
            .0
            .keys()
            .filter(|name| !catalog.contains(name))
            .cloned()
            .collect();
        for name in &stale {
            self.0.shift_remove(name);
        }
        stale
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over explicit overrides.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FlagState)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), FlagState::from_override(Some(*value))))
    }
}

impl Serialize for FlagOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlagOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Option<bool>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v)))
                .collect(),
        ))
    }
}

/// Where a catalog entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    /// A built-in flag with a global on/off default.
    Global { enabled: bool },
    /// A user-defined flag, on unless overridden.
    Custom,
}

impl FlagSource {
    /// Value used when no override is present.
    pub fn default_enabled(self) -> bool {
        match self {
            FlagSource::Global { enabled } => enabled,
            FlagSource::Custom => true,
        }
    }
}

/// Ordered catalog of every flag a launch can emit.
///
/// Iteration order is declaration order. A custom flag sharing a name with a
/// global flag is folded into the global entry so no name is emitted twice.
#[derive(Debug, Clone, Default)]
pub struct FlagCatalog(IndexMap<String, FlagSource>);

impl FlagCatalog {
    pub fn from_settings(settings: &GlobalSettings) -> Self {
        let mut entries = IndexMap::new();
        for gf in &settings.global_flags {
            entries
                .entry(gf.flag_name.clone())
                .or_insert(FlagSource::Global {
                    enabled: gf.enabled,
                });
        }
        for custom in &settings.custom_flags {
            entries.entry(custom.clone()).or_insert(FlagSource::Custom);
        }
        Self(entries)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn source(&self, name: &str) -> Option<FlagSource> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FlagSource)> {
        self.0.iter().map(|(name, source)| (name.as_str(), *source))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolution outcome for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFlag {
    pub name: String,
    pub source: FlagSource,
    pub state: FlagState,
    pub enabled: bool,
}

/// Resolve every catalog entry, keeping disabled ones.
///
/// Used to show why a flag is or is not part of a launch.
pub fn explain(settings: &GlobalSettings, overrides: &FlagOverrides) -> Vec<ResolvedFlag> {
    FlagCatalog::from_settings(settings)
        .iter()
        .map(|(name, source)| {
            let state = overrides.get(name);
            ResolvedFlag {
                name: name.to_string(),
                source,
                state,
                enabled: state.apply(source.default_enabled()),
            }
        })
        .collect()
}

/// Compute the ordered flags to pass to a launch.
pub fn resolve(settings: &GlobalSettings, overrides: &FlagOverrides) -> Vec<String> {
    explain(settings, overrides)
        .into_iter()
        .filter(|flag| flag.enabled)
        .map(|flag| flag.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::GlobalFlagState;

    fn settings(globals: &[(&str, bool)], customs: &[&str]) -> GlobalSettings {
        GlobalSettings {
            global_flags: globals
                .iter()
                .map(|(name, enabled)| GlobalFlagState::new(*name, *enabled))
                .collect(),
            custom_flags: customs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn empty_overrides_use_defaults() {
            let s = settings(
                &[("--a", true), ("--b", false), ("--c", true)],
                &["--x", "--y"],
            );
            assert_eq!(
                resolve(&s, &FlagOverrides::new()),
                vec!["--a", "--c", "--x", "--y"]
            );
        }

        #[test]
        fn mixed_overrides() {
            let s = settings(
                &[("--verbose", true), ("--dangerously-skip-permissions", false)],
                &["--foo"],
            );
            let mut o = FlagOverrides::new();
            o.set("--dangerously-skip-permissions", FlagState::On);
            o.set("--foo", FlagState::Off);

            assert_eq!(
                resolve(&s, &o),
                vec!["--verbose", "--dangerously-skip-permissions"]
            );
        }

        #[test]
        fn custom_only() {
            let s = settings(&[], &["--a", "--b"]);
            assert_eq!(resolve(&s, &FlagOverrides::new()), vec!["--a", "--b"]);
        }

        #[test]
        fn override_off_beats_enabled_global() {
            let s = settings(&[("--verbose", true)], &[]);
            let mut o = FlagOverrides::new();
            o.set("--verbose", FlagState::Off);
            assert!(resolve(&s, &o).is_empty());
        }

        #[test]
        fn override_on_beats_disabled_global() {
            let s = settings(&[("--verbose", false)], &[]);
            let mut o = FlagOverrides::new();
            o.set("--verbose", FlagState::On);
            assert_eq!(resolve(&s, &o), vec!["--verbose"]);
        }

        #[test]
        fn unknown_override_never_emitted() {
            let s = settings(&[("--verbose", false)], &["--foo"]);
            let mut o = FlagOverrides::new();
            o.set("--ghost", FlagState::On);
            assert_eq!(resolve(&s, &o), vec!["--foo"]);
        }

        #[test]
        fn order_ignores_override_insertion_order() {
            let s = settings(&[("--a", false), ("--b", false)], &["--c", "--d"]);
            let mut o = FlagOverrides::new();
            o.set("--d", FlagState::On);
            o.set("--b", FlagState::On);
            o.set("--a", FlagState::On);
            assert_eq!(resolve(&s, &o), vec!["--a", "--b", "--c", "--d"]);
        }

        #[test]
        fn custom_duplicate_of_global_emitted_once() {
            let s = settings(&[("--verbose", false)], &["--verbose", "--x"]);
            assert_eq!(resolve(&s, &FlagOverrides::new()), vec!["--x"]);

            let mut o = FlagOverrides::new();
            o.set("--verbose", FlagState::On);
            assert_eq!(resolve(&s, &o), vec!["--verbose", "--x"]);
        }

        #[test]
        fn explain_keeps_disabled_entries() {
            let s = settings(&[("--a", false)], &["--b"]);
            let mut o = FlagOverrides::new();
            o.set("--b", FlagState::Off);

            let report = explain(&s, &o);
            assert_eq!(report.len(), 2);
            assert_eq!(report[0].source, FlagSource::Global { enabled: false });
            assert_eq!(report[0].state, FlagState::Global);
            assert!(!report[0].enabled);
            assert_eq!(report[1].source, FlagSource::Custom);
            assert_eq!(report[1].state, FlagState::Off);
            assert!(!report[1].enabled);
        }
    }

    mod overrides {
        use super::*;

        #[test]
        fn cycle_order() {
            let mut o = FlagOverrides::new();
            assert_eq!(o.cycle("--x"), FlagState::On);
            assert_eq!(o.get("--x"), FlagState::On);
            assert_eq!(o.cycle("--x"), FlagState::Off);
            assert_eq!(o.get("--x"), FlagState::Off);
            assert_eq!(o.cycle("--x"), FlagState::Global);
            assert!(o.is_empty());
        }

        #[test]
        fn three_cycles_restore_map() {
            let mut o = FlagOverrides::new();
            o.set("--a", FlagState::Off);
            o.set("--b", FlagState::On);
            let original = o.clone();

            for name in ["--a", "--b", "--c"] {
                o.cycle(name);
                o.cycle(name);
                o.cycle(name);
                assert_eq!(o, original);
            }
        }

        #[test]
        fn set_global_removes_key() {
            let mut o = FlagOverrides::new();
            o.set("--a", FlagState::On);
            o.set("--a", FlagState::Global);
            assert!(o.is_empty());
        }

        #[test]
        fn prune_removes_unknown_keys() {
            let s = settings(&[("--verbose", false)], &["--foo"]);
            let mut o = FlagOverrides::new();
            o.set("--stale", FlagState::On);
            o.set("--verbose", FlagState::On);
            o.set("--gone", FlagState::Off);
            o.set("--foo", FlagState::Off);

            let removed = o.prune(&s);
            assert_eq!(removed, vec!["--stale", "--gone"]);
            assert_eq!(o.len(), 2);
            assert_eq!(o.get("--verbose"), FlagState::On);
            assert_eq!(o.get("--foo"), FlagState::Off);
        }

        #[test]
        fn json_form_is_optional_bool_map() {
            let mut o = FlagOverrides::new();
            o.set("--a", FlagState::On);
            o.set("--b", FlagState::Off);
            let json = serde_json::to_string(&o).unwrap();
            assert_eq!(json, r#"{"--a":true,"--b":false}"#);
        }

        #[test]
        fn null_reads_back_as_global() {
            let o: FlagOverrides =
                serde_json::from_str(r#"{"--a":null,"--b":false}"#).unwrap();
            assert_eq!(o.get("--a"), FlagState::Global);
            assert_eq!(o.get("--b"), FlagState::Off);
            assert_eq!(o.len(), 1);
        }
    }

    mod state {
        use super::*;

        #[test]
        fn parse_and_display() {
            for state in [FlagState::Global, FlagState::On, FlagState::Off] {
                assert_eq!(state.to_string().parse::<FlagState>().unwrap(), state);
            }
            assert_eq!("TRUE".parse::<FlagState>().unwrap(), FlagState::On);
            assert!("maybe".parse::<FlagState>().is_err());
        }

        #[test]
        fn catalog_lookup() {
            assert_eq!(definition("--verbose").unwrap().label, "Verbose Output");
            assert!(definition("--nope").is_none());
        }
    }
}
