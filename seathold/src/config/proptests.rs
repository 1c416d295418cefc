//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, VenueConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn venue_strategy() -> impl Strategy<Value = VenueConfig> {
    (
        prop::option::of(1usize..=50),
        prop::option::of(1usize..=50),
    )
        .prop_map(|(rows, cols)| VenueConfig { rows, cols })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(venue_strategy()),
        prop::option::of(1u64..=60_000),
        prop::option::of(prop_oneof![Just("quiet"), Just("normal"), Just("verbose")]),
        prop::option::of(prop_oneof![Just(OutputFormat::Human), Just(OutputFormat::Json)]),
    )
        .prop_map(|(venue, hold_timeout_ms, log_mode, output_format)| Config {
            venue,
            hold_timeout_ms,
            log_mode: log_mode.map(str::to_string),
            output_format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Values set in the higher layer always survive the merge
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        if high.hold_timeout_ms.is_some() {
            prop_assert_eq!(merged.hold_timeout_ms, high.hold_timeout_ms);
        } else {
            prop_assert_eq!(merged.hold_timeout_ms, low.hold_timeout_ms);
        }
        if let Some(rows) = high.venue.and_then(|v| v.rows) {
            prop_assert_eq!(merged.rows(), rows);
        }
        if high.venue.and_then(|v| v.rows).is_none() {
            prop_assert_eq!(merged.rows(), low.rows());
        }
        if high.log_mode.is_some() {
            prop_assert_eq!(&merged.log_mode, &high.log_mode);
        }
    }

    // Merging an empty layer changes nothing
    #[test]
    fn empty_layer_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Valid layers merge into a valid configuration that resolves to settings
    #[test]
    fn valid_layers_resolve(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut merged = Config::defaults();
        ConfigMerger::merge_into(&mut merged, &low);
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());

        let settings = merged.service_settings().unwrap();
        prop_assert_eq!(settings.dimensions().rows, merged.rows());
        prop_assert_eq!(settings.dimensions().cols, merged.cols());
    }

    // YAML serialization preserves every field
    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = config.to_yaml().unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
