//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, VenueConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use seathold::config::{Config, ConfigMerger};
///
/// let low = Config { hold_timeout_ms: Some(100), ..Default::default() };
/// let high = Config { hold_timeout_ms: Some(200), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.hold_timeout_ms, Some(200));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given lowest precedence first, on top of `base`.
    #[must_use]
    pub fn merge(base: Config, sources: &[ConfigSource]) -> Config {
        let mut result = base;
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Fields set in `source` win; the venue section merges field by field so
    /// a layer can change rows without restating cols.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(source_venue) = source.venue {
            target.venue = Some(match target.venue {
                Some(target_venue) => Self::merge_venue(target_venue, source_venue),
                None => source_venue,
            });
        }

        if source.hold_timeout_ms.is_some() {
            target.hold_timeout_ms = source.hold_timeout_ms;
        }

        if source.log_mode.is_some() {
            target.log_mode.clone_from(&source.log_mode);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }

    fn merge_venue(target: VenueConfig, source: VenueConfig) -> VenueConfig {
        VenueConfig {
            rows: source.rows.or(target.rows),
            cols: source.cols.or(target.cols),
        }
    }
}
