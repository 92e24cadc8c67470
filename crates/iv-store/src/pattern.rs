//! Wildcard search patterns over storage keys.

use core::fmt;

use iv_core::SignalQuery;

use crate::key::{fan_segment, mode_segment, power_segment, temp_segment, StorageKey, WILDCARD};

/// A storage key in which any subset of segments is replaced by the
/// wildcard marker; derived from a query whose corresponding attributes
/// are unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    segments: Vec<String>,
}

impl SearchPattern {
    pub fn for_query(query: &SignalQuery) -> Self {
        Self {
            segments: vec![
                query
                    .power_on
                    .map(power_segment)
                    .unwrap_or_else(|| WILDCARD.to_string()),
                query
                    .mode
                    .map(mode_segment)
                    .unwrap_or_else(|| WILDCARD.to_string()),
                query
                    .temperature
                    .map(temp_segment)
                    .unwrap_or_else(|| WILDCARD.to_string()),
                query
                    .fan_speed
                    .as_ref()
                    .map(fan_segment)
                    .unwrap_or_else(|| WILDCARD.to_string()),
            ],
        }
    }

    /// Pattern that matches every stored signal.
    pub fn match_all() -> Self {
        SearchPattern::for_query(&SignalQuery::default())
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether `key` satisfies this pattern.
    ///
    /// Keys with a different segment count never match. A wildcard
    /// segment matches anything; a non-wildcard segment matches by
    /// containment, not equality, so `temp_2` also matches `temp_25`.
    /// Partial-segment wildcards (`te*`) are not supported.
    pub fn matches(&self, key: &StorageKey) -> bool {
        let key_segments = key.segments();
        if key_segments.len() != self.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(key_segments)
            .all(|(pattern, segment)| pattern == WILDCARD || segment.contains(pattern.as_str()))
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iv_core::{FanSpeed, Mode, SignalAttrs};

    fn attrs(power_on: bool, mode: Mode, temperature: i32, fan: i32) -> SignalAttrs {
        SignalAttrs {
            power_on,
            mode,
            temperature,
            fan_speed: FanSpeed::Level(fan),
        }
    }

    #[test]
    fn pattern_and_key_always_agree_on_segment_count() {
        let key = StorageKey::for_attrs(&attrs(true, Mode::Cool, 25, 3));
        let queries = [
            SignalQuery::default(),
            SignalQuery {
                power_on: Some(true),
                ..Default::default()
            },
            SignalQuery {
                mode: Some(Mode::Heat),
                fan_speed: Some(FanSpeed::auto()),
                ..Default::default()
            },
            SignalQuery::exact(&attrs(false, Mode::Heat, 18, 1)),
        ];
        for query in queries {
            let pattern = SearchPattern::for_query(&query);
            assert_eq!(pattern.segments().len(), key.segments().len());
        }
    }

    #[test]
    fn wildcards_match_everything() {
        let key = StorageKey::for_attrs(&attrs(false, Mode::Heat, 18, 2));
        assert!(SearchPattern::match_all().matches(&key));
    }

    #[test]
    fn specified_segments_must_be_contained() {
        let key = StorageKey::for_attrs(&attrs(true, Mode::Cool, 25, 3));
        let cool = SearchPattern::for_query(&SignalQuery {
            mode: Some(Mode::Cool),
            ..Default::default()
        });
        assert!(cool.matches(&key));

        let heat = SearchPattern::for_query(&SignalQuery {
            mode: Some(Mode::Heat),
            ..Default::default()
        });
        assert!(!heat.matches(&key));
    }

    #[test]
    fn power_segments_do_not_cross_match() {
        let on = StorageKey::for_attrs(&attrs(true, Mode::Cool, 25, 3));
        let off_pattern = SearchPattern::for_query(&SignalQuery {
            power_on: Some(false),
            ..Default::default()
        });
        assert!(!off_pattern.matches(&on));
    }

    #[test]
    fn containment_matches_across_numeric_boundaries() {
        // Pinned behavior: temp_2 is a substring of temp_25, so a
        // query for 2 degrees also matches 20..=29.
        let key = StorageKey::for_attrs(&attrs(true, Mode::Cool, 25, 3));
        let pattern = SearchPattern::for_query(&SignalQuery {
            temperature: Some(2),
            ..Default::default()
        });
        assert!(pattern.matches(&key));
    }

    #[test]
    fn segment_count_mismatch_never_matches() {
        let pattern = SearchPattern::match_all();
        let shallow = StorageKey::from_segments(vec!["power_on".to_string()]);
        assert!(!pattern.matches(&shallow));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn differing_segment_counts_never_match(
            key_segments in prop::collection::vec("[a-z0-9_]{1,8}", 0..8),
            pattern_segments in prop::collection::vec("[a-z0-9_*]{1,8}", 0..8),
        ) {
            prop_assume!(key_segments.len() != pattern_segments.len());
            let key = StorageKey::from_segments(key_segments);
            let pattern = SearchPattern::from_segments(pattern_segments);
            prop_assert!(!pattern.matches(&key));
        }

        #[test]
        fn all_wildcards_match_any_equal_length_key(
            key_segments in prop::collection::vec("[a-z0-9_]{1,8}", 1..8),
        ) {
            let pattern = SearchPattern::from_segments(vec![
                WILDCARD.to_string();
                key_segments.len()
            ]);
            let key = StorageKey::from_segments(key_segments);
            prop_assert!(pattern.matches(&key));
        }
    }
}
