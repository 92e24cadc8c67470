//! Attribute-derived storage keys.

use core::fmt;
use std::path::{Component, Path, PathBuf};

use iv_core::{FanSpeed, Mode, SignalAttrs};

/// Segment marker that matches any key segment.
pub const WILDCARD: &str = "*";

/// File extension of a leaf record.
pub const RECORD_EXT: &str = "json";

pub(crate) fn power_segment(power_on: bool) -> String {
    let segment = if power_on { "power_on" } else { "power_off" };
    segment.to_string()
}

pub(crate) fn mode_segment(mode: Mode) -> String {
    format!("mode_{}", mode)
}

pub(crate) fn temp_segment(temperature: i32) -> String {
    format!("temp_{}", temperature)
}

pub(crate) fn fan_segment(fan_speed: &FanSpeed) -> String {
    format!("fan_{}", fan_speed)
}

/// Hierarchical identifier of a stored signal: one path segment per
/// attribute, most significant first (power, mode, temperature, fan).
///
/// `for_attrs` is a pure function of the tuple, so two profiles taught
/// under the same tuple land on the same key and the later write wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    segments: Vec<String>,
}

impl StorageKey {
    pub fn for_attrs(attrs: &SignalAttrs) -> Self {
        Self {
            segments: vec![
                power_segment(attrs.power_on),
                mode_segment(attrs.mode),
                temp_segment(attrs.temperature),
                fan_segment(&attrs.fan_speed),
            ],
        }
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Recover a key from a record path relative to the storage root.
    /// Returns `None` for paths that are not plain `.json` leaves.
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                _ => return None,
            }
        }
        let leaf = segments.pop()?;
        let stem = leaf.strip_suffix(&format!(".{}", RECORD_EXT))?;
        if stem.is_empty() {
            return None;
        }
        segments.push(stem.to_string());
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of the leaf record relative to the storage root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i + 1 == self.segments.len() {
                path.push(format!("{}.{}", segment, RECORD_EXT));
            } else {
                path.push(segment);
            }
        }
        path
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attrs() -> SignalAttrs {
        SignalAttrs {
            power_on: true,
            mode: Mode::Cool,
            temperature: 25,
            fan_speed: FanSpeed::Level(3),
        }
    }

    #[test]
    fn key_encodes_attributes_in_priority_order() {
        let key = StorageKey::for_attrs(&sample_attrs());
        assert_eq!(
            key.segments(),
            ["power_on", "mode_cool", "temp_25", "fan_3"]
        );
    }

    #[test]
    fn key_is_deterministic() {
        let a = StorageKey::for_attrs(&sample_attrs());
        let b = StorageKey::for_attrs(&sample_attrs());
        assert_eq!(a, b);
    }

    #[test]
    fn power_off_and_symbolic_fan_have_distinct_segments() {
        let attrs = SignalAttrs {
            power_on: false,
            mode: Mode::Heat,
            temperature: 22,
            fan_speed: FanSpeed::auto(),
        };
        let key = StorageKey::for_attrs(&attrs);
        assert_eq!(
            key.segments(),
            ["power_off", "mode_heat", "temp_22", "fan_auto"]
        );
    }

    #[test]
    fn relative_path_round_trip() {
        let key = StorageKey::for_attrs(&sample_attrs());
        let path = key.relative_path();
        assert_eq!(
            path,
            PathBuf::from("power_on/mode_cool/temp_25/fan_3.json")
        );
        let back = StorageKey::from_relative_path(&path).expect("path should parse");
        assert_eq!(back, key);
    }

    #[test]
    fn non_record_paths_are_rejected() {
        assert!(StorageKey::from_relative_path(Path::new("power_on/notes.txt")).is_none());
        assert!(StorageKey::from_relative_path(Path::new(".json")).is_none());
        assert!(StorageKey::from_relative_path(Path::new("")).is_none());
    }

    #[test]
    fn negative_temperature_encodes() {
        let attrs = SignalAttrs {
            temperature: -5,
            ..sample_attrs()
        };
        let key = StorageKey::for_attrs(&attrs);
        assert_eq!(key.segments()[2], "temp_-5");
    }
}
