//! TOML-based schedule configuration.
//!
//! Selects the conflict predicate used by insertion and free-time queries,
//! and tunes free-slot detection.
//!
//! ```toml
//! conflict_policy = "containment"
//! min_gap_minutes = 15
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::span::Span;

/// How a queried frame is tested against the spans already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// A frame is taken when a stored span lies inside it, bounds inclusive.
    /// Spans that only straddle a frame boundary, or that enclose the frame,
    /// do not count.
    Containment,
    /// A frame is taken when a stored span lies inside it or overlaps it
    /// with positive length. Touching spans are still free.
    #[default]
    Overlap,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Containment => "containment",
            Self::Overlap => "overlap",
        }
    }

    /// Whether `stored` makes `frame` unavailable.
    #[inline]
    pub fn conflicts(&self, stored: &Span, frame: &Span) -> bool {
        match self {
            Self::Containment => stored.is_within(frame),
            Self::Overlap => stored.is_within(frame) || stored.overlaps(frame),
        }
    }
}

/// Schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
    /// Shortest gap reported by `Schedule::free_slots` (minutes).
    #[serde(default)]
    pub min_gap_minutes: i64,
}

impl ScheduleConfig {
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_min_gap(mut self, minutes: i64) -> Self {
        self.min_gap_minutes = minutes;
        self
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or holds invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: ScheduleConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a TOML file. A missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns `InvalidValue` for a negative `min_gap_minutes`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_gap_minutes < 0 {
            return Err(ConfigError::InvalidValue {
                key: "min_gap_minutes".to_string(),
                message: format!("must not be negative, got {}", self.min_gap_minutes),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn span(a: u32, b: u32) -> Span {
        Span::new(
            Utc.with_ymd_and_hms(2024, 3, 1, a, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, b, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn default_is_overlap_with_no_min_gap() {
        let cfg = ScheduleConfig::default();
        assert_eq!(cfg.conflict_policy, ConflictPolicy::Overlap);
        assert_eq!(cfg.min_gap_minutes, 0);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = ScheduleConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ScheduleConfig::default());
    }

    #[test]
    fn parses_policy_and_gap() {
        let cfg = ScheduleConfig::from_toml_str(
            "conflict_policy = \"containment\"\nmin_gap_minutes = 15\n",
        )
        .unwrap();
        assert_eq!(cfg.conflict_policy, ConflictPolicy::Containment);
        assert_eq!(cfg.min_gap_minutes, 15);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = ScheduleConfig::from_toml_str("conflict_policy = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_negative_min_gap() {
        let err = ScheduleConfig::from_toml_str("min_gap_minutes = -5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "min_gap_minutes"));
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = ScheduleConfig::default()
            .with_policy(ConflictPolicy::Containment)
            .with_min_gap(30);
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("conflict_policy = \"containment\""));
        assert_eq!(ScheduleConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "conflict_policy = \"overlap\"").unwrap();
        writeln!(file, "min_gap_minutes = 10").unwrap();

        let cfg = ScheduleConfig::load(file.path()).unwrap();
        assert_eq!(cfg.min_gap_minutes, 10);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScheduleConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn containment_ignores_straddling_and_enclosing_spans() {
        let policy = ConflictPolicy::Containment;
        let frame = span(10, 12);
        assert!(policy.conflicts(&span(10, 11), &frame));
        assert!(!policy.conflicts(&span(9, 11), &frame));
        assert!(!policy.conflicts(&span(9, 13), &frame));
    }

    #[test]
    fn overlap_catches_straddling_and_enclosing_spans() {
        let policy = ConflictPolicy::Overlap;
        let frame = span(10, 12);
        assert!(policy.conflicts(&span(10, 11), &frame));
        assert!(policy.conflicts(&span(9, 11), &frame));
        assert!(policy.conflicts(&span(9, 13), &frame));
        assert!(!policy.conflicts(&span(12, 13), &frame));
        assert!(!policy.conflicts(&span(8, 10), &frame));
    }
}
