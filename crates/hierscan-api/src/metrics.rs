use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters collected during a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanMetrics {
    /// Headers handed to the front end
    pub files_attempted: usize,

    /// Headers that produced a translation unit
    pub files_parsed: usize,

    /// Parsed headers that also reported diagnostics
    pub files_with_diagnostics: usize,

    /// Headers that could not be scanned at all
    pub files_failed: usize,

    /// Total time spent in the front end
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,

    /// Class-like declarations offered to the hierarchy filter
    pub candidates_seen: usize,

    /// Declarations admitted by the hierarchy filter, before dedup
    pub classes_admitted: usize,

    /// Records left after dedup and the abstract filter
    pub records_emitted: usize,
}

// Helper module for serializing Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl ScanMetrics {
    /// Share of attempted headers that parsed (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.files_attempted == 0 {
            0.0
        } else {
            self.files_parsed as f64 / self.files_attempted as f64
        }
    }

    /// Average front-end time per parsed header
    pub fn avg_parse_time(&self) -> Duration {
        if self.files_parsed == 0 {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files_parsed as u32
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &ScanMetrics) {
        self.files_attempted += other.files_attempted;
        self.files_parsed += other.files_parsed;
        self.files_with_diagnostics += other.files_with_diagnostics;
        self.files_failed += other.files_failed;
        self.total_parse_time += other.total_parse_time;
        self.candidates_seen += other.candidates_seen;
        self.classes_admitted += other.classes_admitted;
        self.records_emitted += other.records_emitted;
    }
}
