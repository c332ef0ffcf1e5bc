use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The `time` block every Bitrix24 envelope carries: server-side timing for
/// the call, in seconds, plus the wall-clock bounds as RFC 3339 timestamps
/// in the portal's timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Time {
    /// Unix timestamp (fractional) when the portal started handling the call.
    pub start: f64,
    /// Unix timestamp (fractional) when the portal finished.
    pub finish: f64,
    /// Total wall time spent, seconds.
    pub duration: f64,
    /// Time spent executing the method itself, seconds.
    pub processing: f64,
    pub date_start: DateTime<FixedOffset>,
    pub date_finish: DateTime<FixedOffset>,
    /// When the operating-time counter resets (unix timestamp). Only sent by
    /// portals with operating-time limits enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_reset_at: Option<i64>,
    /// Operating time consumed by this method over the current window, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_time_block() {
        let json = r#"{
            "start": 1678184069.945593,
            "finish": 1678184070.030843,
            "duration": 0.0852499,
            "processing": 0.0073549,
            "date_start": "2023-03-07T11:14:29+01:00",
            "date_finish": "2023-03-07T11:14:30+01:00",
            "operating_reset_at": 1678187669,
            "operating": 0.0073549
        }"#;
        let time: Time = serde_json::from_str(json).unwrap();
        assert!(time.duration > 0.0);
        assert_eq!(time.date_start.timezone().local_minus_utc(), 3600);
        assert_eq!(time.operating_reset_at, Some(1678187669));
    }

    #[test]
    fn operating_fields_are_optional() {
        let json = r#"{
            "start": 1.0,
            "finish": 2.0,
            "duration": 1.0,
            "processing": 0.5,
            "date_start": "2023-03-07T11:14:29+01:00",
            "date_finish": "2023-03-07T11:14:30+01:00"
        }"#;
        let time: Time = serde_json::from_str(json).unwrap();
        assert!(time.operating.is_none());
        assert!(time.operating_reset_at.is_none());
    }
}
