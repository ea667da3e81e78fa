// src/dates.rs
//
// Calendar-day parsing shared by the models and the query extractors.
// Clients send either a bare `YYYY-MM-DD` (HTML date inputs) or a full ISO
// timestamp; both are reduced to the local calendar day.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_calendar_day(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, DAY_FORMAT) {
        return Ok(day);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.with_timezone(&Local).date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    Err(format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

/// Serde adapter for `NaiveDate` fields.
pub mod calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format(super::DAY_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_day(&raw).map_err(serde::de::Error::custom)
    }

    /// Same, for `Option<NaiveDate>`; empty strings read as `None`.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            day: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match day {
                Some(day) => serializer.collect_str(&day.format(super::super::DAY_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_calendar_day(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }

    /// For patch fields: absent stays `None`, explicit `null` becomes
    /// `Some(None)` so the stored value can be cleared.
    pub mod patch {
        use chrono::NaiveDate;
        use serde::Deserializer;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Option<NaiveDate>>, D::Error> {
            super::option::deserialize(deserializer).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_calendar_day("2024-06-10"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
        assert_eq!(
            parse_calendar_day(" 2024-06-10 "),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
    }

    #[test]
    fn drops_time_of_naive_timestamps() {
        assert_eq!(
            parse_calendar_day("2024-06-10T17:45:00.000"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
    }

    #[test]
    fn offset_timestamps_become_the_local_day() {
        // Midday with a small offset lands on the same day in any usual zone.
        assert_eq!(
            parse_calendar_day("2024-06-10T12:00:00+02:00"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
        assert_eq!(
            parse_calendar_day("2024-06-10T10:00:00Z"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_calendar_day("10/06/2024").is_err());
        assert!(parse_calendar_day("").is_err());
    }
}
