//! Sprint dates arrive either as RFC 3339 (`+02:00`) or with a bare `+0200`
//! offset depending on the server version.

use chrono::{DateTime, FixedOffset, ParseResult};
use serde::{Deserialize, Deserializer};

pub fn parse(raw: &str) -> ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
}

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339() {
        let ts = parse("2015-04-07T11:28:15.213+02:00").unwrap();
        assert_eq!(ts.year(), 2015);
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn parses_offset_without_colon() {
        let ts = parse("2015-04-21T11:28:00.000+0200").unwrap();
        assert_eq!(ts.day(), 21);
        assert_eq!(ts.hour(), 11);
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("next tuesday").is_err());
    }
}
