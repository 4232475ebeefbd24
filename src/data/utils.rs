use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use time::{Date, Month};

pub fn default_str() -> Arc<str> {
    "".into()
}

/// TMDB identifies everything with numeric ids, the data layer keys by
/// string.
pub fn deserialize_numeric_id<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = u64::deserialize(deserializer)?;
    Ok(id.to_string().into())
}

pub fn deserialize_null_arc_str<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_else(default_str))
}

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let date = String::deserialize(deserializer)?;
    let mut parts = date.splitn(3, '-');
    let year = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let month: u8 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1);
    let month = Month::try_from(month).unwrap_or(Month::January);
    let day = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1);

    Date::from_calendar_date(year, month, day)
        .map_err(|_err| serde::de::Error::custom("Invalid date"))
}

pub fn deserialize_date_option<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_date")] Date);

    Ok(Option::deserialize(deserializer)?.map(|Wrapper(val)| val))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deserialize_numeric_id")]
        id: Arc<str>,
        #[serde(default, deserialize_with = "deserialize_date_option")]
        released: Option<Date>,
    }

    #[test]
    fn numeric_ids_become_strings() {
        let probe: Probe = serde_json::from_str(r#"{"id": 550}"#).unwrap();
        assert_eq!(&*probe.id, "550");
    }

    #[test]
    fn dates_parse_from_tmdb_format() {
        let probe: Probe = serde_json::from_str(r#"{"id": 1, "released": "1999-10-15"}"#).unwrap();
        assert_eq!(probe.released, Some(date!(1999 - 10 - 15)));
    }

    #[test]
    fn null_date_is_none() {
        let probe: Probe = serde_json::from_str(r#"{"id": 1, "released": null}"#).unwrap();
        assert_eq!(probe.released, None);
    }
}
