//! Display helpers for forecast screens.

use chrono::{DateTime, Datelike, FixedOffset};

use crate::model::{HourlyForecast, Measurement};

const ICON_BASE_URL: &str = "https://developer.accuweather.com/sites/default/files";

/// Small icon image for a provider icon code. Codes are zero-padded to two digits.
pub fn icon_url(icon: u32) -> String {
    format!("{ICON_BASE_URL}/{icon:02}-s.png")
}

pub fn temperature_label(temperature: &Measurement) -> String {
    format!("{}°", temperature.value)
}

/// 12-hour clock label such as `"2 PM"`, in the given offset.
pub fn hour_label(epoch_seconds: i64, offset: FixedOffset) -> Option<String> {
    let at = DateTime::from_timestamp(epoch_seconds, 0)?.with_timezone(&offset);
    Some(at.format("%-I %p").to_string())
}

/// Ordinal day of the month such as `"1st"` or `"23rd"`, in the given offset.
pub fn day_of_month_label(epoch_seconds: i64, offset: FixedOffset) -> Option<String> {
    let day = DateTime::from_timestamp(epoch_seconds, 0)?
        .with_timezone(&offset)
        .day();
    Some(format!("{day}{}", ordinal_suffix(day)))
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Headline temperature: the first hourly record, if any.
pub fn current_temperature(hourly: &[HourlyForecast]) -> Option<&Measurement> {
    hourly.first().map(|h| &h.temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn icon_codes_are_zero_padded() {
        assert_eq!(icon_url(3), "https://developer.accuweather.com/sites/default/files/03-s.png");
        assert_eq!(icon_url(33), "https://developer.accuweather.com/sites/default/files/33-s.png");
    }

    #[test]
    fn temperature_keeps_decimal() {
        let m = Measurement {
            value: 17.5,
            unit: "C".into(),
            unit_type: 17,
        };
        assert_eq!(temperature_label(&m), "17.5°");
    }

    #[test]
    fn hour_label_respects_offset() {
        // 2023-11-14T22:13:20Z
        let epoch = 1_700_000_000;
        assert_eq!(hour_label(epoch, utc()).as_deref(), Some("10 PM"));

        let auckland = FixedOffset::east_opt(13 * 3600).unwrap();
        assert_eq!(hour_label(epoch, auckland).as_deref(), Some("11 AM"));
    }

    #[test]
    fn day_label_uses_ordinals() {
        // 2023-11-01, 02, 03, 11, 21, 22 at noon UTC
        let noon = |day: i64| 1_698_840_000 + (day - 1) * 86_400;
        assert_eq!(day_of_month_label(noon(1), utc()).as_deref(), Some("1st"));
        assert_eq!(day_of_month_label(noon(2), utc()).as_deref(), Some("2nd"));
        assert_eq!(day_of_month_label(noon(3), utc()).as_deref(), Some("3rd"));
        assert_eq!(day_of_month_label(noon(11), utc()).as_deref(), Some("11th"));
        assert_eq!(day_of_month_label(noon(21), utc()).as_deref(), Some("21st"));
        assert_eq!(day_of_month_label(noon(22), utc()).as_deref(), Some("22nd"));
    }

    #[test]
    fn out_of_range_epoch_has_no_label() {
        assert_eq!(hour_label(i64::MAX, utc()), None);
    }

    #[test]
    fn current_temperature_is_first_hour() {
        let hours = vec![
            HourlyForecast {
                temperature: Measurement {
                    value: 14.0,
                    ..Measurement::default()
                },
                ..HourlyForecast::default()
            },
            HourlyForecast {
                temperature: Measurement {
                    value: 15.0,
                    ..Measurement::default()
                },
                ..HourlyForecast::default()
            },
        ];
        assert_eq!(current_temperature(&hours).map(|m| m.value), Some(14.0));
        assert_eq!(current_temperature(&[]), None);
    }
}
