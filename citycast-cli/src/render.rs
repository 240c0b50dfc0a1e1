//! Plain-text rendering of forecast state.

use chrono::FixedOffset;
use citycast_core::{
    DailyForecastSet, FetchState, HourlyForecast, Location,
    format::{current_temperature, day_of_month_label, hour_label, icon_url, temperature_label},
};

pub fn location_line(location: &Location) -> String {
    let mut line = location.display_name().to_string();
    if !location.region.english_name.is_empty() {
        line.push_str(&format!(", {}", location.region.english_name));
    }
    if !location.country.english_name.is_empty() {
        line.push_str(&format!(", {}", location.country.english_name));
    }
    format!("{line} [{}]", location.key)
}

pub fn location_heading(location: &Location) -> String {
    format!("{}\n{}", location.display_name(), location.country.english_name)
}

pub fn print_locations(locations: &[Location]) {
    if locations.is_empty() {
        println!("No matching locations found.");
        return;
    }
    for location in locations {
        println!("{}", location_line(location));
    }
}

pub fn print_hourly(state: &FetchState<Vec<HourlyForecast>>, offset: FixedOffset) {
    match state {
        FetchState::Loading => println!("Loading hourly forecast..."),
        FetchState::Error(message) => println!("Hourly forecast unavailable: {message}"),
        FetchState::Success(hours) => {
            if let Some(now) = current_temperature(hours) {
                println!("Now: {}", temperature_label(now));
                println!();
            }
            println!("Hourly Forecasts:");
            for hour in hours {
                println!(
                    "  {:>5}  {:>6}  {}",
                    hour_label(hour.epoch_date_time, offset).unwrap_or_default(),
                    temperature_label(&hour.temperature),
                    condition(&hour.icon_phrase, hour.weather_icon),
                );
            }
        }
    }
}

pub fn print_daily(state: &FetchState<DailyForecastSet>, offset: FixedOffset) {
    match state {
        FetchState::Loading => println!("Loading daily forecast..."),
        FetchState::Error(message) => println!("Daily forecast unavailable: {message}"),
        FetchState::Success(set) => {
            if let Some(headline) = &set.headline {
                println!("{}", headline.text);
            }
            println!("Daily Forecasts:");
            for day in &set.daily_forecasts {
                println!(
                    "  {:>5}  low {:>6}  high {:>6}  {}",
                    day_of_month_label(day.epoch_date, offset).unwrap_or_default(),
                    temperature_label(&day.temperature.minimum),
                    temperature_label(&day.temperature.maximum),
                    condition(&day.day.icon_phrase, day.day.icon),
                );
            }
        }
    }
}

/// Icon phrase followed by the provider's icon image, e.g. `Sunny (https://.../01-s.png)`.
pub fn condition(phrase: &str, icon: u32) -> String {
    if icon == 0 {
        return phrase.to_string();
    }
    format!("{phrase} ({})", icon_url(icon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycast_core::model::Name;

    #[test]
    fn location_line_includes_region_country_and_key() {
        let loc = Location {
            key: "22850".into(),
            english_name: "Auckland".into(),
            region: Name {
                english_name: "Oceania".into(),
                ..Name::default()
            },
            country: Name {
                english_name: "New Zealand".into(),
                ..Name::default()
            },
            ..Location::default()
        };
        assert_eq!(location_line(&loc), "Auckland, Oceania, New Zealand [22850]");
    }

    #[test]
    fn location_line_skips_missing_parts() {
        let loc = Location {
            key: "1".into(),
            english_name: "Nowhere".into(),
            ..Location::default()
        };
        assert_eq!(location_line(&loc), "Nowhere [1]");
    }

    #[test]
    fn condition_links_the_provider_icon() {
        assert_eq!(
            condition("Mostly cloudy", 6),
            "Mostly cloudy (https://developer.accuweather.com/sites/default/files/06-s.png)"
        );
    }

    #[test]
    fn condition_without_icon_is_just_the_phrase() {
        assert_eq!(condition("Clear", 0), "Clear");
    }
}
