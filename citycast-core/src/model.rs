use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A city returned by the location search endpoint.
///
/// Field names follow the provider's PascalCase JSON. `Key` is required;
/// descriptive fields the provider leaves out decode to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "Version", default)]
    pub version: i32,
    /// Provider-assigned id, used as the path parameter for forecasts.
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Rank", default)]
    pub rank: i32,
    #[serde(rename = "LocalizedName", default)]
    pub localized_name: String,
    #[serde(rename = "EnglishName", default)]
    pub english_name: String,
    #[serde(rename = "PrimaryPostalCode", default)]
    pub primary_postal_code: String,
    #[serde(rename = "Region", default)]
    pub region: Name,
    #[serde(rename = "Country", default)]
    pub country: Name,
    #[serde(rename = "TimeZone", default)]
    pub time_zone: TimeZone,
    #[serde(rename = "GeoPosition", default)]
    pub geo_position: GeoPosition,
    #[serde(rename = "IsAlias", default)]
    pub is_alias: bool,
}

impl Location {
    /// English name, or the localized one when the provider sent no English name.
    pub fn display_name(&self) -> &str {
        if self.english_name.is_empty() {
            &self.localized_name
        } else {
            &self.english_name
        }
    }
}

/// Name/id pair used for countries and regions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "LocalizedName")]
    pub localized_name: String,
    #[serde(rename = "EnglishName")]
    pub english_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPosition {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Elevation")]
    pub elevation: Elevation,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Elevation {
    #[serde(rename = "Metric")]
    pub metric: Measurement,
    #[serde(rename = "Imperial")]
    pub imperial: Measurement,
}

/// A value with its unit, e.g. `{"Value": 18.3, "Unit": "C", "UnitType": 17}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurement {
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "UnitType")]
    pub unit_type: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZone {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Hours east of UTC; may be fractional (e.g. 5.5, 12.75).
    #[serde(rename = "GmtOffset")]
    pub gmt_offset: f64,
    #[serde(rename = "IsDaylightSaving")]
    pub is_daylight_saving: bool,
    #[serde(rename = "NextOffsetChange")]
    pub next_offset_change: Option<String>,
}

impl TimeZone {
    /// Current UTC offset of the zone. Out-of-range offsets fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        let seconds = (self.gmt_offset * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// Body of the 5-day daily forecast endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForecastSet {
    #[serde(rename = "Headline")]
    pub headline: Option<Headline>,
    /// Chronological, as sent by the provider.
    #[serde(rename = "DailyForecasts")]
    pub daily_forecasts: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Headline {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "EffectiveEpochDate")]
    pub effective_epoch_date: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Seconds since the Unix epoch.
    #[serde(rename = "EpochDate")]
    pub epoch_date: i64,
    #[serde(rename = "Temperature")]
    pub temperature: TemperatureRange,
    #[serde(rename = "Day", default)]
    pub day: DayPart,
    #[serde(rename = "Night", default)]
    pub night: DayPart,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureRange {
    #[serde(rename = "Minimum")]
    pub minimum: Measurement,
    #[serde(rename = "Maximum")]
    pub maximum: Measurement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPart {
    #[serde(rename = "Icon")]
    pub icon: u32,
    #[serde(rename = "IconPhrase")]
    pub icon_phrase: String,
    #[serde(rename = "HasPrecipitation")]
    pub has_precipitation: bool,
}

/// One entry of the 12-hour hourly forecast endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    #[serde(rename = "DateTime", default)]
    pub date_time: String,
    /// Seconds since the Unix epoch.
    #[serde(rename = "EpochDateTime")]
    pub epoch_date_time: i64,
    #[serde(rename = "WeatherIcon", default)]
    pub weather_icon: u32,
    #[serde(rename = "IconPhrase", default)]
    pub icon_phrase: String,
    #[serde(rename = "HasPrecipitation", default)]
    pub has_precipitation: bool,
    #[serde(rename = "IsDaylight", default)]
    pub is_daylight: bool,
    #[serde(rename = "Temperature")]
    pub temperature: Measurement,
    #[serde(rename = "PrecipitationProbability", default)]
    pub precipitation_probability: u8,
}
