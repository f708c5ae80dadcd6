//! Projection of a forecast response into display fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::{ForecastResponse, FORECAST_DAYS};

const LOW_RES_ICON: &str = "64x64";
const HIGH_RES_ICON: &str = "128x128";
const ICON_SCHEME: &str = "http:";

/// Background colour mode, chosen from the service's day/night flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    Day,
    #[default]
    Night,
}

impl BackgroundMode {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            Self::Day => "#1AA7EC",
            Self::Night => "#1F2041",
        }
    }
}

/// Current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_celsius: f64,
    pub condition_icon_url: String,
    pub condition_text: String,
    pub wind_mph: f64,
    pub is_daytime: bool,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub condition_icon_url: String,
    pub condition_text: String,
    pub average_temp_celsius: f64,
}

impl ForecastDay {
    /// Short day name ("Mon".."Sun") taken from the entry's own date.
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn display_temp(&self) -> String {
        format_temp(self.average_temp_celsius)
    }
}

/// Everything the dashboard shows, derived from one forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub current: CurrentConditions,
    /// Floored whole degrees with a degree sign, e.g. "17°"
    pub display_temp: String,
    /// "<place name>, <country>"
    pub location_label: String,
    pub background: BackgroundMode,
    pub forecast: Vec<ForecastDay>,
}

/// Swap the low-resolution icon token for the high-resolution one and add the
/// scheme the service leaves off. URLs that already have a scheme keep it.
pub fn upgrade_icon_url(path: &str) -> String {
    let upgraded = path.replace(LOW_RES_ICON, HIGH_RES_ICON);
    if upgraded.starts_with("//") {
        format!("{}{}", ICON_SCHEME, upgraded)
    } else {
        upgraded
    }
}

/// Floor to a whole degree and append the degree sign.
pub fn format_temp(celsius: f64) -> String {
    format!("{}°", celsius.floor() as i64)
}

pub fn project(response: &ForecastResponse) -> ViewModel {
    let current = &response.current;
    let is_daytime = current.is_day != 0;

    let forecast = response
        .forecast
        .forecastday
        .iter()
        .take(FORECAST_DAYS)
        .map(|entry| ForecastDay {
            date: entry.date,
            condition_icon_url: upgrade_icon_url(&entry.day.condition.icon),
            condition_text: entry.day.condition.text.clone(),
            average_temp_celsius: entry.day.avgtemp_c,
        })
        .collect();

    ViewModel {
        current: CurrentConditions {
            temp_celsius: current.temp_c,
            condition_icon_url: upgrade_icon_url(&current.condition.icon),
            condition_text: current.condition.text.clone(),
            wind_mph: current.wind_mph,
            is_daytime,
        },
        display_temp: format_temp(current.temp_c),
        location_label: format!("{}, {}", response.location.name, response.location.country),
        background: BackgroundMode::from_is_day(is_daytime),
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(is_day: u8, temp_c: f64) -> ForecastResponse {
        serde_json::from_value(serde_json::json!({
            "location": { "name": "London", "country": "UK" },
            "current": {
                "temp_c": temp_c,
                "wind_mph": 9.4,
                "is_day": is_day,
                "condition": {
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                    "text": "Partly cloudy"
                }
            },
            "forecast": { "forecastday": [
                { "date": "2026-10-18", "day": { "avgtemp_c": 12.7, "condition": { "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png", "text": "Sunny" } } },
                { "date": "2026-10-19", "day": { "avgtemp_c": -0.2, "condition": { "icon": "//cdn.weatherapi.com/weather/64x64/day/296.png", "text": "Light rain" } } }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_icon_upgrade_and_scheme() {
        assert_eq!(
            upgrade_icon_url("//cdn.weatherapi.com/weather/64x64/night/113.png"),
            "http://cdn.weatherapi.com/weather/128x128/night/113.png"
        );
    }

    #[test]
    fn test_icon_with_scheme_is_only_upgraded() {
        assert_eq!(
            upgrade_icon_url("https://cdn.example/64x64/a.png"),
            "https://cdn.example/128x128/a.png"
        );
    }

    #[test]
    fn test_format_temp_floors() {
        assert_eq!(format_temp(17.9), "17°");
        assert_eq!(format_temp(20.0), "20°");
        assert_eq!(format_temp(-0.5), "-1°");
    }

    #[test]
    fn test_background_follows_is_day() {
        assert_eq!(project(&response(1, 10.0)).background, BackgroundMode::Day);
        assert_eq!(project(&response(0, 10.0)).background, BackgroundMode::Night);
        assert_eq!(BackgroundMode::Day.colour(), "#1AA7EC");
    }

    #[test]
    fn test_project_current_and_label() {
        let view = project(&response(1, 20.4));
        assert_eq!(view.display_temp, "20°");
        assert_eq!(view.location_label, "London, UK");
        assert_eq!(view.current.condition_text, "Partly cloudy");
        assert_eq!(view.current.wind_mph, 9.4);
        assert!(view.current.is_daytime);
        assert_eq!(
            view.current.condition_icon_url,
            "http://cdn.weatherapi.com/weather/128x128/day/116.png"
        );
    }

    #[test]
    fn test_forecast_days_labelled_by_date() {
        let view = project(&response(0, 5.0));
        let labels: Vec<String> = view.forecast.iter().map(|d| d.weekday_label()).collect();
        // 2026-10-18 is a Sunday
        assert_eq!(labels, vec!["Sun", "Mon"]);
        assert_eq!(view.forecast[0].display_temp(), "12°");
        assert_eq!(view.forecast[1].display_temp(), "-1°");
        assert!(view.forecast[1].condition_icon_url.contains("128x128"));
    }
}
