use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Provider `dt_txt` layout, e.g. "2024-11-27 12:00:00".
pub const PROVIDER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Snapshot of the weather right now for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub description: String,
    pub icon: String,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    /// Shift of the city's local time from UTC.
    pub timezone_offset_secs: i32,
}

impl CurrentConditions {
    pub fn display_temperature(&self) -> String {
        format_temperature(self.temperature_c)
    }

    pub fn display_feels_like(&self) -> String {
        format_temperature(self.feels_like_c)
    }

    pub fn display_description(&self) -> String {
        capitalize_words(&self.description)
    }

    pub fn sunrise_label(&self) -> String {
        format_clock(self.sunrise, self.timezone_offset_secs)
    }

    pub fn sunset_label(&self) -> String {
        format_clock(self.sunset, self.timezone_offset_secs)
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// One midday sample of the 5 day / 3 hour forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub dt_txt: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn day_label(&self) -> String {
        format_day_label(&self.dt_txt)
    }

    pub fn display_temperature(&self) -> String {
        format_temperature(self.temperature_c)
    }

    pub fn display_feels_like(&self) -> String {
        format_temperature(self.feels_like_c)
    }

    pub fn display_description(&self) -> String {
        capitalize_words(&self.description)
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Rounds to the nearest whole degree; halves go up (-2.5 becomes -2).
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(value: f64) -> String {
    format!("{}°C", round_temperature(value))
}

/// Upper-cases the first letter of every word, leaving the rest untouched.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Formats a UNIX timestamp as a 12-hour clock ("06:12 AM") in the given
/// offset. Absent or unrepresentable timestamps render as "N/A".
pub fn format_clock(timestamp: Option<i64>, offset_secs: i32) -> String {
    let Some(ts) = timestamp else {
        return "N/A".to_string();
    };

    FixedOffset::east_opt(offset_secs)
        .zip(DateTime::from_timestamp(ts, 0))
        .map(|(offset, utc)| utc.with_timezone(&offset).format("%I:%M %p").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "2024-11-27 12:00:00" -> "Wed, Nov 27". Unparseable input is returned as is.
pub fn format_day_label(dt_txt: &str) -> String {
    NaiveDateTime::parse_from_str(dt_txt, PROVIDER_DATETIME_FORMAT)
        .map(|dt| dt.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| dt_txt.to_string())
}

pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@4x.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperatures_round_half_up() {
        assert_eq!(round_temperature(15.4), 15);
        assert_eq!(round_temperature(15.5), 16);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
        assert_eq!(format_temperature(15.4), "15°C");
    }

    #[test]
    fn capitalizes_every_word() {
        assert_eq!(capitalize_words("clear sky"), "Clear Sky");
        assert_eq!(capitalize_words("light  rain"), "Light  Rain");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn clock_uses_city_offset() {
        // 2024-11-27 05:12:00 UTC
        let ts = 1_732_684_320;
        assert_eq!(format_clock(Some(ts), 0), "05:12 AM");
        assert_eq!(format_clock(Some(ts), 3600), "06:12 AM");
        assert_eq!(format_clock(Some(ts), 10 * 3600), "03:12 PM");
    }

    #[test]
    fn missing_clock_is_na() {
        assert_eq!(format_clock(None, 0), "N/A");
        assert_eq!(format_clock(Some(i64::MAX), 0), "N/A");
    }

    #[test]
    fn day_label_from_provider_text() {
        assert_eq!(format_day_label("2024-11-28 12:00:00"), "Thu, Nov 28");
        assert_eq!(format_day_label("garbage"), "garbage");
    }

    #[test]
    fn display_keeps_underlying_description() {
        let current = CurrentConditions {
            city_name: "Pristina".into(),
            temperature_c: 15.4,
            feels_like_c: 14.6,
            humidity_pct: 60,
            wind_speed_mps: 3.1,
            pressure_hpa: 1015,
            description: "clear sky".into(),
            icon: "01d".into(),
            sunrise: None,
            sunset: None,
            timezone_offset_secs: 3600,
        };

        assert_eq!(current.display_temperature(), "15°C");
        assert_eq!(current.display_description(), "Clear Sky");
        assert_eq!(current.description, "clear sky");
        assert_eq!(current.icon_url(), "https://openweathermap.org/img/wn/01d@4x.png");
        assert_eq!(current.sunrise_label(), "N/A");
    }
}
