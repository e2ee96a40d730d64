//! Stadium roof and wind speed resolution
//!
//! Wind only matters outdoors. The effective wind speed of a play is resolved in
//! this order:
//!
//! 1. `0` when the roof is closed (`closed` or `dome`)
//! 2. the `wind` column when present
//! 3. the wind speed parsed from the free-text `weather` column
//!
//! Plays for which none of these yields a value have no effective wind.

use nflmodels_data::PlayRecord;

/// Returns `true` if the play was inside a closed stadium.
///
/// A missing roof value counts as open.
#[must_use]
pub fn is_closed_roof(roof: Option<&str>) -> bool {
    matches!(roof, Some("closed" | "dome"))
}

/// Parses the wind speed from a weather description.
///
/// The speed is the second-to-last whitespace-separated token with every
/// non-digit character removed, e.g. `"... Wind: SW 12 mph"` gives `12`.
///
/// # Examples
///
/// ```
/// use nflmodels_features::wind::wind_from_weather;
///
/// assert_eq!(wind_from_weather("Sunny Temp: 68° F, Humidity: 40%, Wind: SW 12 mph"), Some(12));
/// assert_eq!(wind_from_weather("Cloudy Wind: calm mph"), None);
/// assert_eq!(wind_from_weather("Indoors"), None);
/// ```
#[must_use]
pub fn wind_from_weather(weather: &str) -> Option<u32> {
    let tokens = weather.split_whitespace().collect::<Vec<_>>();
    let token = tokens.len().checked_sub(2).map(|i| tokens[i])?;
    let digits = token
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().ok()
}

/// Resolves the effective wind speed of a play.
#[must_use]
pub fn effective_wind(play: &PlayRecord) -> Option<f64> {
    if is_closed_roof(play.roof.as_deref()) {
        return Some(0.0);
    }
    play.wind
        .or_else(|| play.weather.as_deref().and_then(wind_from_weather).map(f64::from))
}
