use anyhow::{anyhow, Result};
use serde::Deserialize;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// OpenWeather condition group, e.g. "Clear", "Rain", "Thunderstorm".
    pub main: String,
    pub description: String,
    pub city: String,
}

/// Current-conditions fetch used only to drive the mood engine. Entirely
/// optional: without an API key the app runs on the time-of-day mood alone.
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    city: String,
}

#[derive(Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct Condition {
    main: String,
    description: String,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, api_key: String, city: String) -> Self {
        WeatherClient { http, api_key, city }
    }

    pub async fn current(&self) -> Result<WeatherReport> {
        let resp = self
            .http
            .get(WEATHER_URL)
            .query(&[("q", self.city.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: WeatherResponse = resp.json().await?;
        let cond = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("weather response had no conditions"))?;

        Ok(WeatherReport {
            main: cond.main,
            description: cond.description,
            city: body.name,
        })
    }
}
