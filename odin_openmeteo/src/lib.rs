/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! short range weather forecasts for hotspot positions from the Open-Meteo forecast API (https://open-meteo.com/en/docs).
//! We only use the first hour of the hourly forecast, i.e. this is a "current conditions" estimate

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use serde_json::Value;
use tracing::warn;

use odin_build::define_load_config;
use odin_common::{define_error, datetime::deserialize_duration, net::{get_json_query, OdinNetError}};

define_load_config!{}

define_error!{ pub OdinOpenMeteoError = 
    NetError(#[from] OdinNetError) : "net error {0}",
    ResponseError(String) : "invalid Open-Meteo response {0}"
}

pub type Result<T> = std::result::Result<T, OdinOpenMeteoError>;

/// the hourly variables we request, in the order of the `WeatherSample` fields
pub const HOURLY_VARIABLES: [&str;6] = [
    "precipitation",
    "relative_humidity_2m",
    "soil_moisture_3_9cm",
    "shortwave_radiation",
    "temperature_2m",
    "windspeed_10m",
];

#[derive(Debug,Clone,Deserialize)]
pub struct OpenMeteoConfig {
    #[serde(default="default_base_url")]
    pub base_url: String,
    #[serde(default="default_timeout",deserialize_with="deserialize_duration")]
    pub timeout: Duration
}

fn default_base_url()->String { "https://api.open-meteo.com/v1/forecast".to_string() }
fn default_timeout()->Duration { Duration::from_secs(10) }

impl Default for OpenMeteoConfig {
    fn default()->Self {
        OpenMeteoConfig { base_url: default_base_url(), timeout: default_timeout() }
    }
}

/// the weather attributes we use as risk features. Each one is optional since the forecast might not
/// provide it for a given location, or the whole request might have failed
#[derive(Debug,Clone,Copy,Default,PartialEq,Serialize,Deserialize)]
pub struct WeatherSample {
    pub precipitation: Option<f64>,     // mm (preceding hour sum)
    pub relative_humidity: Option<f64>, // % at 2m
    pub soil_moisture: Option<f64>,     // m³/m³ at 3-9cm depth
    pub solar_radiation: Option<f64>,   // shortwave W/m²
    pub temperature: Option<f64>,       // °C at 2m
    pub wind_speed: Option<f64>,        // km/h at 10m
}

impl WeatherSample {
    pub fn empty()->Self { WeatherSample::default() }

    pub fn is_empty (&self)->bool { *self == WeatherSample::default() }

    /// field values in `HOURLY_VARIABLES` order
    pub fn values (&self)->[Option<f64>;6] {
        [ self.precipitation, self.relative_humidity, self.soil_moisture, self.solar_radiation, self.temperature, self.wind_speed ]
    }

    /// extract the first hour values from the "hourly" object of a forecast response.
    /// Missing arrays, empty arrays and null values map to None for the respective field
    pub fn from_hourly (hourly: &Value)->Self {
        let first = |name: &str| -> Option<f64> {
            hourly.get(name).and_then( |a| a.as_array()).and_then( |a| a.first()).and_then( |v| v.as_f64())
        };

        WeatherSample {
            precipitation: first("precipitation"),
            relative_humidity: first("relative_humidity_2m"),
            soil_moisture: first("soil_moisture_3_9cm"),
            solar_radiation: first("shortwave_radiation"),
            temperature: first("temperature_2m"),
            wind_speed: first("windspeed_10m"),
        }
    }
}

/// something that provides current weather estimates for positions
#[async_trait]
pub trait WeatherSource {
    async fn get_weather (&self, lat: f64, lon: f64) -> Result<WeatherSample>;

    /// the degrading version of `get_weather`: errors for a position only result in an empty sample for that position
    async fn get_weather_or_empty (&self, lat: f64, lon: f64) -> WeatherSample {
        match self.get_weather( lat, lon).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("no weather for {lat},{lon}: {e}");
                WeatherSample::empty()
            }
        }
    }
}

pub struct OpenMeteoClient {
    config: OpenMeteoConfig,
    client: Client
}

impl OpenMeteoClient {
    pub fn new (config: OpenMeteoConfig)->Self {
        OpenMeteoClient { config, client: Client::new() }
    }

    pub fn query (lat: f64, lon: f64)->Vec<(&'static str,String)> {
        vec![
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("hourly", HOURLY_VARIABLES.join(",")),
            ("timezone", "auto".to_string()),
        ]
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn get_weather (&self, lat: f64, lon: f64) -> Result<WeatherSample> {
        let response: Value = get_json_query( &self.client, &self.config.base_url, &Self::query(lat,lon), Some(self.config.timeout)).await?;

        match response.get("hourly") {
            Some(hourly) if hourly.is_object() => Ok( WeatherSample::from_hourly( hourly) ),
            _ => { // Open-Meteo reports errors as {"error":true,"reason":".."}
                let reason = response.get("reason").and_then(|r| r.as_str()).unwrap_or("no hourly data");
                Err( OdinOpenMeteoError::ResponseError( reason.to_string()))
            }
        }
    }
}
