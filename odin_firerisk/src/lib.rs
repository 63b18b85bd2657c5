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

//! wildfire risk estimation for active fire hotspots. The pipeline
//!   1. retrieves current hotspots from FIRMS
//!   2. drops hotspots on non-burnable land cover
//!   3. adds the current weather at each hotspot position
//!   4. counts the neighbors of each hotspot
//!   5. scores the hotspots with a pre-trained (scaler, regression model) pair
//! 
//! and stores the results as a CSV file that can be displayed by map clients

use chrono_tz::Tz;
use serde::{Serialize,Deserialize};

use odin_build::define_load_config;
use odin_common::{datetime::deserialize_tz, fs::EnvPathBuf};
use odin_firms::{FirmsConfig, RawHotspot};
use odin_landcover::{LandCoverConfig, LandCoverTarget};
use odin_openmeteo::{OpenMeteoConfig, WeatherSample};

pub mod errors;
pub use errors::{Result, OdinFireRiskError};

pub mod nearby;
pub mod model;
pub mod xgboost;
#[cfg(feature="onnx")]
pub mod onnx;
pub mod pipeline;
pub mod output;

use model::ModelConfig;

define_load_config!{}

/// default radius for the nearby hotspot count
pub const NEARBY_RADIUS_KM: f64 = 0.1;

/// the names of the risk model features, in the order in which the models were trained.
/// "SolarWaterContent" is the volumetric soil moisture
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "bright_ti4",
    "frp",
    "Precipitation",
    "RelativeHumidity",
    "SolarWaterContent",
    "SolarRadiation",
    "Temperature",
    "WindSpeed",
    "NearbyHotspots",
];

pub const N_FEATURES: usize = 9;

#[derive(Debug,Deserialize)]
pub struct FireRiskConfig {
    pub firms: FirmsConfig,
    pub land_cover: LandCoverConfig,
    #[serde(default)]
    pub weather: OpenMeteoConfig,
    pub model: ModelConfig,

    #[serde(default="default_nearby_radius")]
    pub nearby_radius_km: f64,

    /// the timezone for output file timestamps
    #[serde(default="default_timezone", deserialize_with="deserialize_tz")]
    pub timezone: Tz,

    #[serde(default)]
    pub output_dir: Option<EnvPathBuf>,
}

fn default_nearby_radius()->f64 { NEARBY_RADIUS_KM }
fn default_timezone()->Tz { chrono_tz::Australia::Sydney }

/// a single hotspot as it moves through the pipeline stages
#[derive(Debug,Clone,Serialize)]
pub struct FireRiskRecord {
    pub hotspot: RawHotspot,
    pub land_cover: Option<u8>,
    pub weather: WeatherSample,
    pub nearby_hotspots: Option<u32>,
    pub risk: Option<f64>,
}

impl FireRiskRecord {
    pub fn latitude (&self)->f64 { self.hotspot.latitude }
    pub fn longitude (&self)->f64 { self.hotspot.longitude }

    /// the model input vector in `FEATURE_NAMES` order. Missing values are NaN
    pub fn features (&self)->[f64; N_FEATURES] {
        let w = &self.weather;
        let v = |o: Option<f64>| o.unwrap_or(f64::NAN);

        [
            self.hotspot.bright_ti4,
            self.hotspot.frp,
            v(w.precipitation),
            v(w.relative_humidity),
            v(w.soil_moisture),
            v(w.solar_radiation),
            v(w.temperature),
            v(w.wind_speed),
            self.nearby_hotspots.map( |n| n as f64).unwrap_or(f64::NAN),
        ]
    }
}

impl From<RawHotspot> for FireRiskRecord {
    fn from (hotspot: RawHotspot)->Self {
        FireRiskRecord { hotspot, land_cover: None, weather: WeatherSample::empty(), nearby_hotspots: None, risk: None }
    }
}

impl LandCoverTarget for FireRiskRecord {
    fn position (&self)->(f64,f64) { (self.hotspot.latitude, self.hotspot.longitude) }

    fn set_land_cover (&mut self, code: u8) { self.land_cover = Some(code) }
}
