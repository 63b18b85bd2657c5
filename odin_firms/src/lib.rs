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

//! a crate that imports active fire hotspots from NASAs Fire Information for Resource Management System (FIRMS).
//! see https://firms.modaps.eosdis.nasa.gov/api/area/ for the area API and
//! https://www.earthdata.nasa.gov/data/instruments/viirs/viirs-i-band-375-m-active-fire-data for field descriptions.
//! Both VIIRS and MODIS products are supported

use std::{fs::File, io, path::{Path,PathBuf}};
use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use reqwest::Client;
use tracing::{info,debug};

use odin_build::define_load_config;
use odin_common::{
    datetime::{compact_timestamp, utc_now},
    fs::{EnvString, ensure_writable_dir},
    geo::{GeoPoint, GeoRect},
    net::{download_url, get_text},
    error_with
};

pub mod errors;
use errors::OdinFirmsError;
pub use errors::Result;

define_load_config!{}

/// the FIRMS area API only supports full day ranges
pub const MAX_DAY_RANGE: u8 = 10;

#[derive(Debug,Clone,Deserialize)]
pub struct FirmsConfig {
    #[serde(default="default_base_url")]
    pub base_url: String,
    pub map_key: EnvString, // keep this private - it is rate limited
    #[serde(default="default_source")]
    pub source: String,
    pub bounds: GeoRect,
    #[serde(default="default_n_days")]
    pub n_days: u8
}

fn default_base_url()->String { "https://firms.modaps.eosdis.nasa.gov".to_string() }
fn default_source()->String { "VIIRS_NOAA21_NRT".to_string() }
fn default_n_days()->u8 { 1 }

/// the raw record format of the FIRMS CSV products.
/// MODIS products use "brightness" and "bright_t31" instead of the VIIRS "bright_ti4" and "bright_ti5" columns,
/// which we map onto the VIIRS names. Confidence is nominal/low/high for VIIRS and a 0-100 percentage for MODIS
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RawHotspot {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(alias="brightness")]
    pub bright_ti4: f64,
    #[serde(default)]
    pub scan: Option<f64>,
    #[serde(default)]
    pub track: Option<f64>,
    pub acq_date: String,
    pub acq_time: u32, // hhmm UTC
    #[serde(default)]
    pub satellite: String,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(alias="bright_t31", default)]
    pub bright_ti5: Option<f64>,
    pub frp: f64,
    #[serde(default)]
    pub daynight: String
}

impl RawHotspot {
    pub fn position (&self)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( self.longitude, self.latitude)
    }
}

/// parse FIRMS CSV data. Note that FIRMS reports errors such as invalid map keys as plain text with a 200 status,
/// which is why we require the position columns to be present in the header
pub fn read_hotspots (reader: impl io::Read) -> Result<Vec<RawHotspot>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !(headers.iter().any(|h| h == "latitude") && headers.iter().any(|h| h == "longitude")) {
        let text: Vec<&str> = headers.iter().collect();
        return Err( error_with!( OdinFirmsError::FormatError, "{}", text.join(",")) )
    }

    let mut hotspots = Vec::new();
    for res in csv_reader.deserialize() {
        let hs: RawHotspot = res?;
        hotspots.push(hs);
    }
    Ok(hotspots)
}

pub fn read_hotspot_file (path: impl AsRef<Path>) -> Result<Vec<RawHotspot>> {
    let file = File::open( path)?;
    read_hotspots( file)
}

/// something that produces the hotspot records for a single risk estimation run
#[async_trait]
pub trait HotspotSource {
    async fn get_hotspots (&self) -> Result<Vec<RawHotspot>>;
}

/* #region FirmsClient ***********************************************************************************************/

pub struct FirmsClient {
    config: FirmsConfig,
    client: Client
}

impl FirmsClient {
    pub fn new (config: FirmsConfig)->Result<Self> {
        if config.n_days < 1 || config.n_days > MAX_DAY_RANGE {
            return Err( error_with!( OdinFirmsError::ConfigError, "day range {} not in 1..={}", config.n_days, MAX_DAY_RANGE))
        }
        if config.map_key.is_empty() {
            return Err( OdinFirmsError::ConfigError("no map key".to_string()))
        }
        Ok( FirmsClient { config, client: Client::new() } )
    }

    pub fn config (&self)->&FirmsConfig { &self.config }

    /// according to https://firms.modaps.eosdis.nasa.gov/api/area/
    ///   [BASE_URL]/api/area/csv/[MAP_KEY]/[SOURCE]/[AREA_COORDINATES]/[DAY_RANGE]
    ///    e.g. /api/area/csv/534b391abcdf3cf5969cb7ec8ce07de5/VIIRS_NOAA21_NRT/112.9,-43.7,153.6,-10.7/1
    pub fn area_url (&self)->String {
        let bbox = &self.config.bounds;
        format!( "{}/api/area/csv/{}/{}/{},{},{},{}/{}", 
                self.config.base_url.trim_end_matches('/'), self.config.map_key.as_str(), self.config.source,
                bbox.west(), bbox.south(), bbox.east(), bbox.north(), self.config.n_days)
    }

    /// retrieve and parse the current hotspots without storing them
    pub async fn fetch_hotspots (&self) -> Result<Vec<RawHotspot>> {
        info!("fetching {} hotspots for {}", self.config.source, self.config.bounds);
        let text = get_text( &self.client, &self.area_url()).await?;
        let hotspots = read_hotspots( text.as_bytes())?;
        info!("received {} hotspots", hotspots.len());
        Ok(hotspots)
    }

    /// download the current hotspots into a timestamped CSV file within the given dir and return its path
    pub async fn download_hotspots (&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        ensure_writable_dir( dir)?;

        let path = dir.join( format!("{}_{}.csv", self.config.source, compact_timestamp( &utc_now())));
        let len = download_url( &self.client, &self.area_url(), &None, &path).await?;
        debug!("downloaded {} bytes to {:?}", len, path);

        Ok(path)
    }
}

#[async_trait]
impl HotspotSource for FirmsClient {
    async fn get_hotspots (&self) -> Result<Vec<RawHotspot>> {
        self.fetch_hotspots().await
    }
}

/* #endregion FirmsClient */

/// a previously downloaded FIRMS CSV file
pub struct FirmsFile {
    pub path: PathBuf
}

#[async_trait]
impl HotspotSource for FirmsFile {
    async fn get_hotspots (&self) -> Result<Vec<RawHotspot>> {
        info!("reading hotspots from {:?}", self.path);
        read_hotspot_file( &self.path)
    }
}

/// in-memory hotspots (mostly for testing and replay)
#[async_trait]
impl HotspotSource for Vec<RawHotspot> {
    async fn get_hotspots (&self) -> Result<Vec<RawHotspot>> {
        Ok( self.clone() )
    }
}

pub type BoxedHotspotSource = Box<dyn HotspotSource + Send + Sync>;

#[async_trait]
impl HotspotSource for BoxedHotspotSource {
    async fn get_hotspots (&self) -> Result<Vec<RawHotspot>> {
        (**self).get_hotspots().await
    }
}
