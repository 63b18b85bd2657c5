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

//! land cover classification of hotspot positions. We use the MODIS MCD12Q1 `LC_Type1` band, which holds
//! International Geosphere-Biosphere Programme (IGBP) classes, to remove hotspots that are located on land cover
//! types that do not burn (water, urban, snow/ice, barren..) and hence are most likely industrial heat sources
//! or false positives

use std::fmt;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info,debug};

use odin_build::define_load_config;

pub mod errors;
pub use errors::{Result,OdinLandCoverError};

mod earth_engine;
pub use earth_engine::*;

mod geotiff;
pub use geotiff::*;

define_load_config!{}

/// the default set of (IGBP) land cover codes on which we don't expect wildfires
pub const NON_BURNABLE: [u8;6] = [0, 7, 11, 13, 15, 16];

/// MODIS MCD12Q1 LC_Type1 (IGBP) land cover classes
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum LandCoverClass {
    Unclassified = 0,
    EvergreenNeedleleafForest = 1,
    EvergreenBroadleafForest = 2,
    DeciduousNeedleleafForest = 3,
    DeciduousBroadleafForest = 4,
    MixedForest = 5,
    ClosedShrubland = 6,
    OpenShrubland = 7,
    WoodySavanna = 8,
    Savanna = 9,
    Grassland = 10,
    PermanentWetland = 11,
    Cropland = 12,
    UrbanAndBuiltUp = 13,
    CroplandNaturalMosaic = 14,
    SnowAndIce = 15,
    Barren = 16,
    WaterBodies = 17,
}

impl LandCoverClass {
    pub fn from_code (code: u8)->Option<Self> {
        use LandCoverClass::*;
        let lc = match code {
            0 => Unclassified,
            1 => EvergreenNeedleleafForest,
            2 => EvergreenBroadleafForest,
            3 => DeciduousNeedleleafForest,
            4 => DeciduousBroadleafForest,
            5 => MixedForest,
            6 => ClosedShrubland,
            7 => OpenShrubland,
            8 => WoodySavanna,
            9 => Savanna,
            10 => Grassland,
            11 => PermanentWetland,
            12 => Cropland,
            13 => UrbanAndBuiltUp,
            14 => CroplandNaturalMosaic,
            15 => SnowAndIce,
            16 => Barren,
            17 => WaterBodies,
            _ => return None
        };
        Some(lc)
    }

    pub fn code (&self)->u8 { *self as u8 }

    pub fn description (&self)->&'static str {
        use LandCoverClass::*;
        match self {
            Unclassified => "unclassified",
            EvergreenNeedleleafForest => "evergreen needleleaf forest",
            EvergreenBroadleafForest => "evergreen broadleaf forest",
            DeciduousNeedleleafForest => "deciduous needleleaf forest",
            DeciduousBroadleafForest => "deciduous broadleaf forest",
            MixedForest => "mixed forest",
            ClosedShrubland => "closed shrubland",
            OpenShrubland => "open shrubland",
            WoodySavanna => "woody savanna",
            Savanna => "savanna",
            Grassland => "grassland",
            PermanentWetland => "permanent wetland",
            Cropland => "cropland",
            UrbanAndBuiltUp => "urban and built-up land",
            CroplandNaturalMosaic => "cropland/natural vegetation mosaic",
            SnowAndIce => "permanent snow and ice",
            Barren => "barren",
            WaterBodies => "water bodies",
        }
    }
}

impl fmt::Display for LandCoverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

#[derive(Debug,Deserialize)]
pub struct LandCoverConfig {
    pub sampler: SamplerConfig,
    #[serde(default="default_non_burnable")]
    pub non_burnable: Vec<u8>,
}

fn default_non_burnable()->Vec<u8> { NON_BURNABLE.to_vec() }

impl LandCoverConfig {
    pub fn is_burnable (&self, code: u8)->bool {
        !self.non_burnable.contains(&code)
    }
}

#[derive(Debug,Deserialize)]
pub enum SamplerConfig {
    EarthEngine(EarthEngineConfig),
    GeoTiff(GeoTiffConfig)
}

pub fn is_burnable (code: u8)->bool {
    !NON_BURNABLE.contains(&code)
}

/// something that can look up the land cover class code for a given position.
/// `Ok(None)` means the source has no data for this position
#[async_trait]
pub trait LandCoverSampler {
    async fn sample (&self, lat: f64, lon: f64) -> Result<Option<u8>>;
}

pub type BoxedLandCoverSampler = Box<dyn LandCoverSampler + Send + Sync>;

#[async_trait]
impl LandCoverSampler for BoxedLandCoverSampler {
    async fn sample (&self, lat: f64, lon: f64) -> Result<Option<u8>> {
        (**self).sample( lat, lon).await
    }
}

pub fn create_sampler (config: &SamplerConfig)->Result<BoxedLandCoverSampler> {
    match config {
        SamplerConfig::EarthEngine(conf) => Ok( Box::new( EarthEngineSampler::new( conf.clone())) ),
        SamplerConfig::GeoTiff(conf) => Ok( Box::new( GeoTiffSampler::open( conf)?) )
    }
}

/// records that can be classified and filtered by land cover
pub trait LandCoverTarget {
    /// (lat,lon) in degrees
    fn position (&self)->(f64,f64);
    fn set_land_cover (&mut self, code: u8);
}

/// sample land cover class for each record (in order), store it and drop records with codes in the `non_burnable` set.
/// Failed and empty samples abort the whole operation
pub async fn filter_burnable<T,S> (records: Vec<T>, sampler: &S, non_burnable: &[u8]) -> Result<Vec<T>> 
    where T: LandCoverTarget, S: LandCoverSampler + ?Sized
{
    let n = records.len();
    let mut burnable = Vec::with_capacity(n);

    for mut rec in records {
        let (lat,lon) = rec.position();
        let code = sampler.sample( lat, lon).await?.ok_or( OdinLandCoverError::NoSampleError(lat,lon))?;
        debug!("land cover at {lat},{lon}: {code}");

        if !non_burnable.contains(&code) {
            rec.set_land_cover(code);
            burnable.push(rec);
        }
    }

    info!("{} of {} hotspots on burnable land cover", burnable.len(), n);
    Ok(burnable)
}

/// a fixed land cover code for all positions. Useful for regions with known homogeneous land cover and for testing
pub struct ConstSampler(pub Option<u8>);

#[async_trait]
impl LandCoverSampler for ConstSampler {
    async fn sample (&self, _lat: f64, _lon: f64) -> Result<Option<u8>> {
        Ok(self.0)
    }
}
