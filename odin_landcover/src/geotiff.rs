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

//! offline land cover sampling from a single band GeoTIFF (e.g. an Earth Engine export of MCD12Q1 LC_Type1).
//! We only support north-up rasters in geographic (lon/lat degree) coordinates that are georeferenced by
//! ModelPixelScale and ModelTiepoint tags, which is what GDAL and Earth Engine write for EPSG:4326 exports

use std::{fs::File, io::BufReader};
use async_trait::async_trait;
use serde::Deserialize;
use tiff::{decoder::{Decoder, DecodingResult}, tags::Tag};
use tracing::info;

use odin_common::{fs::EnvPathBuf, error_with};
use crate::{LandCoverSampler, OdinLandCoverError, Result};

#[derive(Debug,Clone,Deserialize)]
pub struct GeoTiffConfig {
    pub path: EnvPathBuf,
    #[serde(default)]
    pub nodata: Option<u8>
}

#[derive(Debug)]
pub struct GeoTiffSampler {
    width: usize,
    height: usize,
    data: Vec<u8>,
    west: f64,  // lon of upper left pixel corner
    north: f64, // lat of upper left pixel corner
    dx: f64,    // pixel width in degrees
    dy: f64,    // pixel height in degrees
    nodata: Option<u8>
}

impl GeoTiffSampler {
    /// create sampler from raw (row major) raster data
    pub fn from_raster (width: usize, height: usize, data: Vec<u8>, west: f64, north: f64, dx: f64, dy: f64, nodata: Option<u8>)->Result<Self> {
        if data.len() != width * height {
            return Err( error_with!( OdinLandCoverError::RasterError, "data length {} does not match {}x{}", data.len(), width, height))
        }
        if !(dx > 0.0 && dy > 0.0) {
            return Err( error_with!( OdinLandCoverError::RasterError, "invalid pixel size {}x{}", dx, dy))
        }
        Ok( GeoTiffSampler { width, height, data, west, north, dx, dy, nodata } )
    }

    pub fn open (config: &GeoTiffConfig)->Result<Self> {
        let file = File::open( &config.path)?;
        let mut decoder = Decoder::new( BufReader::new(file))?;
        let (width, height) = decoder.dimensions()?;
        let (width, height) = (width as usize, height as usize);

        let scale = decoder.get_tag_f64_vec( Tag::ModelPixelScaleTag)?;
        let tiepoint = decoder.get_tag_f64_vec( Tag::ModelTiepointTag)?;
        if scale.len() < 2 || tiepoint.len() < 6 {
            return Err( OdinLandCoverError::RasterError("incomplete georeference tags".to_string()))
        }

        // tiepoint maps raster (i,j) to model (x,y)
        let (dx, dy) = (scale[0], scale[1]);
        let west = tiepoint[3] - tiepoint[0] * dx;
        let north = tiepoint[4] + tiepoint[1] * dy;

        let data: Vec<u8> = match decoder.read_image()? {
            DecodingResult::U8(v) => v,
            DecodingResult::U16(v) => v.into_iter().map( |x| x.min(u8::MAX as u16) as u8).collect(),
            DecodingResult::I16(v) => v.into_iter().map( |x| x.clamp(0, u8::MAX as i16) as u8).collect(),
            _ => return Err( OdinLandCoverError::RasterError("unsupported sample format".to_string()))
        };

        info!("loaded {}x{} land cover raster from {:?}", width, height, config.path);
        Self::from_raster( width, height, data, west, north, dx, dy, config.nodata)
    }

    /// nearest pixel value for given position, None if outside of raster or nodata
    pub fn value_at (&self, lat: f64, lon: f64)->Option<u8> {
        let col = ((lon - self.west) / self.dx).floor();
        let row = ((self.north - lat) / self.dy).floor();

        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None
        }

        let v = self.data[ row as usize * self.width + col as usize];
        if Some(v) == self.nodata { None } else { Some(v) }
    }
}

#[async_trait]
impl LandCoverSampler for GeoTiffSampler {
    async fn sample (&self, lat: f64, lon: f64) -> Result<Option<u8>> {
        Ok( self.value_at( lat, lon) )
    }
}
