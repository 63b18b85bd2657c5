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

//! land cover sampling through the Google Earth Engine REST API (https://developers.google.com/earth-engine/reference/rest).
//! Each sample is a `value:compute` request for the expression graph
//! `Image.load(asset).select(band).reduceRegion(Reducer.first(), Point(lon,lat), scale).get(band)`

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use odin_common::{fs::EnvString, net::post_json_query};
use crate::{LandCoverSampler, OdinLandCoverError, Result};

#[derive(Debug,Clone,Deserialize)]
pub struct EarthEngineConfig {
    #[serde(default="default_base_url")]
    pub base_url: String,
    pub project: String,
    pub token: EnvString, // OAuth2 access token
    #[serde(default="default_asset")]
    pub asset: String,
    #[serde(default="default_band")]
    pub band: String,
    #[serde(default="default_scale")]
    pub scale: f64, // meters
}

fn default_base_url()->String { "https://earthengine.googleapis.com/v1".to_string() }
fn default_asset()->String { "MODIS/006/MCD12Q1/2019_01_01".to_string() }
fn default_band()->String { "LC_Type1".to_string() }
fn default_scale()->f64 { 500.0 }

pub struct EarthEngineSampler {
    config: EarthEngineConfig,
    client: Client
}

impl EarthEngineSampler {
    pub fn new (config: EarthEngineConfig)->Self {
        EarthEngineSampler { config, client: Client::new() }
    }

    pub fn compute_url (&self)->String {
        format!("{}/projects/{}/value:compute", self.config.base_url.trim_end_matches('/'), self.config.project)
    }

    /// the serialized Earth Engine expression graph for a point sample
    pub fn sample_expression (&self, lat: f64, lon: f64)->Value {
        let cfg = &self.config;
        let image = json!({ "functionInvocationValue": {
            "functionName": "Image.select",
            "arguments": {
                "input": { "functionInvocationValue": {
                    "functionName": "Image.load",
                    "arguments": { "id": { "constantValue": cfg.asset } }
                }},
                "bandSelectors": { "constantValue": [ cfg.band ] }
            }
        }});
        let point = json!({ "functionInvocationValue": {
            "functionName": "GeometryConstructors.Point",
            "arguments": { "coordinates": { "constantValue": [ lon, lat ] } }
        }});
        let reduced = json!({ "functionInvocationValue": {
            "functionName": "Image.reduceRegion",
            "arguments": {
                "image": image,
                "reducer": { "functionInvocationValue": { "functionName": "Reducer.first", "arguments": {} } },
                "geometry": point,
                "scale": { "constantValue": cfg.scale }
            }
        }});

        json!({
            "expression": {
                "result": "0",
                "values": {
                    "0": { "functionInvocationValue": {
                        "functionName": "Dictionary.get",
                        "arguments": {
                            "dictionary": reduced,
                            "key": { "constantValue": cfg.band }
                        }
                    }}
                }
            }
        })
    }
}

#[derive(Debug,Deserialize)]
struct ComputeValueResponse {
    #[serde(default)]
    result: Value
}

/// the result is a JSON number (possibly a float for some reducers) or null if there is no pixel
fn class_code (v: &Value) -> Result<Option<u8>> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let x = n.as_f64().ok_or_else( || OdinLandCoverError::ResponseError(n.to_string()))?;
            if x >= 0.0 && x <= u8::MAX as f64 {
                Ok( Some( x.round() as u8) )
            } else {
                Err( OdinLandCoverError::ResponseError(n.to_string()) )
            }
        }
        other => Err( OdinLandCoverError::ResponseError(other.to_string()) )
    }
}

#[async_trait]
impl LandCoverSampler for EarthEngineSampler {
    async fn sample (&self, lat: f64, lon: f64) -> Result<Option<u8>> {
        let query = self.sample_expression( lat, lon);
        let response: ComputeValueResponse = post_json_query( &self.client, &self.compute_url(), &query, Some(self.config.token.as_str())).await?;
        class_code( &response.result)
    }
}
