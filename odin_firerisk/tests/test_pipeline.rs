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

#![allow(unused)]

use async_trait::async_trait;
use odin_firms::{read_hotspots, RawHotspot};
use odin_landcover::{ConstSampler, LandCoverSampler, OdinLandCoverError, NON_BURNABLE};
use odin_openmeteo::{OdinOpenMeteoError, WeatherSample, WeatherSource};
use odin_firerisk::{
    model::{LinearModel, RiskScorer, Scaler},
    pipeline::{FireRiskPipeline, FireRiskSummary},
    FireRiskRecord, OdinFireRiskError, N_FEATURES, NEARBY_RADIUS_KM
};

const HOTSPOTS_CSV: &str = "\
latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
-33.71000,150.31000,340.0,0.39,0.36,2025-01-14,0312,N21,VIIRS,n,2.0NRT,290.1,5.0,D
-33.71040,150.31000,345.8,0.39,0.36,2025-01-14,0312,N21,VIIRS,h,2.0NRT,292.7,12.0,D
-25.10000,133.50000,331.2,0.45,0.39,2025-01-14,0454,N21,VIIRS,l,2.0NRT,288.0,2.0,D
-12.45000,131.01000,329.0,0.41,0.37,2025-01-14,0454,N21,VIIRS,n,2.0NRT,289.0,30.0,D
-35.00000,149.00000,333.3,0.40,0.38,2025-01-14,0312,N21,VIIRS,n,2.0NRT,287.5,3.0,D
-31.00000,116.00000,338.1,0.52,0.42,2025-01-14,0630,N21,VIIRS,n,2.0NRT,291.0,9.0,D
";

/// land cover codes for the test hotspots (in CSV order)
const LAND_COVER: [((f64,f64),u8);6] = [
    ((-33.71, 150.31), 5),     // mixed forest
    ((-33.7104, 150.31), 8),   // woody savannas
    ((-25.1, 133.5), 16),      // barren
    ((-12.45, 131.01), 0),     // unclassified
    ((-35.0, 149.0), 7),       // open shrublands
    ((-31.0, 116.0), 12),      // croplands
];

struct TableSampler;

#[async_trait]
impl LandCoverSampler for TableSampler {
    async fn sample (&self, lat: f64, lon: f64) -> odin_landcover::Result<Option<u8>> {
        Ok( LAND_COVER.iter().find( |(p,_)| *p == (lat,lon)).map( |(_,code)| *code) )
    }
}

/// fails for a single latitude
struct FlakyWeather { fail_lat: f64 }

#[async_trait]
impl WeatherSource for FlakyWeather {
    async fn get_weather (&self, lat: f64, lon: f64) -> odin_openmeteo::Result<WeatherSample> {
        if lat == self.fail_lat {
            Err( OdinOpenMeteoError::ResponseError("timeout".to_string()))
        } else {
            Ok( WeatherSample {
                precipitation: Some(0.0),
                relative_humidity: Some(18.0),
                soil_moisture: Some(0.12),
                solar_radiation: Some(850.0),
                temperature: Some(25.0),
                wind_speed: Some(22.5),
            })
        }
    }
}

fn hotspots()->Vec<RawHotspot> {
    read_hotspots( HOTSPOTS_CSV.as_bytes()).unwrap()
}

/// risk = 10*frp + temperature + 5*nearby
fn scorer()->RiskScorer<LinearModel> {
    let mut coefficients = vec![0.0; N_FEATURES];
    coefficients[1] = 10.0;
    coefficients[6] = 1.0;
    coefficients[8] = 5.0;
    RiskScorer::new( Scaler::Identity, LinearModel { coefficients, intercept: 0.0 }).unwrap()
}

fn pipeline<L: LandCoverSampler> (land_cover: L)->FireRiskPipeline<Vec<RawHotspot>,L,FlakyWeather,LinearModel> {
    FireRiskPipeline {
        hotspots: hotspots(),
        land_cover,
        non_burnable: NON_BURNABLE.to_vec(),
        weather: FlakyWeather { fail_lat: -31.0 },
        scorer: scorer(),
        nearby_radius_km: NEARBY_RADIUS_KM,
    }
}

#[tokio::test]
async fn test_pipeline() {
    let (records, summary) = pipeline( TableSampler).run().await.unwrap();
    println!("{summary}");
    for r in &records {
        println!("{:9.4} {:9.4} lc={:?} nearby={:?} risk={:?} weather={:?}", r.latitude(), r.longitude(), r.land_cover, r.nearby_hotspots, r.risk, r.weather);
    }

    assert_eq!( summary.n_hotspots, 6);
    assert_eq!( summary.n_burnable, 3);
    assert_eq!( summary.n_without_weather, 1);

    // only burnable land cover survives, in input order
    let land_cover: Vec<u8> = records.iter().filter_map( |r| r.land_cover).collect();
    assert_eq!( land_cover, vec![5, 8, 12]);
    assert!( records.iter().all( |r| !NON_BURNABLE.contains( &r.land_cover.unwrap())));

    // the first two hotspots are about 44m apart, the third one is isolated
    let nearby: Vec<u32> = records.iter().filter_map( |r| r.nearby_hotspots).collect();
    assert_eq!( nearby, vec![1, 1, 0]);

    // the weather failure only affects its own hotspot
    assert!( !records[0].weather.is_empty());
    assert!( !records[1].weather.is_empty());
    assert!( records[2].weather.is_empty());
    assert!( records[2].features()[2..8].iter().all( |x| x.is_nan()));

    let risk: Vec<f64> = records.iter().filter_map( |r| r.risk).collect();
    assert_eq!( risk, vec![80.0, 100.0, 90.0]); // the second one is clipped
    assert!( risk.iter().all( |r| (0.0..=100.0).contains(r)));
    assert_eq!( summary.risk.min, 80.0);
    assert_eq!( summary.risk.max, 100.0);
}

#[tokio::test]
async fn test_all_non_burnable() {
    let (records, summary) = pipeline( ConstSampler(Some(0))).run().await.unwrap();
    assert!( records.is_empty());
    assert_eq!( summary.n_hotspots, 6);
    assert_eq!( summary.n_burnable, 0);
    assert!( summary.risk.is_empty());
    println!("{summary}");
}

#[tokio::test]
async fn test_missing_land_cover() {
    // no land cover sample aborts the run
    match pipeline( ConstSampler(None)).run().await {
        Err(OdinFireRiskError::LandCoverError(OdinLandCoverError::NoSampleError(lat,lon))) => println!("got expected error for {lat},{lon}"),
        other => panic!("expected land cover error, got {other:?}")
    }
}

#[tokio::test]
async fn test_no_hotspots() {
    let mut p = pipeline( TableSampler);
    p.hotspots = Vec::new();

    let (records, summary) = p.run().await.unwrap();
    assert!( records.is_empty());
    assert_eq!( summary.n_hotspots, 0);
}

#[test]
fn test_features() {
    let mut rec = FireRiskRecord::from( hotspots().remove(0));
    let x = rec.features();
    assert_eq!( x[0], 340.0);
    assert_eq!( x[1], 5.0);
    assert!( x[2..].iter().all( |v| v.is_nan()));

    rec.nearby_hotspots = Some(3);
    rec.weather.temperature = Some(31.5);
    let x = rec.features();
    assert_eq!( x[6], 31.5);
    assert_eq!( x[8], 3.0);
}
