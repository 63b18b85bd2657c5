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

use std::{collections::HashMap, time::Duration};
use axum::{Router, Json, routing::get, extract::Query, http::StatusCode};
use serde_json::{json, Value};
use odin_openmeteo::*;

/// a stand-in for the Open-Meteo forecast endpoint:
///   lat >= 0 : regular forecast
///   lat < -60 : server error
///   otherwise : forecast with null/missing values
async fn forecast (Query(params): Query<HashMap<String,String>>)->(StatusCode,Json<Value>) {
    assert_eq!( params.get("timezone").map(|s| s.as_str()), Some("auto"));
    assert_eq!( params.get("hourly").map(|s| s.as_str()), 
                Some("precipitation,relative_humidity_2m,soil_moisture_3_9cm,shortwave_radiation,temperature_2m,windspeed_10m"));

    let lat: f64 = params.get("latitude").unwrap().parse().unwrap();
    if lat >= 0.0 {
        (StatusCode::OK, Json( json!({
            "latitude": lat,
            "hourly": {
                "time": ["2025-01-14T00:00", "2025-01-14T01:00"],
                "temperature_2m": [31.5, 30.2],
                "relative_humidity_2m": [18, 22],
                "precipitation": [0.0, 0.1],
                "soil_moisture_3_9cm": [0.052, 0.051],
                "shortwave_radiation": [812.0, 640.0],
                "windspeed_10m": [24.1, 19.8]
            }
        })))
    } else if lat < -60.0 {
        (StatusCode::INTERNAL_SERVER_ERROR, Json( json!({ "error": true, "reason": "internal" })))
    } else {
        (StatusCode::OK, Json( json!({
            "hourly": {
                "temperature_2m": [null, 30.2],
                "relative_humidity_2m": [],
                "precipitation": [0.4]
            }
        })))
    }
}

async fn spawn_server()->String {
    let app = Router::new().route( "/v1/forecast", get(forecast));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move { axum::serve( listener, app).await.unwrap() });
    format!("http://{addr}/v1/forecast")
}

fn client (base_url: String)->OpenMeteoClient {
    OpenMeteoClient::new( OpenMeteoConfig { base_url, timeout: Duration::from_secs(2) })
}

#[tokio::test]
async fn test_forecast() {
    let client = client( spawn_server().await);

    let ws = client.get_weather( 12.5, 131.0).await.unwrap();
    println!("{ws:?}");
    assert_eq!( ws.temperature, Some(31.5));
    assert_eq!( ws.relative_humidity, Some(18.0));
    assert_eq!( ws.precipitation, Some(0.0));
    assert_eq!( ws.soil_moisture, Some(0.052));
    assert_eq!( ws.solar_radiation, Some(812.0));
    assert_eq!( ws.wind_speed, Some(24.1));
}

#[tokio::test]
async fn test_partial_forecast() {
    let client = client( spawn_server().await);

    let ws = client.get_weather( -33.8, 151.2).await.unwrap();
    println!("{ws:?}");
    assert_eq!( ws.temperature, None);        // null first value
    assert_eq!( ws.relative_humidity, None);  // empty array
    assert_eq!( ws.precipitation, Some(0.4));
    assert_eq!( ws.wind_speed, None);         // missing
}

#[tokio::test]
async fn test_degraded_forecast() {
    let client = client( spawn_server().await);

    assert!( client.get_weather( -70.0, 0.0).await.is_err());

    // failure for one position does not affect the others
    let results = vec![
        client.get_weather_or_empty( 10.0, 131.0).await,
        client.get_weather_or_empty( -70.0, 0.0).await,
        client.get_weather_or_empty( 11.0, 131.0).await,
    ];
    assert!( !results[0].is_empty());
    assert!( results[1].is_empty());
    assert!( !results[2].is_empty());
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = client( "http://127.0.0.1:1/v1/forecast".to_string());
    let ws = client.get_weather_or_empty( -33.8, 151.2).await;
    assert_eq!( ws, WeatherSample::empty());
    assert_eq!( ws.values(), [None;6]);
}

#[test]
fn test_config() {
    let path = std::path::Path::new( env!("CARGO_MANIFEST_DIR")).join("configs/openmeteo.ron");
    let config: OpenMeteoConfig = odin_build::load_config_path( &path).unwrap();
    assert_eq!( config.timeout, Duration::from_secs(10));
    assert_eq!( config.base_url, "https://api.open-meteo.com/v1/forecast");
}
