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

use std::time::Duration;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use odin_common::datetime::*;

#[derive(Deserialize)]
struct TestConfig {
    #[serde(deserialize_with="deserialize_duration")]
    timeout: Duration,
    #[serde(deserialize_with="deserialize_tz")]
    timezone: Tz,
}

#[test]
fn test_compact_timestamp() {
    let dt = Utc.with_ymd_and_hms( 2025, 7, 4, 15, 30, 0).unwrap();
    assert_eq!( compact_timestamp( &dt), "20250704153000");

    let sydney = parse_tz("Australia/Sydney").unwrap();
    let ts = compact_timestamp_in( &dt, &sydney);
    println!("{dt} in Sydney: {ts}");
    assert_eq!( ts, "20250705013000");

    assert!( parse_tz("Australia/Atlantis").is_none());
}

#[test]
fn test_config_values() {
    let config: TestConfig = ron::from_str( r#"(timeout: "10s", timezone: "Australia/Perth")"#).unwrap();
    assert_eq!( config.timeout, Duration::from_secs(10));
    assert_eq!( config.timezone, chrono_tz::Australia::Perth);

    let res: Result<TestConfig,_> = ron::from_str( r#"(timeout: "10s", timezone: "Mars/Olympus")"#);
    assert!( res.is_err());
}
