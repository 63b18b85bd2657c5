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

use odin_firerisk::{load_config, model::ModelKind, FireRiskConfig, NEARBY_RADIUS_KM};
use odin_landcover::SamplerConfig;

#[test]
fn test_fire_risk_config() {
    unsafe {
        std::env::set_var( "FIRMS_MAP_KEY", "0123456789abcdef");
        std::env::set_var( "EE_ACCESS_TOKEN", "ya29.test");
    }

    let config: FireRiskConfig = load_config( "fire_risk.ron").unwrap();
    println!("{config:#?}");

    assert_eq!( config.firms.map_key.as_str(), "0123456789abcdef");
    assert_eq!( config.firms.n_days, 1);
    assert!( matches!( config.land_cover.sampler, SamplerConfig::EarthEngine(_)));
    assert_eq!( config.land_cover.non_burnable, vec![0, 7, 11, 13, 15, 16]);
    assert_eq!( config.model.kind, Some(ModelKind::XGBoost));
    assert!( config.model.model.ends_with("xgb_wildfire_model.json"));
    assert_eq!( config.nearby_radius_km, NEARBY_RADIUS_KM);
    assert_eq!( config.timezone, chrono_tz::Australia::Sydney);
    assert!( config.output_dir.is_none());
}
