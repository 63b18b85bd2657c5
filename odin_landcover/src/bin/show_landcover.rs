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

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use odin_common::define_cli;
use odin_landcover::{create_sampler, load_config, LandCoverClass, LandCoverConfig, LandCoverSampler};

define_cli! { ARGS [about="show land cover classes for given positions"] =
    config: String [help="filename of land cover config", short, long, default_value="landcover.ron"],
    positions: Vec<String> [help="positions as <lat>,<lon> degrees (e.g. -33.8688,151.2093)", required=true, allow_hyphen_values=true]
}

fn parse_position (s: &str)->Result<(f64,f64)> {
    let (lat,lon) = s.split_once(',').ok_or_else( || anyhow!("position not in <lat>,<lon> format: {s}"))?;
    Ok( (lat.trim().parse()?, lon.trim().parse()?) )
}

#[tokio::main(flavor="current_thread")]
async fn main() -> Result<()> {
    odin_build::set_bin_context!();
    tracing_subscriber::fmt().with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let config: LandCoverConfig = load_config( &ARGS.config)?;
    let sampler = create_sampler( &config.sampler)?;

    for pos in &ARGS.positions {
        let (lat,lon) = parse_position( pos)?;
        match sampler.sample( lat, lon).await? {
            Some(code) => {
                let burnable = if config.is_burnable(code) { "burnable" } else { "non-burnable" };
                match LandCoverClass::from_code(code) {
                    Some(lc) => println!("{lat:9.4},{lon:9.4} : {lc} {burnable}"),
                    None => println!("{lat:9.4},{lon:9.4} : {code} (unknown class) {burnable}")
                }
            }
            None => println!("{lat:9.4},{lon:9.4} : no data")
        }
    }

    Ok(())
}
