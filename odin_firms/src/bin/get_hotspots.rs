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

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use odin_build::pkg_cache_dir;
use odin_common::{define_cli, MinMaxAvg};
use odin_firms::{load_config, read_hotspot_file, FirmsClient, FirmsConfig};

define_cli! { ARGS [about="download FIRMS hotspots for a configured region and print a summary"] =
    config: String [help="filename of FIRMS config", short, long, default_value="firms.ron"],
    n_days: Option<u8> [help="override the configured day range (1-10)", long],
    list: bool [help="print all downloaded hotspots", long]
}

#[tokio::main(flavor="current_thread")]
async fn main() -> Result<()> {
    odin_build::set_bin_context!();
    tracing_subscriber::fmt().with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let mut config: FirmsConfig = load_config( &ARGS.config)?;
    if let Some(n_days) = ARGS.n_days { config.n_days = n_days }

    let client = FirmsClient::new( config)?;
    let path = client.download_hotspots( pkg_cache_dir!()).await?;
    let hotspots = read_hotspot_file( &path)?;

    println!("{} hotspots stored in {:?}", hotspots.len(), path);
    if !hotspots.is_empty() {
        let frp: MinMaxAvg = hotspots.iter().map(|hs| hs.frp).collect();
        println!("frp [MW]: min={:.1} max={:.1} avg={:.1}", frp.min, frp.max, frp.avg);
    }

    if ARGS.list {
        for hs in &hotspots {
            println!("{:9.4} {:9.4}  {} {:04}  bright_ti4={:6.1} frp={:6.1} conf={}", 
                hs.latitude, hs.longitude, hs.acq_date, hs.acq_time, hs.bright_ti4, hs.frp, hs.confidence);
        }
    }

    Ok(())
}
