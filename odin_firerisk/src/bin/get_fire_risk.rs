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

use std::path::PathBuf;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use odin_common::{datetime::utc_now, define_cli};
use odin_firms::{BoxedHotspotSource, FirmsClient, FirmsFile};
use odin_landcover::create_sampler;
use odin_openmeteo::OpenMeteoClient;
use odin_firerisk::{
    load_config, FireRiskConfig,
    model::RiskScorer,
    output::save_results,
    pipeline::FireRiskPipeline,
};

define_cli! { ARGS [about="estimate wildfire risk for current FIRMS hotspots"] =
    config: String [help="filename of fire risk config", short, long, default_value="fire_risk.ron"],
    firms_file: Option<PathBuf> [help="use previously downloaded FIRMS CSV file instead of FIRMS server", long],
    output_dir: Option<PathBuf> [help="directory to store the result file in (default is configured or current dir)", short, long],
    dry_run: bool [help="don't store results", long]
}

#[tokio::main(flavor="current_thread")]
async fn main() -> Result<()> {
    odin_build::set_bin_context!();
    tracing_subscriber::fmt().with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let config: FireRiskConfig = load_config( &ARGS.config)?;

    let hotspots: BoxedHotspotSource = if let Some(path) = &ARGS.firms_file {
        Box::new( FirmsFile { path: path.clone() })
    } else {
        Box::new( FirmsClient::new( config.firms.clone())?)
    };

    let pipeline = FireRiskPipeline {
        hotspots,
        land_cover: create_sampler( &config.land_cover.sampler)?,
        non_burnable: config.land_cover.non_burnable.clone(),
        weather: OpenMeteoClient::new( config.weather.clone()),
        scorer: RiskScorer::load( &config.model)?,
        nearby_radius_km: config.nearby_radius_km,
    };

    let (records, summary) = pipeline.run().await?;
    println!("{summary}");

    if !ARGS.dry_run {
        let dir = match (&ARGS.output_dir, &config.output_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => dir.to_path_buf(),
            (None, None) => PathBuf::from("."),
        };
        let path = save_results( &dir, &utc_now(), &config.timezone, &records)?;
        println!("results saved to {:?}", path);
    }

    Ok(())
}
