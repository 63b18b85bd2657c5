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

use std::fmt;
use serde::Serialize;
use tracing::{info,debug};

use odin_common::MinMaxAvg;
use odin_firms::HotspotSource;
use odin_landcover::{filter_burnable, LandCoverSampler};
use odin_openmeteo::WeatherSource;

use crate::{errors::Result, model::{RiskModel, RiskScorer}, nearby::count_nearby, FireRiskRecord};

/// what happened in a pipeline run
#[derive(Debug,Clone,Default,Serialize)]
pub struct FireRiskSummary {
    pub n_hotspots: usize,
    pub n_burnable: usize,
    pub n_without_weather: usize,
    pub risk: MinMaxAvg,
}

impl fmt::Display for FireRiskSummary {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{} hotspots, {} on burnable land cover ({} without weather)", self.n_hotspots, self.n_burnable, self.n_without_weather)?;
        if !self.risk.is_empty() {
            write!(f, ", risk min={:.1} max={:.1} avg={:.1}", self.risk.min, self.risk.max, self.risk.avg)?;
        }
        Ok(())
    }
}

/// the risk estimation pipeline with its replaceable stages
pub struct FireRiskPipeline<H,L,W,M> {
    pub hotspots: H,
    pub land_cover: L,
    pub non_burnable: Vec<u8>,
    pub weather: W,
    pub scorer: RiskScorer<M>,
    pub nearby_radius_km: f64,
}

impl <H,L,W,M> FireRiskPipeline<H,L,W,M> 
    where H: HotspotSource, L: LandCoverSampler, W: WeatherSource + Sync, M: RiskModel
{
    /// execute all stages in sequence. Only weather retrieval errors are tolerated (per hotspot), everything
    /// else aborts the run
    pub async fn run (&self)->Result<(Vec<FireRiskRecord>,FireRiskSummary)> {
        let mut summary = FireRiskSummary::default();

        let hotspots = self.hotspots.get_hotspots().await?;
        summary.n_hotspots = hotspots.len();
        info!("retrieved {} hotspots", hotspots.len());

        let records: Vec<FireRiskRecord> = hotspots.into_iter().map( FireRiskRecord::from).collect();
        let mut records = filter_burnable( records, &self.land_cover, &self.non_burnable).await?;
        summary.n_burnable = records.len();

        summary.n_without_weather = add_weather( &mut records, &self.weather).await;
        add_nearby_counts( &mut records, self.nearby_radius_km);
        summary.risk = add_risk_scores( &mut records, &self.scorer)?;

        info!("{summary}");
        Ok( (records, summary) )
    }
}

/// retrieve weather for each record (sequentially). Failed requests leave the weather of the respective record empty.
/// Returns the number of records without any weather data
pub async fn add_weather<W> (records: &mut [FireRiskRecord], source: &W)->usize where W: WeatherSource + Sync + ?Sized {
    let mut n_empty = 0;
    let n = records.len();

    for (i,rec) in records.iter_mut().enumerate() {
        rec.weather = source.get_weather_or_empty( rec.latitude(), rec.longitude()).await;
        if rec.weather.is_empty() { n_empty += 1 }
        debug!("weather {}/{}: {:?}", i+1, n, rec.weather);
    }

    info!("retrieved weather for {} of {} hotspots", n - n_empty, n);
    n_empty
}

pub fn add_nearby_counts (records: &mut [FireRiskRecord], radius_km: f64) {
    let positions: Vec<(f64,f64)> = records.iter().map( |r| (r.latitude(), r.longitude())).collect();
    for (rec,n) in records.iter_mut().zip( count_nearby( &positions, radius_km)) {
        rec.nearby_hotspots = Some(n);
    }
}

pub fn add_risk_scores<M> (records: &mut [FireRiskRecord], scorer: &RiskScorer<M>)->Result<MinMaxAvg> where M: RiskModel {
    let mut stats = MinMaxAvg::new();
    for rec in records.iter_mut() {
        let risk = scorer.score( &rec.features())?;
        rec.risk = Some(risk);
        stats.add( risk);
    }
    Ok(stats)
}
