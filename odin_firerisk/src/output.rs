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

//! the result file consumed by map clients: `hotspots<YYYYmmddHHMMSS>.csv` with local timestamps

use std::{fs::File, io, path::{Path,PathBuf}};
use chrono::{DateTime,Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use odin_common::{datetime::compact_timestamp_in, fs::ensure_writable_dir};
use crate::{errors::Result, FireRiskRecord};

pub const OUTPUT_COLUMNS: [&str;4] = ["longitude", "latitude", "value", "LandCover"];

#[derive(Serialize)]
struct OutputRow {
    longitude: f64,
    latitude: f64,
    value: Option<f64>,
    land_cover: Option<u8>,
}

impl From<&FireRiskRecord> for OutputRow {
    fn from (rec: &FireRiskRecord)->Self {
        OutputRow { longitude: rec.longitude(), latitude: rec.latitude(), value: rec.risk, land_cover: rec.land_cover }
    }
}

pub fn output_filename (now: &DateTime<Utc>, tz: &Tz)->String {
    format!("hotspots{}.csv", compact_timestamp_in( now, tz))
}

/// write the header and one row per record. The header is also written if there are no records
pub fn write_results<W: io::Write> (writer: W, records: &[FireRiskRecord])->Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer( writer);

    wtr.write_record( &OUTPUT_COLUMNS)?;
    for rec in records {
        wtr.serialize( OutputRow::from( rec))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_results (dir: impl AsRef<Path>, now: &DateTime<Utc>, tz: &Tz, records: &[FireRiskRecord])->Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_writable_dir( dir)?;

    let path = dir.join( output_filename( now, tz));
    write_results( File::create( &path)?, records)?;

    info!("saved {} results to {:?}", records.len(), path);
    Ok(path)
}
