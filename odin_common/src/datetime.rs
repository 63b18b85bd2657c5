/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize,Deserializer};
use std::time::Duration;
use parse_duration::parse;

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// compact timestamp as used in generated file names, e.g. "20250704153000"
pub fn compact_timestamp<Z> (dt: &DateTime<Z>)->String where Z: TimeZone, Z::Offset: std::fmt::Display {
    dt.format("%Y%m%d%H%M%S").to_string()
}

/// the compact timestamp of a UTC time point as seen in the given time zone
pub fn compact_timestamp_in (dt: &DateTime<Utc>, tz: &Tz)->String {
    compact_timestamp( &dt.with_timezone(tz))
}

/// parse IANA time zone names such as "Australia/Sydney"
pub fn parse_tz (name: &str)->Option<Tz> {
    name.parse::<Tz>().ok()
}

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn deserialize_tz <'a,D>(deserializer: D) -> Result<Tz,D::Error> where D: Deserializer<'a> {
    let s = String::deserialize(deserializer)?;
    parse_tz( &s).ok_or_else( || serde::de::Error::custom(format!("unknown time zone {s}")))
}
