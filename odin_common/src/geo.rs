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

/// this module provides the geographic types and functions that are shared between ODIN crates.
/// Points and rects are thin new types around [geo](https://docs.rs/geo/latest/geo/index.html) primitives
/// that store geodetic degrees (x = longitude, y = latitude) and normalize on construction

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Coord, Point, Rect};

use crate::geo_constants::{MEAN_EARTH_RADIUS, MEAN_EARTH_RADIUS_KM};

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;
    
    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="LonLat", into="LonLat")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn point (&self) -> &Point { &self.0 }

    /// great circle distance in meters on a sphere with mean earth radius
    pub fn haversine_distance (&self, other: &GeoPoint)->f64 {
        MEAN_EARTH_RADIUS * central_angle( self.latitude_degrees(), self.longitude_degrees(), other.latitude_degrees(), other.longitude_degrees())
    }

    /// position on the unit sphere (x towards lon=0/lat=0, z towards north pole)
    pub fn unit_sphere_pos (&self)->[f64;3] {
        unit_sphere_pos( self.latitude_degrees(), self.longitude_degrees())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

// we accept "lon"/"longitude"/"x" and "lat"/"latitude"/"y" so that GeoPoints can be read from geo serializations
#[derive(Serialize,Deserialize)]
struct LonLat {
    #[serde(alias="longitude", alias="x")]
    lon: f64,
    #[serde(alias="latitude", alias="y")]
    lat: f64
}

impl From<LonLat> for GeoPoint {
    fn from (p: LonLat)->Self { GeoPoint::from_lon_lat_degrees( p.lon, p.lat) }
}

impl From<GeoPoint> for LonLat {
    fn from (p: GeoPoint)->Self { LonLat { lon: p.longitude_degrees(), lat: p.latitude_degrees() } }
}

/* #endregion GeoPoint */

/* #region GeoRect ***********************************************************************************************/

/// a lat/lon aligned bounding box. Note that we do not support rects crossing the antimeridian
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="Wsen", into="Wsen")]
pub struct GeoRect(Rect);

impl GeoRect {
    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Self {
        let sw = Coord { x: normalize_180(west), y: normalize_90(south) };
        let ne = Coord { x: normalize_180(east), y: normalize_90(north) };
        GeoRect( Rect::new( sw, ne)) // this orders min/max
    }

    pub fn west (&self)->f64 { self.0.min().x }
    pub fn south (&self)->f64 { self.0.min().y }
    pub fn east (&self)->f64 { self.0.max().x }
    pub fn north (&self)->f64 { self.0.max().y }

    pub fn contains (&self, p: &GeoPoint)->bool {
        let x = p.longitude_degrees();
        let y = p.latitude_degrees();
        x >= self.west() && x <= self.east() && y >= self.south() && y <= self.north()
    }

    pub fn rect (&self)->&Rect { &self.0 }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{},{}]", self.west(), self.south(), self.east(), self.north())
    }
}

#[derive(Serialize,Deserialize)]
struct Wsen {
    west: f64,
    south: f64,
    east: f64,
    north: f64
}

impl From<Wsen> for GeoRect {
    fn from (r: Wsen)->Self { GeoRect::from_wsen_degrees( r.west, r.south, r.east, r.north) }
}

impl From<GeoRect> for Wsen {
    fn from (r: GeoRect)->Self { Wsen { west: r.west(), south: r.south(), east: r.east(), north: r.north() } }
}

/* #endregion GeoRect */

/* #region spherical functions *************************************************************************************/

/// central angle (radians) between two lat/lon degree positions, using the haversine formula
pub fn central_angle (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let φ1 = lat1.to_radians();
    let φ2 = lat2.to_radians();
    let dφ = φ2 - φ1;
    let dλ = (lon2 - lon1).to_radians();

    let a = (dφ/2.0).sin().powi(2) + φ1.cos() * φ2.cos() * (dλ/2.0).sin().powi(2);
    2.0 * a.sqrt().min(1.0).asin()
}

/// haversine distance in km for lat/lon degree positions
pub fn haversine_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    MEAN_EARTH_RADIUS_KM * central_angle( lat1, lon1, lat2, lon2)
}

pub fn unit_sphere_pos (lat: f64, lon: f64)->[f64;3] {
    let φ = lat.to_radians();
    let λ = lon.to_radians();
    let cos_φ = φ.cos();
    [ cos_φ * λ.cos(), cos_φ * λ.sin(), φ.sin() ]
}

/// the squared euclidean distance between two unit sphere points that are a given central angle apart
/// (squared chord length). Useful to turn great circle radius queries into kd-tree queries
pub fn chord_squared (central_angle: f64)->f64 {
    let c = 2.0 * (central_angle / 2.0).sin();
    c*c
}

/* #endregion spherical functions */
