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

#![allow(unused)]

use odin_common::{geo::*, geo_constants::MEAN_EARTH_RADIUS_KM, clip, MinMaxAvg};

fn sq_dist (a: &[f64;3], b: &[f64;3])->f64 {
    a.iter().zip(b.iter()).map( |(x,y)| (x-y)*(x-y)).sum()
}

#[test]
fn test_normalize() {
    assert_eq!( normalize_180( 190.0), -170.0);
    assert_eq!( normalize_180( -181.0), 179.0);
    assert_eq!( normalize_90( 100.0), 80.0);
    assert_eq!( normalize_90( -95.0), -85.0);
}

#[test]
fn test_haversine() {
    // one degree along a meridian
    let d = haversine_km( 0.0, 150.0, 1.0, 150.0);
    println!("1° latitude = {d} km");
    assert!( (d - MEAN_EARTH_RADIUS_KM * 1f64.to_radians()).abs() < 1e-9);

    let sydney = GeoPoint::from_lon_lat_degrees( 151.2093, -33.8688);
    let melbourne = GeoPoint::from_lon_lat_degrees( 144.9631, -37.8136);
    let d = sydney.haversine_distance( &melbourne);
    println!("Sydney - Melbourne: {:.1} km", d / 1000.0);
    assert!( d > 700_000.0 && d < 730_000.0);

    assert_eq!( haversine_km( -33.0, 150.0, -33.0, 150.0), 0.0);
}

#[test]
fn test_chord() {
    let p1 = unit_sphere_pos( -33.71, 150.31);
    let p2 = unit_sphere_pos( -33.7104, 150.3105);

    let angle = central_angle( -33.71, 150.31, -33.7104, 150.3105);
    let d2 = sq_dist( &p1, &p2);
    println!("angle={angle} chord²={d2}");
    assert!( (d2 - chord_squared( angle)).abs() < 1e-18);

    let north_pole = unit_sphere_pos( 90.0, 0.0);
    assert!( (north_pole[2] - 1.0).abs() < 1e-15);
    assert!( (chord_squared( std::f64::consts::PI) - 4.0).abs() < 1e-12); // antipodal
}

#[test]
fn test_geo_point_serde() {
    let p: GeoPoint = serde_json::from_str( r#"{"longitude": 150.3, "latitude": -33.7}"#).unwrap();
    assert_eq!( p.longitude_degrees(), 150.3);
    assert_eq!( p.latitude_degrees(), -33.7);

    let p: GeoPoint = serde_json::from_str( r#"{"x": 150.3, "y": -33.7}"#).unwrap();
    assert_eq!( p.latitude_degrees(), -33.7);

    let json = serde_json::to_string( &p).unwrap();
    println!("{json}");
    assert_eq!( json, r#"{"lon":150.3,"lat":-33.7}"#);
}

#[test]
fn test_geo_rect() {
    let r: GeoRect = ron::from_str( "(west: 153.6, south: -10.7, east: 112.9, north: -43.7)").unwrap();
    println!("{r}");
    assert_eq!( r.west(), 112.9);
    assert_eq!( r.south(), -43.7);
    assert_eq!( r.east(), 153.6);
    assert_eq!( r.north(), -10.7);

    assert!( r.contains( &GeoPoint::from_lon_lat_degrees( 150.3, -33.7)));
    assert!( !r.contains( &GeoPoint::from_lon_lat_degrees( 174.8, -41.3)));
    assert_eq!( r.to_string(), "[112.9,-43.7,153.6,-10.7]");
}

#[test]
fn test_clip() {
    assert_eq!( clip( -3.0, 0.0, 100.0), 0.0);
    assert_eq!( clip( 42.0, 0.0, 100.0), 42.0);
    assert_eq!( clip( 170.0, 0.0, 100.0), 100.0);
    assert!( clip( f64::NAN, 0.0, 100.0).is_nan());
}

#[test]
fn test_min_max_avg() {
    let mma: MinMaxAvg = [2.0, 8.0, 5.0].into_iter().collect();
    assert_eq!( mma.n, 3);
    assert_eq!( mma.min, 2.0);
    assert_eq!( mma.max, 8.0);
    assert_eq!( mma.avg, 5.0);
    assert!( MinMaxAvg::new().is_empty());
}
