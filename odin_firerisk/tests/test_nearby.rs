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

use odin_common::geo::haversine_km;
use odin_firerisk::{nearby::count_nearby, NEARBY_RADIUS_KM};

/// brute force reference
fn count_nearby_haversine (positions: &[(f64,f64)], radius_km: f64)->Vec<u32> {
    positions.iter().enumerate().map( |(i,(lat,lon))| {
        positions.iter().enumerate()
            .filter( |(j,(lat2,lon2))| *j != i && haversine_km( *lat, *lon, *lat2, *lon2) <= radius_km)
            .count() as u32
    }).collect()
}

/// deterministic pseudo random positions in a [d x d] degree box around (lat0,lon0)
fn positions (n: usize, lat0: f64, lon0: f64, d: f64)->Vec<(f64,f64)> {
    let mut s: u64 = 42;
    let mut next = || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (s >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n).map( |_| (lat0 + d * next(), lon0 + d * next())).collect()
}

#[test]
fn test_isolated() {
    let ps = vec![ (-33.0, 150.0), (-34.0, 151.0), (-12.5, 131.0) ];
    let counts = count_nearby( &ps, NEARBY_RADIUS_KM);
    println!("{counts:?}");
    assert_eq!( counts, vec![0,0,0]);

    assert_eq!( count_nearby( &[(-33.0, 150.0)], NEARBY_RADIUS_KM), vec![0]);
    assert!( count_nearby( &[], NEARBY_RADIUS_KM).is_empty());
}

#[test]
fn test_neighbors() {
    // 0.0005° latitude is about 56m, 0.001° about 111m
    let ps = vec![ (-33.0, 150.0), (-33.0005, 150.0), (-33.001, 150.0) ];
    let counts = count_nearby( &ps, NEARBY_RADIUS_KM);
    println!("{counts:?}");
    assert_eq!( counts, vec![1,2,1]);

    assert_eq!( count_nearby( &ps, 0.05), vec![0,0,0]);
    assert_eq!( count_nearby( &ps, 0.2), vec![2,2,2]);
}

#[test]
fn test_coincident() {
    let mut ps = vec![ (-33.0, 150.0); 50 ];
    ps.push( (-30.0, 140.0));

    let counts = count_nearby( &ps, NEARBY_RADIUS_KM);
    assert!( counts[..50].iter().all( |n| *n == 49));
    assert_eq!( counts[50], 0);
}

#[test]
fn test_dateline() {
    let ps = vec![ (-16.0, 179.9996), (-16.0, -179.9996) ]; // about 86m apart across the antimeridian
    assert_eq!( count_nearby( &ps, NEARBY_RADIUS_KM), vec![1,1]);
}

#[test]
fn test_brute_force() {
    let ps = positions( 500, -34.0, 150.0, 0.02);

    for radius in [NEARBY_RADIUS_KM, 0.25, 1.0] {
        let counts = count_nearby( &ps, radius);
        let expected = count_nearby_haversine( &ps, radius);
        let total: u32 = counts.iter().sum();
        println!("radius {radius}km: {total} neighbor pairs");
        assert_eq!( counts, expected);
    }
}
