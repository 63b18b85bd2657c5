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

//! hotspot density feature: the number of other hotspots within a great circle radius of each hotspot

use std::collections::HashMap;
use kiddo::{KdTree, SquaredEuclidean};
use odin_common::{geo::{chord_squared, unit_sphere_pos}, geo_constants::MEAN_EARTH_RADIUS_KM};

/// count for each (lat,lon) position how many other positions are within `radius_km` (great circle distance).
/// Positions are mapped onto the unit sphere so that radius queries become euclidean kd-tree queries over the
/// corresponding chord length.
/// The returned counts are in input order. Coincident positions count as neighbors of each other
pub fn count_nearby (positions: &[(f64,f64)], radius_km: f64)->Vec<u32> {
    if positions.is_empty() { return Vec::new() }

    // the tree only stores distinct positions (kd-tree buckets can't split on identical coordinates)
    let mut index: HashMap<(u64,u64),usize> = HashMap::new();
    let mut multiplicity: Vec<u32> = Vec::new();
    let mut unique: Vec<[f64;3]> = Vec::new();
    let mut slots: Vec<usize> = Vec::with_capacity( positions.len());

    for (lat,lon) in positions {
        let slot = *index.entry( (lat.to_bits(), lon.to_bits())).or_insert_with( || {
            unique.push( unit_sphere_pos( *lat, *lon));
            multiplicity.push(0);
            unique.len() - 1
        });
        multiplicity[slot] += 1;
        slots.push(slot);
    }

    let mut tree: KdTree<f64,3> = KdTree::with_capacity( unique.len());
    for (i,p) in unique.iter().enumerate() {
        tree.add( p, i as u64);
    }

    let max_dist = chord_squared( radius_km / MEAN_EARTH_RADIUS_KM);
    let counts: Vec<u32> = unique.iter().map( |p| {
        tree.within_unsorted::<SquaredEuclidean>( p, max_dist).iter()
            .map( |nn| multiplicity[nn.item as usize])
            .sum::<u32>()
    }).collect();

    // the query point itself is always within range
    slots.iter().map( |slot| counts[*slot].saturating_sub(1)).collect()
}
