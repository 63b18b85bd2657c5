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
#![allow(unused,uncommon_codepoints)]

use serde::{Serialize,Deserialize};

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod geo_constants;
pub mod geo;
pub mod net;

// a global fn that can be used with serde(skip_serializing_if="odin_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

#[inline] pub fn pow2(x:f64) -> f64 { x*x }
#[inline] pub fn rad(x:f64)->f64 { x.to_radians() }
#[inline] pub fn deg(x:f64)->f64 { x.to_degrees() }

/// clamp value to [min,max]. Unlike f64::clamp this passes NaN through unchanged
#[inline] pub fn clip (x: f64, min: f64, max: f64)->f64 {
    if x < min { min } else if x > max { max } else { x }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }
    
    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl Default for MinMaxAvg {
    fn default()->Self { Self::new() }
}

impl FromIterator<f64> for MinMaxAvg {
    fn from_iter<I: IntoIterator<Item=f64>> (iter: I)->Self {
        let mut mma = MinMaxAvg::new();
        for x in iter { mma.add(x) }
        mma
    }
}
