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

use odin_common::{define_error, net::OdinNetError};

define_error!{ pub OdinLandCoverError = 
    IOError(#[from] std::io::Error) : "IO error {0}",
    NetError(#[from] OdinNetError) : "net error {0}",
    TiffError(#[from] tiff::TiffError) : "GeoTIFF error {0}",
    RasterError(String) : "unsupported raster {0}",
    ResponseError(String) : "invalid land cover response {0}",
    NoSampleError(f64,f64) : "no land cover sample for lat={0}, lon={1}"
}

pub type Result<T> = std::result::Result<T, OdinLandCoverError>;
