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

define_error!{ pub OdinFirmsError = 
    IOError(#[from] std::io::Error) : "IO error {0}",
    NetError(#[from] OdinNetError) : "net error {0}",
    CsvError(#[from] csv::Error) : "CSV error {0}",
    ConfigError(String) : "config error {0}",
    FormatError(String) : "not a FIRMS hotspot response: {0}"
}

pub type Result<T> = std::result::Result<T, OdinFirmsError>;
