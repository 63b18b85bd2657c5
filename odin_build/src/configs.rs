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

use std::path::{Path,PathBuf};
use crate::{root_dir, get_bin_context, file_contents_as_bytes, is_env_enabled};
use crate::errors::*;

pub const CONFIGS: &'static str = "configs";

/// locate a config file for a given resource crate. Lookup order is
///   1. `filename` itself if it is an existing file (explicit path, e.g. from a command line option)
///   2. `$ODIN_ROOT/configs/<bin_crate>/<bin_name>/<resource_crate>/<filename>` if a `BinContext` is set
///   3. `$ODIN_ROOT/configs/<resource_crate>/<filename>`
///   4. `<crate_dir>/configs/<filename>` (the config that comes with the source repo)
/// Step 4 can be disabled by setting `ODIN_EXTERNAL_CONFIGS_ONLY`
pub fn find_config_file (resource_crate: &str, crate_dir: &str, filename: &str) -> Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_file() { return Some(path.to_path_buf()) }

    if let Some(ctx) = get_bin_context() {
        let path = root_dir().join(CONFIGS).join(&ctx.bin_crate).join(&ctx.bin_name).join(resource_crate).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = root_dir().join(CONFIGS).join(resource_crate).join(filename);
    if path.is_file() { return Some(path) }

    if !is_env_enabled("ODIN_EXTERNAL_CONFIGS_ONLY") {
        let path = Path::new(crate_dir).join(CONFIGS).join(filename);
        if path.is_file() { return Some(path) }
    }

    None
}

/// this is mostly for tests and tools that already have a config path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let data = file_contents_as_bytes(path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// runtime (crate) part of config management
/// this is the main macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        mod configs {
            /// load config using odin_build - based lookup mechanism
            pub fn load_config<C> (filename: &str) -> odin_build::Result<C> where C: for <'a> serde::Deserialize<'a> {
                let resource_crate = env!("CARGO_PKG_NAME");
                let crate_dir = env!("CARGO_MANIFEST_DIR");

                if let Some(path) = odin_build::find_config_file( resource_crate, crate_dir, filename) {
                    odin_build::load_config_path( &path)
                } else {
                    Err( odin_build::OdinBuildError::ConfigNotFoundError(filename.to_string()) )
                }
            }
        }
        pub use configs::*; // make load_config() visible at the crate level
    }
}
