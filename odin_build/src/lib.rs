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

//! the odin_build crate provides the runtime directory layout of ODIN applications (root, cache and data dirs)
//! and the lookup mechanism for RON config files that are used by the other crates of this workspace

use std::{fs::File, io::Read, path::{Path,PathBuf}, sync::OnceLock, env};

mod configs;
pub use configs::*;

mod errors;
pub use errors::*;

pub type OdinBuildResult<T> = errors::Result<T>;

/* #region bin globals *******************************************************************/

/// identifies the running executable. Used to look up bin specific config overrides
#[derive(Debug)]
pub struct BinContext {
    pub bin_crate: String,
    pub bin_name: String,
    pub bin_suffix: Option<String>, // optionally set via ODIN_BIN_SUFFIX (if we run simultaneous instances of this bin)
    pub proc_id: Option<u32>,
}

impl BinContext {
    /// returns false if the context was already set
    pub fn set (bin_crate: &str, bin_name: &str, bin_suffix: Option<String>, proc_id: Option<u32>)->bool {
        BIN_CONTEXT.set( BinContext { bin_crate: bin_crate.to_string(), bin_name: bin_name.to_string(), bin_suffix, proc_id }).is_ok()
    }
}

static BIN_CONTEXT: OnceLock<BinContext> = OnceLock::new();

pub fn get_bin_context()->Option<&'static BinContext> {
    BIN_CONTEXT.get()
}

/// this has to be called (once) at the start of the bin main function
#[macro_export]
macro_rules! set_bin_context {
    () => {
        {
            // env! is resolved at compile time, env::var at runtime
            odin_build::BinContext::set( env!("CARGO_PKG_NAME"),
                env!("CARGO_BIN_NAME"),
                std::env::var("ODIN_BIN_SUFFIX").ok(),
                Some(std::process::id()));
        }
    }
}

// the global ODIN dirs of the application, which are invariant after init
static ROOT_DIR: OnceLock<PathBuf> = OnceLock::new();
static CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// the global root dir: `ODIN_ROOT` or `~/.odin` if the env var is not set
/// this will try to create the directory if it does not exist and panics if that fails
pub fn root_dir()->&'static PathBuf {
    ROOT_DIR.get_or_init(|| ensure_dir( get_root_dir().expect("failed to locate ODIN root")))
}

/// the global data dir: `ODIN_ROOT/data`
pub fn data_dir()->&'static PathBuf {
    DATA_DIR.get_or_init(|| ensure_dir( root_dir().join( "data")))
}

/// the global cache dir: `ODIN_ROOT/cache`
pub fn cache_dir()->&'static PathBuf {
    CACHE_DIR.get_or_init(|| ensure_dir( root_dir().join( "cache")))
}

/// the crate cache dir of the caller: `ODIN_ROOT/cache/<crate>`
/// This is a macro so that it uses the crate name of the caller source
#[macro_export]
macro_rules! pkg_cache_dir {
    () => {
        odin_build::ensure_dir( odin_build::cache_dir().join( env!("CARGO_PKG_NAME")))
    }
}

/// the crate data dir of the caller: `ODIN_ROOT/data/<crate>`
#[macro_export]
macro_rules! pkg_data_dir {
    () => {
        odin_build::ensure_dir( odin_build::data_dir().join( env!("CARGO_PKG_NAME")))
    }
}

/// Note - this panics if the directory does not exist and can't be created
pub fn ensure_dir (dir: PathBuf)->PathBuf {
    if !dir.is_dir() {
        std::fs::create_dir_all(&dir).unwrap();
    }
    dir
}

fn get_root_dir ()->Result<PathBuf> {
    if let Ok(root) = env::var("ODIN_ROOT") {
        Ok( PathBuf::from(root) )
    } else {
        let home = env::var("HOME")?;
        Ok( Path::new(&home).join(".odin") )
    }
}

/* #endregion bin globals */

pub fn file_contents_as_bytes (path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// check if env var is set to 1|true|on|yes
pub fn is_env_enabled (key: &str)->bool {
    match env::var(key) {
        Ok(v) => matches!( v.to_lowercase().as_str(), "1" | "true" | "on" | "yes"),
        Err(_) => false
    }
}
