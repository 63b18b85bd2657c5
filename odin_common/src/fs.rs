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

use std::fs::{self,File};
use std::io::{self,ErrorKind};
use std::env;
use std::path::{Path,PathBuf};
use std::fmt::Debug;
use std::ops::Deref;
use serde::ser::{Serialize as SerializeTrait, Serializer};
use serde::de::{Deserialize as DeserializeTrait, Deserializer};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_length <P: AsRef<Path>> (path: P) -> Option<u64> {
    fs::metadata(path).ok().map( |meta| meta.len())
}

pub fn existing_non_empty_file_from_path <P: AsRef<Path>> (path: P)-> Result<File> {
    let path = path.as_ref();
    if file_length(path).unwrap_or(0) > 0 {
        File::open(path)
    } else {
        Err( io_error!(ErrorKind::NotFound, "file {:?} does not exist or is empty", path))
    }
}

/// replace a leading '~' and '$<name>' path elements 
pub fn replace_env_var_path (path: impl AsRef<Path>)->Result<PathBuf> {
    let mut p = PathBuf::new();

    for (n,c) in path.as_ref().iter().enumerate() {
        let e = c.to_str().ok_or( io_error!(ErrorKind::Other, "invalid path: {:?}", path.as_ref()))?;

        if e == "~" && n == 0 { 
            p.push( env::var("HOME").map_err( |_| io_error!(ErrorKind::Other, "HOME not set"))?)
        } else if e.len() > 1 && e.starts_with('$') {
            if e == "$ODIN_ROOT" { // this we set automatically
                p.push( odin_build::root_dir())
            } else {
                p.push( lookup_env_var(e)?)
            }
        } else {
            p.push(e)
        }
    }

    Ok(p)
}

/// resolve a "$<name>" string into the value of the respective environment variable. Other strings are returned as is
pub fn replace_env_var (s: &str)->Result<String> {
    if s.len() > 1 && s.starts_with('$') { lookup_env_var(s) } else { Ok(s.to_string()) }
}

fn lookup_env_var (e: &str)->Result<String> {
    env::var( &e[1..]).map_err( |_| io_error!(ErrorKind::NotFound, "{e} not set"))
}

/* #region EnvPathBuf *******************************************************************************/

/// a PathBuf that can use env vars as path elements (e.g. "$ODIN_ROOT/data/model.json")
#[derive(Clone,PartialEq)]
pub struct EnvPathBuf(PathBuf);

impl EnvPathBuf {
    pub fn new (path: impl AsRef<Path>)->Result<Self> {
        Ok( EnvPathBuf( replace_env_var_path(path)? ) )
    }
}

impl Debug for EnvPathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Deref for EnvPathBuf {
    type Target = PathBuf;

    fn deref (&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for EnvPathBuf {
    #[inline]
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

// note this means we serialize the expanded pathbuf
impl SerializeTrait for EnvPathBuf {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        self.0.serialize( serializer)
    }
}

impl<'de> DeserializeTrait<'de> for EnvPathBuf {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        let p = replace_env_var_path( &s).map_err(|e| serde::de::Error::custom(format!("failed to expand path {s:?}: {e}")))?;
        Ok( EnvPathBuf(p) )
    }
}

/* #endregion EnvPathBuf */

/* #region EnvString ********************************************************************************/

/// a String config value that is looked up in the environment if it has the form "$<name>".
/// This is used for secrets such as API keys that should not be stored in config files
#[derive(Clone,PartialEq)]
pub struct EnvString(String);

impl EnvString {
    pub fn as_str (&self)->&str { self.0.as_str() }
}

impl From<&str> for EnvString {
    fn from (s: &str)->Self { EnvString(s.to_string()) }
}

// don't leak secrets into logs
impl Debug for EnvString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"***\"")
    }
}

impl Deref for EnvString {
    type Target = str;
    fn deref (&self) -> &Self::Target { self.0.as_str() }
}

impl<'de> DeserializeTrait<'de> for EnvString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        let v = replace_env_var( &s).map_err(|e| serde::de::Error::custom(e.to_string()))?;
        Ok( EnvString(v) )
    }
}

/* #endregion EnvString */
