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

use std::fs;
use serde::Deserialize;
use odin_build::*;

#[derive(Debug,Deserialize,PartialEq)]
struct TestConfig {
    name: String,
    radius_km: f64,
}

// all in one test since the root dir is process global
#[test]
fn test_config_lookup() {
    let root = tempfile::tempdir().unwrap();
    unsafe { std::env::set_var( "ODIN_ROOT", root.path()) }
    assert_eq!( root_dir(), root.path());

    let crate_dir = tempfile::tempdir().unwrap();
    let crate_dir_name = crate_dir.path().to_str().unwrap();
    fs::create_dir_all( crate_dir.path().join("configs")).unwrap();
    fs::write( crate_dir.path().join("configs/test.ron"), r#"TestConfig( name: "repo", radius_km: 0.1 )"#).unwrap();

    // only the source repo config
    let path = find_config_file( "test_crate", crate_dir_name, "test.ron").unwrap();
    println!("found {path:?}");
    let config: TestConfig = load_config_path( &path).unwrap();
    assert_eq!( config.name, "repo");

    // ODIN_ROOT config takes precedence
    let root_configs = root.path().join("configs/test_crate");
    fs::create_dir_all( &root_configs).unwrap();
    fs::write( root_configs.join("test.ron"), r#"TestConfig( name: "root", radius_km: 0.5 )"#).unwrap();

    let path = find_config_file( "test_crate", crate_dir_name, "test.ron").unwrap();
    let config: TestConfig = load_config_path( &path).unwrap();
    assert_eq!( config, TestConfig { name: "root".to_string(), radius_km: 0.5 });

    // explicit path
    let explicit = crate_dir.path().join("configs/test.ron");
    let path = find_config_file( "test_crate", crate_dir_name, explicit.to_str().unwrap()).unwrap();
    assert_eq!( path, explicit);

    assert!( find_config_file( "test_crate", crate_dir_name, "missing.ron").is_none());

    fs::write( root_configs.join("broken.ron"), "TestConfig( name: 42 )").unwrap();
    let res: Result<TestConfig> = load_config_path( root_configs.join("broken.ron"));
    assert!( res.is_err());
}
