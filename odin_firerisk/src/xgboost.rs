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

//! evaluation of XGBoost tree ensembles that were saved in XGBoost's JSON model format (`Booster.save_model("x.json")`).
//! We only support the `gbtree` booster with numerical splits and single target output, which covers
//! the `XGBRegressor` models we use for risk estimation.

use std::{fs::File, io::BufReader, path::Path};
use serde::Deserialize;
use serde_json::Value;

use odin_common::error_with;
use crate::{errors::{OdinFireRiskError, Result}, model::RiskModel};

/* #region JSON model schema (the parts we need) *********************************************************************/

#[derive(Deserialize)]
struct XgbModelFile {
    learner: XgbLearner,
}

#[derive(Deserialize)]
struct XgbLearner {
    learner_model_param: XgbModelParam,
    gradient_booster: XgbBooster,
    objective: XgbObjective,
}

#[derive(Deserialize)]
struct XgbModelParam {
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
    #[serde(default)]
    num_target: Option<String>,
}

#[derive(Deserialize)]
struct XgbBooster {
    name: String,
    #[serde(default)]
    model: Option<XgbTreeModel>,
}

#[derive(Deserialize)]
struct XgbTreeModel {
    trees: Vec<XgbTree>,
}

#[derive(Deserialize)]
struct XgbObjective {
    name: String,
}

#[derive(Deserialize)]
struct XgbTree {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f64>,
    default_left: Vec<Value>, // 0/1 in older versions, booleans in newer ones
    #[serde(default)]
    split_type: Vec<u8>,
}

/* #endregion JSON model schema */

/// how the summed margin is turned into a prediction
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Link {
    Identity,
    Logistic,
    LogitRaw, // logistic base margin but the raw margin is returned
    Log,
}

impl Link {
    fn from_objective (name: &str)->Result<Self> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:pseudohubererror" | "reg:absoluteerror" | "reg:quantileerror" => Ok(Link::Identity),
            "reg:logistic" | "binary:logistic" => Ok(Link::Logistic),
            "binary:logitraw" => Ok(Link::LogitRaw),
            "count:poisson" | "reg:gamma" | "reg:tweedie" => Ok(Link::Log),
            _ => Err( error_with!( OdinFireRiskError::ModelError, "unsupported objective {}", name))
        }
    }

    /// base_score is stored in prediction space and has to be converted into a margin
    fn base_margin (&self, base_score: f64)->f64 {
        match self {
            Link::Identity => base_score,
            Link::Logistic | Link::LogitRaw => (base_score / (1.0 - base_score)).ln(),
            Link::Log => base_score.ln(),
        }
    }

    fn apply (&self, margin: f64)->f64 {
        match self {
            Link::Identity | Link::LogitRaw => margin,
            Link::Logistic => 1.0 / (1.0 + (-margin).exp()),
            Link::Log => margin.exp(),
        }
    }
}

/// a single regression tree in array layout. Node 0 is the root, leaf nodes have a left child of -1 and
/// store their value in `split_conditions`
#[derive(Debug,Clone)]
pub struct Tree {
    left: Vec<i32>,
    right: Vec<i32>,
    feature: Vec<u32>,
    condition: Vec<f64>,
    default_left: Vec<bool>,
}

impl Tree {
    fn from_xgb (t: XgbTree)->Result<Self> {
        let n = t.left_children.len();
        if n == 0 || t.right_children.len() != n || t.split_indices.len() != n || t.split_conditions.len() != n || t.default_left.len() != n {
            return Err( error_with!( OdinFireRiskError::ModelError, "inconsistent tree arrays"))
        }
        if t.split_type.iter().any( |st| *st != 0) {
            return Err( error_with!( OdinFireRiskError::ModelError, "categorical splits not supported"))
        }

        for i in 0..n {
            let (l,r) = (t.left_children[i], t.right_children[i]);
            // children are always stored after their parent, which also guarantees that evaluation terminates
            if l != -1 && ((l as usize) <= i || (l as usize) >= n || (r as usize) <= i || (r as usize) >= n) {
                return Err( error_with!( OdinFireRiskError::ModelError, "invalid child index in node {}", i))
            }
        }

        let default_left = t.default_left.iter().map( |v| match v {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok( n.as_i64() != Some(0) ),
            _ => Err( error_with!( OdinFireRiskError::ModelError, "invalid default_left value {}", v))
        }).collect::<Result<Vec<bool>>>()?;

        Ok( Tree { left: t.left_children, right: t.right_children, feature: t.split_indices, condition: t.split_conditions, default_left } )
    }

    pub fn n_nodes (&self)->usize { self.left.len() }

    /// the leaf value for a feature vector. Features are compared in single precision as XGBoost does.
    /// Missing (NaN) and out of range features follow the default branch of a split
    pub fn leaf_value (&self, features: &[f64])->f64 {
        let mut i = 0;
        loop {
            let l = self.left[i];
            if l == -1 { return self.condition[i] }

            let x = features.get( self.feature[i] as usize).copied().unwrap_or( f64::NAN);
            let go_left = if x.is_nan() { self.default_left[i] } else { (x as f32) < (self.condition[i] as f32) };

            i = if go_left { l as usize } else { self.right[i] as usize };
        }
    }
}

/// an additive ensemble of regression trees
#[derive(Debug,Clone)]
pub struct TreeEnsemble {
    pub trees: Vec<Tree>,
    pub base_score: f64,
    pub link: Link,
    pub num_feature: Option<usize>,
}

impl TreeEnsemble {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let reader = BufReader::new( File::open( path)?);
        let model: XgbModelFile = serde_json::from_reader( reader)?;
        Self::from_model_file( model)
    }

    pub fn from_json (s: &str)->Result<Self> {
        let model: XgbModelFile = serde_json::from_str( s)?;
        Self::from_model_file( model)
    }

    fn from_model_file (model: XgbModelFile)->Result<Self> {
        let learner = model.learner;
        let param = learner.learner_model_param;

        if let Some(nt) = &param.num_target {
            if nt.trim() != "1" && nt.trim() != "0" {
                return Err( error_with!( OdinFireRiskError::ModelError, "multi target models not supported ({} targets)", nt))
            }
        }

        let booster = learner.gradient_booster;
        if booster.name != "gbtree" {
            return Err( error_with!( OdinFireRiskError::ModelError, "unsupported booster {}", booster.name))
        }
        let tree_model = booster.model.ok_or_else( || error_with!( OdinFireRiskError::ModelError, "no tree model"))?;
        let trees = tree_model.trees.into_iter().map( Tree::from_xgb).collect::<Result<Vec<Tree>>>()?;

        let link = Link::from_objective( &learner.objective.name)?;
        let base_score = parse_base_score( &param.base_score)?;
        let num_feature = param.num_feature.and_then( |s| s.trim().parse::<usize>().ok()).filter( |n| *n > 0);

        Ok( TreeEnsemble { trees, base_score, link, num_feature } )
    }

    pub fn margin (&self, features: &[f64])->f64 {
        self.trees.iter().fold( self.link.base_margin( self.base_score), |acc, t| acc + t.leaf_value( features))
    }
}

impl RiskModel for TreeEnsemble {
    fn predict (&self, features: &[f64])->Result<f64> {
        Ok( self.link.apply( self.margin( features)) )
    }

    fn n_features (&self)->Option<usize> { self.num_feature }
}

/// XGBoost stores the base score as a string, either as a plain float ("5E-1") or, since v3.0, as a vector ("[5E-1]")
pub fn parse_base_score (s: &str)->Result<f64> {
    let s = s.trim().trim_start_matches('[').trim_end_matches(']');
    let first = s.split(',').next().unwrap_or("").trim();
    first.parse::<f64>().map_err( |_| error_with!( OdinFireRiskError::ModelError, "invalid base_score '{}'", s))
}
