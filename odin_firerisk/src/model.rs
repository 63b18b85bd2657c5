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

//! feature scaling and risk regression models.
//! Scalers and models are trained elsewhere (e.g. with scikit-learn and XGBoost) and exported into
//! formats we can read without the training environment: JSON or RON for scalers and linear models,
//! XGBoost's own JSON model format for tree ensembles and (optionally) ONNX

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};
use tracing::info;

use odin_common::{clip, error_with, fs::{extension, EnvPathBuf}};
use crate::{errors::{OdinFireRiskError, Result}, xgboost::TreeEnsemble, N_FEATURES};

/// read a serde value from a *.json or *.ron file
pub fn load_from_file<T> (path: impl AsRef<Path>)->Result<T> where T: for<'a> Deserialize<'a> {
    let path = path.as_ref();
    let content = fs::read_to_string( path)?;

    match extension( &path) {
        Some("json") => Ok( serde_json::from_str( &content)? ),
        Some("ron") => Ok( ron::from_str( &content)? ),
        _ => Err( error_with!( OdinFireRiskError::ModelError, "unknown file type: {:?}", path))
    }
}

/* #region scaler ****************************************************************************************************/

/// the feature transformation applied before model prediction. The variants correspond to the
/// fitted state of the scikit-learn StandardScaler and MinMaxScaler (field aliases are the sklearn attribute names)
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum Scaler {
    Identity,
    Standard { 
        #[serde(alias="mean_")] mean: Vec<f64>, 
        #[serde(alias="scale_")] scale: Vec<f64> 
    },
    MinMax { 
        #[serde(alias="min_")] min: Vec<f64>, 
        #[serde(alias="scale_")] scale: Vec<f64> 
    },
}

impl Scaler {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let scaler: Scaler = load_from_file( path)?;
        scaler.check()?;
        Ok(scaler)
    }

    /// number of features this scaler was fitted for, None if it accepts any
    pub fn n_features (&self)->Option<usize> {
        match self {
            Scaler::Identity => None,
            Scaler::Standard { mean, .. } => Some(mean.len()),
            Scaler::MinMax { min, .. } => Some(min.len()),
        }
    }

    fn check (&self)->Result<()> {
        let consistent = match self {
            Scaler::Identity => true,
            Scaler::Standard { mean, scale } => mean.len() == scale.len(),
            Scaler::MinMax { min, scale } => min.len() == scale.len(),
        };
        if consistent { Ok(()) } else { Err( error_with!( OdinFireRiskError::ModelError, "scaler parameter length mismatch")) }
    }

    /// scale a feature vector. NaN values (missing features) stay NaN
    pub fn transform (&self, x: &[f64])->Result<Vec<f64>> {
        if let Some(n) = self.n_features() {
            if n != x.len() {
                return Err( error_with!( OdinFireRiskError::ModelError, "scaler expects {} features, got {}", n, x.len()))
            }
        }

        let xs = match self {
            Scaler::Identity => x.to_vec(),
            Scaler::Standard { mean, scale } => {
                x.iter().zip( mean.iter().zip( scale.iter())).map( |(x,(m,s))| {
                    let s = if *s == 0.0 { 1.0 } else { *s }; // constant features are only centered
                    (x - m) / s
                }).collect()
            }
            Scaler::MinMax { min, scale } => {
                x.iter().zip( min.iter().zip( scale.iter())).map( |(x,(m,s))| x * s + m).collect()
            }
        };
        Ok(xs)
    }
}

/* #endregion scaler */

/* #region models ****************************************************************************************************/

/// a regression model that maps a (scaled) feature vector to a risk value
pub trait RiskModel {
    fn predict (&self, features: &[f64])->Result<f64>;

    /// number of input features if the model knows it
    fn n_features (&self)->Option<usize> { None }
}

pub type BoxedRiskModel = Box<dyn RiskModel + Send + Sync>;

impl RiskModel for BoxedRiskModel {
    fn predict (&self, features: &[f64])->Result<f64> { (**self).predict( features) }
    fn n_features (&self)->Option<usize> { (**self).n_features() }
}

/// ordinary linear regression (e.g. exported `LinearRegression.coef_` and `intercept_`).
/// Missing features are replaced by 0, which is the training mean for standard scaled inputs
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct LinearModel {
    #[serde(alias="coef_")]
    pub coefficients: Vec<f64>,
    #[serde(alias="intercept_")]
    pub intercept: f64,
}

impl LinearModel {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        load_from_file( path)
    }
}

impl RiskModel for LinearModel {
    fn predict (&self, features: &[f64])->Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err( error_with!( OdinFireRiskError::ModelError, "linear model expects {} features, got {}", self.coefficients.len(), features.len()))
        }

        let y = self.coefficients.iter().zip( features.iter())
            .fold( self.intercept, |acc, (c,x)| if x.is_nan() { acc } else { acc + c * x });
        Ok(y)
    }

    fn n_features (&self)->Option<usize> { Some(self.coefficients.len()) }
}

/* #endregion models */

/* #region configured scorer *****************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Deserialize)]
pub enum ModelKind {
    XGBoost,
    Linear,
    Onnx,
}

impl ModelKind {
    /// "*.onnx" files are ONNX models, other "*.json" files XGBoost models and "*.ron" files linear models
    pub fn from_path (path: &Path)->Option<Self> {
        match extension( &path) {
            Some("onnx") => Some(ModelKind::Onnx),
            Some("json") => Some(ModelKind::XGBoost),
            Some("ron") => Some(ModelKind::Linear),
            _ => None
        }
    }
}

#[derive(Debug,Deserialize)]
pub struct ModelConfig {
    pub scaler: EnvPathBuf,
    pub model: EnvPathBuf,
    /// derived from the model file extension if not set
    #[serde(default)]
    pub kind: Option<ModelKind>,
}

pub fn load_model (path: &Path, kind: ModelKind)->Result<BoxedRiskModel> {
    match kind {
        ModelKind::XGBoost => Ok( Box::new( TreeEnsemble::load( path)?) ),
        ModelKind::Linear => Ok( Box::new( LinearModel::load( path)?) ),
        #[cfg(feature="onnx")]
        ModelKind::Onnx => Ok( Box::new( crate::onnx::OnnxModel::load( path)?) ),
        #[cfg(not(feature="onnx"))]
        ModelKind::Onnx => Err( error_with!( OdinFireRiskError::ConfigError, "ONNX models require the 'onnx' feature: {:?}", path))
    }
}

/// the (scaler, model) pair that turns a raw feature vector into a risk score within [0,100]
pub struct RiskScorer<M> {
    pub scaler: Scaler,
    pub model: M,
}

impl <M> RiskScorer<M> where M: RiskModel {
    pub fn new (scaler: Scaler, model: M)->Result<Self> {
        if let (Some(ns), Some(nm)) = (scaler.n_features(), model.n_features()) {
            if ns != nm {
                return Err( error_with!( OdinFireRiskError::ModelError, "scaler has {} features but model has {}", ns, nm))
            }
        }
        Ok( RiskScorer { scaler, model } )
    }

    pub fn score (&self, features: &[f64])->Result<f64> {
        let xs = self.scaler.transform( features)?;
        let y = self.model.predict( &xs)?;

        if y.is_nan() {
            Err( error_with!( OdinFireRiskError::ModelError, "prediction is not a number for features {:?}", features))
        } else {
            Ok( clip( y, 0.0, 100.0) )
        }
    }
}

impl RiskScorer<BoxedRiskModel> {
    pub fn load (config: &ModelConfig)->Result<Self> {
        let kind = match config.kind {
            Some(kind) => kind,
            None => ModelKind::from_path( &config.model)
                .ok_or_else( || error_with!( OdinFireRiskError::ConfigError, "unknown model type: {:?}", config.model))?
        };

        let scaler = Scaler::load( &config.scaler)?;
        let model = load_model( &config.model, kind)?;
        info!("loaded {:?} risk model from {:?}", kind, config.model);

        if let Some(n) = scaler.n_features() {
            if n != N_FEATURES {
                return Err( error_with!( OdinFireRiskError::ModelError, "scaler has {} features, expected {}", n, N_FEATURES))
            }
        }
        RiskScorer::new( scaler, model)
    }
}

/* #endregion configured scorer */
