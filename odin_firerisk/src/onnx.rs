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

//! risk models exported as ONNX (e.g. via skl2onnx or onnxmltools), executed with onnxruntime

use std::{path::Path, sync::Mutex};
use ndarray::Array2;
use ort::{inputs, session::Session, value::TensorRef};

use odin_common::error_with;
use crate::{errors::{OdinFireRiskError, Result}, model::RiskModel};

fn onnx_error (e: impl std::fmt::Display)->OdinFireRiskError {
    error_with!( OdinFireRiskError::ModelError, "onnx: {}", e)
}

/// a model with a single float tensor input of shape [1,n_features] and the prediction as the first element
/// of its first output
pub struct OnnxModel {
    session: Mutex<Session>, // running a session requires mutable access
    input_name: String,
}

impl OnnxModel {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let session = Session::builder().map_err(onnx_error)?
            .commit_from_file( path.as_ref()).map_err(onnx_error)?;

        let input_name = session.inputs.first()
            .map( |input| input.name.clone())
            .ok_or_else( || error_with!( OdinFireRiskError::ModelError, "onnx model has no inputs"))?;

        Ok( OnnxModel { session: Mutex::new(session), input_name } )
    }
}

impl RiskModel for OnnxModel {
    fn predict (&self, features: &[f64])->Result<f64> {
        let input = Array2::from_shape_vec( (1, features.len()), features.iter().map( |x| *x as f32).collect()).map_err(onnx_error)?;

        let mut session = self.session.lock().map_err( |_| error_with!( OdinFireRiskError::ModelError, "poisoned onnx session"))?;
        let outputs = session.run( inputs![ self.input_name.as_str() => TensorRef::from_array_view( &input).map_err(onnx_error)? ])
            .map_err(onnx_error)?;

        let (_, value) = outputs.iter().next().ok_or_else( || error_with!( OdinFireRiskError::ModelError, "onnx model has no outputs"))?;
        let prediction = value.try_extract_array::<f32>().map_err(onnx_error)?;
        let y = prediction.iter().next().copied().ok_or_else( || error_with!( OdinFireRiskError::ModelError, "empty onnx output"))?;

        Ok( y as f64 )
    }
}
