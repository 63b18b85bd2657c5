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

///! common utility functions for network operations

use std::{fs::File, io::Write, path::Path, time::Duration};
use reqwest::{header::{HeaderMap,HeaderValue,AUTHORIZATION}, Client, StatusCode, Response};
use serde::{de::DeserializeOwned,Serialize};

use crate::define_error;

define_error!{ pub OdinNetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

/// turn non-success responses into errors. This is what we use for all data requests that have no fallback
fn check_status (url: &str, response: Response)->Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err( OdinNetError::NotFoundError(url.to_string())),
        other => Err( OdinNetError::OpFailed(format!("response status {other:?}")))
    }
}

/// fetch URL content as text
pub async fn get_text (client: &Client, url: &str) -> Result<String> {
    let response = check_status( url, client.get(url).send().await?)?;
    Ok( response.text().await? )
}

/// GET request with URL query parameters and JSON response
pub async fn get_json_query<Q,T> (client: &Client, url: &str, query: &Q, timeout: Option<Duration>) -> Result<T> 
    where Q: Serialize + ?Sized, T: DeserializeOwned
{
    let mut req = client.get(url).query(query);
    if let Some(timeout) = timeout {
        req = req.timeout(timeout);
    }
    let response = check_status( url, req.send().await?)?;
    from_json(response).await
}

/// POST JSON data with an optional bearer token, return parsed JSON response
pub async fn post_json_query<T,U> (client: &Client, url: &str, data: &T, bearer: Option<&str>) -> Result<U> 
    where T: Serialize, U: DeserializeOwned 
{
    let mut headers = HeaderMap::new();
    if let Some(token) = bearer {
        let v = HeaderValue::from_str( &format!("Bearer {token}")).map_err(|e| OdinNetError::OpFailed(e.to_string()))?;
        headers.insert( AUTHORIZATION, v);
    }

    let response = client.post( url).headers( headers).json( data).send().await?;
    let response = check_status( url, response)?;
    from_json(response).await
}

/// fetch file from URL using HTTP GET method. Retrieve in chunks to support large files
pub async fn download_url (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, path: impl AsRef<Path>) -> Result<u64> {
    let mut req = client.get(url);
    if let Some(headermap) = &opt_headers {
        req = req.headers(headermap.clone())
    }
    
    let mut response = check_status( url, req.send().await?)?;

    // only create the file once we know there is data
    let mut file = File::create(path)?;
    let mut len: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        len += chunk.len() as u64;
        file.write_all(&chunk)?;
    }
    file.flush()?;

    Ok(len)
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| OdinNetError::ParseError(e.to_string()))
}
