/*
 * Trustpilot Invitations - A client for the Trustpilot invitation API
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{fmt, future::Future};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST"
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST
        }
    }
}

/// A fully assembled request, ready to hand to a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Resolved URL without query string
    pub url: Url,
    /// Query parameters in the order they are sent
    pub query: Vec<(String, String)>,
    pub json: Option<Value>
}

/// Sends a request and returns the response body.
///
/// Non-success statuses must be reported as errors, the client treats any
/// `Ok` body as a successful exchange.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> impl Future<Output = Result<String, TransportError>> + Send;
}

pub struct ReqwestTransport {
    client: Client
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    /// Use a preconfigured client, e.g. one with custom timeouts or proxy
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<String, TransportError> {
        let mut builder = self.client.request(request.method.into(), request.url.clone())
            .query(&request.query);

        if let Some(json) = &request.json {
            builder = builder.json(json);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        Ok(response.text().await?)
    }
}
