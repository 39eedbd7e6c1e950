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

use chrono::{DateTime, Utc, serde::ts_seconds_option};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Supplies the token sent as the `token` query parameter.
///
/// Called once for every outbound request.
pub trait TokenProvider {
    fn token(&self) -> String;
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AccessToken {
    access_token: String,
    #[serde(with = "ts_seconds_option", default)]
    expires: Option<DateTime<Utc>>
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), expires: None }
    }

    pub fn with_expiry(access_token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self { access_token: access_token.into(), expires: Some(expires) }
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Tokens without a known expiry never report as expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |expires| Utc::now() > expires)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"***")
            .field("expires", &self.expires)
            .finish()
    }
}

impl TokenProvider for AccessToken {
    fn token(&self) -> String {
        self.access_token.clone()
    }
}

impl TokenProvider for String {
    fn token(&self) -> String {
        self.clone()
    }
}

impl TokenProvider for &str {
    fn token(&self) -> String {
        self.to_string()
    }
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn token(&self) -> String {
        (**self).token()
    }
}
