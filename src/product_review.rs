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

use serde::Serialize;

use crate::invitation::DEFAULT_LOCALE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReviewInvitationContext {
    business_unit_id: String,
    redirect_uri: String,
    locale: String
}

impl ProductReviewInvitationContext {
    pub fn new(business_unit_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            business_unit_id: business_unit_id.into(),
            redirect_uri: redirect_uri.into(),
            locale: DEFAULT_LOCALE.to_string()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn business_unit_id(&self) -> &str {
        &self.business_unit_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

/// Product the consumer is asked to review, for shops that don't have
/// their catalogue imported into Trustpilot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub product_url: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        product_url: impl Into<String>,
        image_url: impl Into<String>
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            product_url: product_url.into(),
            image_url: image_url.into(),
            gtin: None,
            mpn: None,
            brand: None
        }
    }
}

/// Paging and language for [`crate::InvitationClient::get_product_reviews`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReviewsQuery {
    pub language: String,
    pub page: u32,
    pub per_page: u32
}

impl Default for ProductReviewsQuery {
    fn default() -> Self {
        Self {
            language: "de".to_string(),
            page: 1,
            per_page: 100
        }
    }
}
