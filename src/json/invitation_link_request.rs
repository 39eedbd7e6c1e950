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

use crate::product_review::Product;

// POST {api}/private/product-reviews/business-units/{businessUnitId}/invitation-links
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationLinkRequest<'a> {
    pub reference_id: &'a str,
    pub locale: &'a str,
    pub consumer: Consumer<'a>,
    pub redirect_uri: &'a str,
    #[serde(flatten)]
    pub selection: ProductSelection<'a>
}

#[derive(Serialize)]
pub struct Consumer<'a> {
    pub email: &'a str,
    pub name: &'a str
}

/// Exactly one of `productIds` or `products` ends up in the request body
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSelection<'a> {
    ProductIds(&'a [String]),
    Products(&'a [Product])
}

impl<'a> ProductSelection<'a> {
    /// Product ids win when any are given, otherwise the products are sent (even if empty)
    pub fn choose(product_ids: &'a [String], products: &'a [Product]) -> Self {
        if product_ids.is_empty() {
            ProductSelection::Products(products)
        } else {
            ProductSelection::ProductIds(product_ids)
        }
    }
}
