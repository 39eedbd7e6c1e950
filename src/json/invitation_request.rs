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

// POST {invitations}/private/business-units/{businessUnitId}/invitations
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRequest<'a> {
    pub recipient_email: &'a str,
    pub recipient_name: &'a str,
    pub reference_id: &'a str,
    pub template_id: &'a str,
    pub locale: &'a str,
    pub sender_name: &'a str,
    pub sender_email: &'a str,
    pub reply_to: &'a str,
    /// ISO-8601 with numeric offset, e.g. `2024-03-01T10:00:00+01:00`
    pub preferred_send_time: String,
    pub tags: &'a [String],
    pub redirect_uri: &'a str
}
