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

pub const DEFAULT_LOCALE: &str = "en-US";

/// Consumer receiving an invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    email: String,
    name: String
}

impl Recipient {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self { email: email.into(), name: name.into() }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Shop identity the invitation email is sent as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    email: String,
    name: String,
    reply_email: String
}

impl Sender {
    pub fn new(email: impl Into<String>, name: impl Into<String>, reply_email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            reply_email: reply_email.into()
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reply_email(&self) -> &str {
        &self.reply_email
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationContext {
    business_unit_id: String,
    template_id: String,
    redirect_uri: String,
    tags: Vec<String>,
    locale: String
}

impl InvitationContext {
    pub fn new(
        business_unit_id: impl Into<String>,
        template_id: impl Into<String>,
        redirect_uri: impl Into<String>
    ) -> Self {
        Self {
            business_unit_id: business_unit_id.into(),
            template_id: template_id.into(),
            redirect_uri: redirect_uri.into(),
            tags: Vec::new(),
            locale: DEFAULT_LOCALE.to_string()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
        where I: IntoIterator<Item = S>, S: Into<String>
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn business_unit_id(&self) -> &str {
        &self.business_unit_id
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}
