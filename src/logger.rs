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

use std::sync::Arc;
use tracing::Level;

/// Receives the diagnostics the client writes on its failure paths
pub trait Logger {
    fn log(&self, level: Level, message: &str);
}

/// Discards everything, used when no logger is configured
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _message: &str) { }
}

/// Forwards to whatever `tracing` subscriber the application installed
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "trustpilot_invitations", "{message}"),
            Level::WARN => tracing::warn!(target: "trustpilot_invitations", "{message}"),
            Level::INFO => tracing::info!(target: "trustpilot_invitations", "{message}"),
            Level::DEBUG => tracing::debug!(target: "trustpilot_invitations", "{message}"),
            _ => tracing::trace!(target: "trustpilot_invitations", "{message}")
        }
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}
