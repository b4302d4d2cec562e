// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Account credentials
//!
//! The access key ID doubles as the `account` label on every sample.

use crate::error::{ExporterError, Result};
use std::fmt;

/// Static AWS key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Something that can hand out credentials at the start of a scrape
pub trait CredentialSource: Send + Sync {
    fn resolve(&self) -> Result<Credentials>;
}

/// Credentials fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(access_key_id, secret_access_key),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self) -> Result<Credentials> {
        if self.credentials.access_key_id.is_empty() {
            return Err(ExporterError::Credentials("access key ID is empty".into()));
        }
        if self.credentials.secret_access_key.is_empty() {
            return Err(ExporterError::Credentials("secret key is empty".into()));
        }
        Ok(self.credentials.clone())
    }
}
