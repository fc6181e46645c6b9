//! Redirect target URLs.

use std::fmt;

/// URL prefix of a Google Drive file viewer link.
pub const DRIVE_URL_PREFIX: &str = "https://drive.google.com/file/d/";

/// URL suffix of a Google Drive file viewer link.
pub const DRIVE_URL_SUFFIX: &str = "/view";

/// External URL a request for the file is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    /// Build the viewer URL for `file_id`.
    pub fn for_file(file_id: &str) -> Self {
        Self(format!("{DRIVE_URL_PREFIX}{file_id}{DRIVE_URL_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
