//! One-shot success messages carried across the post-mutation redirect
//!
//! The message kind is stored in a `flash` cookie on the redirect and the
//! list page clears it once shown.

use axum::http::{HeaderMap, header::COOKIE};

pub const COOKIE_NAME: &str = "flash";

/// Set-Cookie value that removes the flash
pub const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Created,
    Updated,
    Deleted,
}

impl FlashKind {
    fn code(&self) -> &'static str {
        match self {
            FlashKind::Created => "created",
            FlashKind::Updated => "updated",
            FlashKind::Deleted => "deleted",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "created" => Some(FlashKind::Created),
            "updated" => Some(FlashKind::Updated),
            "deleted" => Some(FlashKind::Deleted),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FlashKind::Created => "Reservation created successfully!",
            FlashKind::Updated => "Reservation updated successfully!",
            FlashKind::Deleted => "Reservation deleted successfully!",
        }
    }

    /// Set-Cookie value carrying this flash to the next page
    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
            COOKIE_NAME,
            self.code()
        )
    }

    /// Flash sent back by the browser, if any
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, code)| Self::from_code(code))
    }
}
