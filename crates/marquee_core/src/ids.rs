use std::fmt;

use thiserror::Error;

/// Rejected caller input. Raised before anything is dispatched; never stored in feed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("page must be >= 1 (got {page})")]
    PageOutOfRange { page: i64 },
    #[error("invalid page number {raw:?}")]
    InvalidPage { raw: String },
    #[error("listing id must not be empty")]
    EmptyId,
    #[error("invalid listing id {raw:?}")]
    InvalidId { raw: String },
}

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(page: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::PageOutOfRange { page: 0 });
        }
        Ok(Self(page))
    }

    /// Parses user input such as `"3"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed.parse().map_err(|_| ValidationError::InvalidPage {
            raw: trimmed.to_string(),
        })?;
        if value < 1 {
            return Err(ValidationError::PageOutOfRange { page: value });
        }
        let page = u32::try_from(value).map_err(|_| ValidationError::InvalidPage {
            raw: trimmed.to_string(),
        })?;
        Self::new(page)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_first(self) -> bool {
        self.0 == 1
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote identifier of a listing; stable across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingId(u64);

impl ListingId {
    pub fn new(id: u64) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        let id = trimmed.parse().map_err(|_| ValidationError::InvalidId {
            raw: trimmed.to_string(),
        })?;
        Self::new(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
