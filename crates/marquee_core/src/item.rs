use chrono::NaiveDate;

use crate::{ListingId, PageNumber};

/// Shown by the detail view when a listing has no poster.
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450";

/// Label used when a release date is missing or could not be parsed.
pub const UNKNOWN_RELEASE_LABEL: &str = "Unknown";

const PROFILE_SIZE: &str = "w276_and_h350_face";

/// Width variants served by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Original,
}

impl ImageSize {
    pub fn as_path_segment(self) -> &'static str {
        match self {
            ImageSize::Small => "w300",
            ImageSize::Medium => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// One row of a feed. Value type; never mutated after it arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    pub id: ListingId,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f32,
    pub release_date: Option<NaiveDate>,
    pub overview: String,
}

impl ListingItem {
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }

    pub fn release_label(&self) -> String {
        release_label(self.release_date)
    }

    /// `None` when the listing has no poster; the caller renders its own placeholder.
    pub fn poster_url(&self, image_base: &str, size: ImageSize) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(image_base, size.as_path_segment(), path))
    }
}

/// Parses `YYYY-MM-DD`; anything else (including `""`) is treated as absent.
pub fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn release_label(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_RELEASE_LABEL.to_string(),
    }
}

fn image_url(base: &str, size: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Fully hydrated record shown on the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub id: ListingId,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
}

impl ListingDetail {
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }

    pub fn release_label(&self) -> String {
        release_label(self.release_date)
    }

    /// Falls back to [`PLACEHOLDER_POSTER_URL`].
    pub fn poster_url(&self, image_base: &str) -> String {
        match self.poster_path.as_deref() {
            Some(path) => image_url(image_base, ImageSize::Original.as_path_segment(), path),
            None => PLACEHOLDER_POSTER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

impl CastMember {
    pub fn profile_url(&self, image_base: &str) -> Option<String> {
        self.profile_path
            .as_deref()
            .map(|path| image_url(image_base, PROFILE_SIZE, path))
    }
}

/// One page of a listing response. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub page: PageNumber,
    pub total_pages: u32,
    pub items: Vec<ListingItem>,
}
