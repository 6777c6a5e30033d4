use crate::{CastMember, ListingDetail, ListingId};

/// Detail screen state for the most recently requested listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    id: Option<ListingId>,
    item: Option<ListingDetail>,
    credits: Option<Vec<CastMember>>,
    error: Option<String>,
    detail_pending: bool,
    credits_pending: bool,
    generation: u64,
}

impl DetailState {
    pub fn id(&self) -> Option<ListingId> {
        self.id
    }

    pub fn item(&self) -> Option<&ListingDetail> {
        self.item.as_ref()
    }

    pub fn credits(&self) -> Option<&[CastMember]> {
        self.credits.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loading until both the record and the cast list settled.
    pub fn is_loading(&self) -> bool {
        self.detail_pending || self.credits_pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn begin(&mut self, id: ListingId) -> u64 {
        let generation = self.generation + 1;
        *self = Self {
            id: Some(id),
            detail_pending: true,
            credits_pending: true,
            generation,
            ..Self::default()
        };
        generation
    }

    pub(crate) fn is_current(&self, id: ListingId, generation: u64) -> bool {
        self.id == Some(id) && self.generation == generation
    }

    pub(crate) fn apply_detail(&mut self, item: ListingDetail) {
        self.detail_pending = false;
        self.item = Some(item);
    }

    pub(crate) fn apply_detail_failure(&mut self, message: String) {
        self.detail_pending = false;
        self.item = None;
        self.error = Some(message);
    }

    pub(crate) fn apply_credits(&mut self, cast: Vec<CastMember>) {
        self.credits_pending = false;
        self.credits = Some(cast);
    }

    pub(crate) fn apply_credits_failure(&mut self, message: String) {
        self.credits_pending = false;
        // Keep the first error of this generation.
        if self.error.is_none() {
            self.error = Some(message);
        }
    }
}
