//! Decision Feed Client.
//!
//! Reads decision-log rows from the hosted tabular store (one page, newest
//! first) and maps each row's field map into a flat [`DecisionRecord`].
//! Missing or malformed fields are substituted with `None` or a documented
//! default rather than failing the whole page.

mod client;
mod types;

pub use client::{DEFAULT_LIMIT, DecisionFeedClient, FeedError};
pub use types::DecisionRecord;
