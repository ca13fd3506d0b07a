//! The incremental feed materialization engine: filter descriptors are
//! turned into storage fetches by [`query::FeedQuery`], the results are
//! windowed by [`window::ScrollWindow`] or paged by [`pager::Pager`], and
//! view counts are recorded best-effort by [`view_count::ViewCountService`].

pub mod pager;
pub mod query;
pub mod stats;
pub mod view_count;
pub mod window;

pub use pager::Pager;
pub use query::{FeedBatch, FeedCount, FeedErrorKind, FeedQuery, FeedSingle};
pub use stats::{FeedStats, FeedStatsPoller};
pub use view_count::{AtomicCounter, SqliteAtomicCounter, ViewCountService};
pub use window::{LoadMore, ScrollOptions, ScrollWindow};
