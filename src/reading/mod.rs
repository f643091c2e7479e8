pub mod feed;
pub mod record;
pub mod statistics;

pub use feed::{parse_feed, FeedError};
pub use record::{CloudStats, DailyRecord, Statistics};
