pub mod commission;
pub mod stats;

pub use commission::{Commission, Distribution, EarningFilter};
pub use stats::AffiliateStats;
