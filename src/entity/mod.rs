pub mod earning;
pub mod service;
pub mod tier;

pub use earning::{CommissionEarning, EarningStatus};
pub use service::{PaymentMethod, ServiceFeeRule, ServiceType};
pub use tier::{COMMISSION_RATES, CommissionRateTier};
