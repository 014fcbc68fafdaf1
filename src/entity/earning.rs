use serde::{Deserialize, Serialize};

use super::ServiceType;
use crate::prelude::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningStatus {
  #[default]
  Pending,
  Paid,
}

/// CREDZ tokens accrued per unit of commission
pub fn credz_reward_rate() -> Decimal {
  Decimal::new(2, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionEarning {
  pub id: String,
  pub affiliate_id: String,
  pub amount: Decimal,
  pub currency: String,
  pub credz_reward: Decimal,
  pub service_type: ServiceType,
  pub level: u8,
  pub timestamp: DateTime<Utc>,
  pub status: EarningStatus,
  pub referred_user_id: String,
}

impl CommissionEarning {
  pub fn is_pending(&self) -> bool {
    self.status == EarningStatus::Pending
  }
}
