use serde::Serialize;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommissionRateTier {
  pub level: u8,
  /// Percent of the affiliate pool paid at this level
  pub percentage: u32,
  pub transaction_share: u32,
  pub subscription_share: u32,
}

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

// NOTE: percentages sum to 30, so 70% of every pool stays undistributed.
pub const COMMISSION_RATES: [CommissionRateTier; 5] = [
  CommissionRateTier {
    level: 1,
    percentage: 25,
    transaction_share: 50,
    subscription_share: 30,
  },
  CommissionRateTier {
    level: 2,
    percentage: 1,
    transaction_share: 10,
    subscription_share: 5,
  },
  CommissionRateTier {
    level: 3,
    percentage: 1,
    transaction_share: 5,
    subscription_share: 3,
  },
  CommissionRateTier {
    level: 4,
    percentage: 2,
    transaction_share: 3,
    subscription_share: 2,
  },
  CommissionRateTier {
    level: 5,
    percentage: 1,
    transaction_share: 2,
    subscription_share: 1,
  },
];

impl CommissionRateTier {
  pub fn share_of(&self, pool: Decimal) -> Result<Decimal> {
    Decimal::from(self.percentage)
      .checked_div(Decimal::ONE_HUNDRED)
      .and_then(|rate| pool.checked_mul(rate))
      .ok_or_else(|| Error::overflow("level share"))
  }
}

pub fn is_valid_level(level: u8) -> bool {
  (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_table_has_five_ordered_levels() {
    let levels: Vec<u8> = COMMISSION_RATES.iter().map(|t| t.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    assert!(levels.iter().all(|&l| is_valid_level(l)));
  }

  #[test]
  fn test_percentages_are_not_normalized() {
    let sum: u32 = COMMISSION_RATES.iter().map(|t| t.percentage).sum();
    assert_eq!(sum, 30);
  }

  #[test]
  fn test_share_of_pool() {
    let pool = Decimal::from(50);
    assert_eq!(COMMISSION_RATES[0].share_of(pool).unwrap(), Decimal::new(125, 1));
    assert_eq!(COMMISSION_RATES[1].share_of(pool).unwrap(), Decimal::new(5, 1));
    assert_eq!(COMMISSION_RATES[3].share_of(pool).unwrap(), Decimal::from(1));
  }

  #[test]
  fn test_share_of_large_pool_fits() {
    let pool: Decimal = "35000000000000000000000000000".parse().unwrap();
    let share = COMMISSION_RATES[0].share_of(pool).unwrap();
    assert_eq!(share, "8750000000000000000000000000".parse().unwrap());
  }

  #[test]
  fn test_level_bounds() {
    assert!(!is_valid_level(0));
    assert!(!is_valid_level(6));
  }
}
