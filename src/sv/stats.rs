use serde::Serialize;

use crate::{
  entity::{CommissionEarning, EarningStatus, ServiceType},
  prelude::*,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EarningsByService {
  pub transaction: Decimal,
  pub subscription: Decimal,
}

impl EarningsByService {
  fn slot(&mut self, ty: ServiceType) -> &mut Decimal {
    match ty {
      ServiceType::Transaction => &mut self.transaction,
      ServiceType::Subscription => &mut self.subscription,
    }
  }
}

/// Aggregate view over an affiliate's earnings.
///
/// Never updated incrementally: always rebuilt from the full collection
/// with [`AffiliateStats::compute`].
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AffiliateStats {
  pub total_earnings: Decimal,
  pub pending_earnings: Decimal,
  pub paid_earnings: Decimal,
  pub total_credz_rewards: Decimal,
  pub pending_credz_rewards: Decimal,
  pub paid_credz_rewards: Decimal,
  pub referrals_by_level: BTreeMap<u8, u64>,
  pub earnings_by_service: EarningsByService,
}

fn add(acc: &mut Decimal, value: Decimal) -> Result<()> {
  *acc = acc.checked_add(value).ok_or_else(|| Error::overflow("earnings sum"))?;
  Ok(())
}

impl AffiliateStats {
  pub fn compute<'a>(
    earnings: impl IntoIterator<Item = &'a CommissionEarning>,
  ) -> Result<Self> {
    let mut stats = Self::default();

    for earning in earnings {
      add(&mut stats.total_earnings, earning.amount)?;
      add(&mut stats.total_credz_rewards, earning.credz_reward)?;

      match earning.status {
        EarningStatus::Pending => {
          add(&mut stats.pending_earnings, earning.amount)?;
          add(&mut stats.pending_credz_rewards, earning.credz_reward)?;
        }
        EarningStatus::Paid => {
          add(&mut stats.paid_earnings, earning.amount)?;
          add(&mut stats.paid_credz_rewards, earning.credz_reward)?;
        }
      }

      add(stats.earnings_by_service.slot(earning.service_type), earning.amount)?;
      *stats.referrals_by_level.entry(earning.level).or_default() += 1;
    }

    Ok(stats)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn earning(
    amount: &str,
    ty: ServiceType,
    level: u8,
    status: EarningStatus,
  ) -> CommissionEarning {
    let amount: Decimal = amount.parse().unwrap();
    CommissionEarning {
      id: format!("test-L{level}"),
      affiliate_id: "aff".into(),
      amount,
      currency: "EUR".into(),
      credz_reward: amount * Decimal::new(2, 2),
      service_type: ty,
      level,
      timestamp: Utc::now(),
      status,
      referred_user_id: "user".into(),
    }
  }

  #[test]
  fn test_empty_collection() {
    let earnings: Vec<CommissionEarning> = Vec::new();
    let stats = AffiliateStats::compute(&earnings).unwrap();
    assert_eq!(stats, AffiliateStats::default());
    assert!(stats.referrals_by_level.is_empty());
  }

  #[test]
  fn test_totals_split_by_status_and_service() {
    let earnings = vec![
      earning("10", ServiceType::Transaction, 1, EarningStatus::Pending),
      earning("2.5", ServiceType::Subscription, 1, EarningStatus::Paid),
      earning("0.5", ServiceType::Transaction, 2, EarningStatus::Paid),
    ];

    let stats = AffiliateStats::compute(&earnings).unwrap();

    assert_eq!(stats.total_earnings, Decimal::new(130, 1));
    assert_eq!(stats.pending_earnings, Decimal::from(10));
    assert_eq!(stats.paid_earnings, Decimal::from(3));
    assert_eq!(
      stats.total_earnings,
      stats.pending_earnings + stats.paid_earnings
    );
    assert_eq!(stats.earnings_by_service.transaction, Decimal::new(105, 1));
    assert_eq!(stats.earnings_by_service.subscription, Decimal::new(25, 1));
    assert_eq!(stats.referrals_by_level.get(&1), Some(&2));
    assert_eq!(stats.referrals_by_level.get(&2), Some(&1));
    assert_eq!(stats.referrals_by_level.get(&3), None);
  }

  #[test]
  fn test_credz_rewards_follow_status() {
    let earnings = vec![
      earning("100", ServiceType::Transaction, 1, EarningStatus::Pending),
      earning("50", ServiceType::Transaction, 1, EarningStatus::Paid),
    ];

    let stats = AffiliateStats::compute(&earnings).unwrap();

    assert_eq!(stats.total_credz_rewards, Decimal::from(3));
    assert_eq!(stats.pending_credz_rewards, Decimal::from(2));
    assert_eq!(stats.paid_credz_rewards, Decimal::from(1));
  }

  #[test]
  fn test_overflow_is_internal_error() {
    let mut big = earning("1", ServiceType::Transaction, 1, EarningStatus::Paid);
    big.amount = Decimal::MAX;
    let earnings = vec![big.clone(), big];

    let result = AffiliateStats::compute(&earnings);
    assert!(matches!(result, Err(Error::Internal(_))));
  }
}
