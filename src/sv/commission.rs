use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{
    COMMISSION_RATES, CommissionEarning, EarningStatus, ServiceType,
    earning::credz_reward_rate, service::CURRENCY, tier,
  },
  prelude::*,
  sv::stats::AffiliateStats,
  utils::format_money,
};

/// Level reported for every affiliate until promotion rules exist.
pub const DEFAULT_LEVEL: u8 = 1;

/// Result of fanning one fee out over the referral levels.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
  pub event_id: Uuid,
  pub affiliate_pool: Decimal,
  /// Remainder kept by the platform, reported but never stored
  pub platform_share: Decimal,
  pub earnings: Vec<CommissionEarning>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EarningFilter {
  pub level: Option<u8>,
  pub status: Option<EarningStatus>,
  pub service_type: Option<ServiceType>,
}

impl EarningFilter {
  pub fn validate(&self) -> Result<()> {
    match self.level {
      Some(level) if !tier::is_valid_level(level) => {
        Err(Error::InvalidArgs(format!(
          "level must be between {} and {}, got {level}",
          tier::MIN_LEVEL,
          tier::MAX_LEVEL
        )))
      }
      _ => Ok(()),
    }
  }

  pub fn matches(&self, earning: &CommissionEarning) -> bool {
    self.level.is_none_or(|level| earning.level == level)
      && self.status.is_none_or(|status| earning.status == status)
      && self.service_type.is_none_or(|ty| earning.service_type == ty)
  }
}

/// Commission engine of a single affiliate session.
///
/// Owns the earnings ledger and the stats derived from it. Every mutation
/// rebuilds the stats from the whole ledger and is applied only if that
/// succeeds.
#[derive(Debug, Default)]
pub struct Commission {
  earnings: Vec<CommissionEarning>,
  stats: AffiliateStats,
}

impl Commission {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a fee-generating event and fan it out over all levels.
  ///
  /// Returns `None` without touching the ledger when no affiliate is in
  /// context.
  pub fn record(
    &mut self,
    amount: Decimal,
    service_type: &str,
    referred_user_id: &str,
    affiliate_id: Option<&str>,
  ) -> Result<Option<Distribution>> {
    let Some(affiliate_id) = affiliate_id.filter(|id| !id.trim().is_empty()) else {
      debug!("No affiliate in context, skipping {service_type} commission");
      return Ok(None);
    };

    let rule = service_type.parse::<ServiceType>()?.rule();

    if amount < Decimal::ZERO {
      return Err(Error::InvalidArgs("Amount must not be negative".into()));
    }

    let (pool, platform) = rule.split(amount)?;
    debug!(
      "{} fee {amount}: pool {pool}, platform {platform}",
      rule.service_type
    );

    let event_id = Uuid::now_v7();
    let now = Utc::now();

    let batch = COMMISSION_RATES
      .iter()
      .map(|tier| -> Result<CommissionEarning> {
        let amount = tier.share_of(pool)?;
        let credz_reward = amount
          .checked_mul(credz_reward_rate())
          .ok_or_else(|| Error::overflow("credz reward"))?;

        Ok(CommissionEarning {
          id: format!("{}-L{}", event_id.simple(), tier.level),
          affiliate_id: affiliate_id.to_string(),
          amount,
          currency: rule.currency.to_string(),
          credz_reward,
          service_type: rule.service_type,
          level: tier.level,
          timestamp: now,
          status: EarningStatus::Pending,
          referred_user_id: referred_user_id.to_string(),
        })
      })
      .collect::<Result<Vec<_>>>()?;

    let stats = AffiliateStats::compute(self.earnings.iter().chain(&batch))?;

    self.earnings.extend(batch.iter().cloned());
    self.stats = stats;

    info!(
      "Recorded {} commission for {affiliate_id} from {referred_user_id}: {} \
       ({} earnings in ledger)",
      rule.service_type,
      format_money(batch.iter().map(|e| e.amount).sum(), rule.currency),
      self.len()
    );

    Ok(Some(Distribution {
      event_id,
      affiliate_pool: pool,
      platform_share: platform,
      earnings: batch,
    }))
  }

  /// Mark every pending earning as paid.
  ///
  /// Settlement with an external payout provider is not part of this step.
  pub fn request_payout(&mut self) -> bool {
    match self.try_payout() {
      Ok(count) => {
        info!(
          "Payout completed: {count} earnings, {} paid in total",
          format_money(self.stats.paid_earnings, CURRENCY)
        );
        true
      }
      Err(err) => {
        error!("Payout failed: {err}");
        false
      }
    }
  }

  fn try_payout(&mut self) -> Result<usize> {
    if self.is_empty() {
      return Ok(0);
    }

    let paid = |e: &CommissionEarning| CommissionEarning {
      status: EarningStatus::Paid,
      ..e.clone()
    };

    let next: Vec<_> = self.earnings.iter().map(paid).collect();
    let stats = AffiliateStats::compute(&next)?;

    let count = self.earnings.iter().filter(|e| e.is_pending()).count();
    self.earnings = next;
    self.stats = stats;

    Ok(count)
  }

  pub fn affiliate_level_of(_user_id: &str) -> u8 {
    DEFAULT_LEVEL
  }

  pub fn stats(&self) -> &AffiliateStats {
    &self.stats
  }

  pub fn earnings(&self, filter: &EarningFilter) -> Vec<CommissionEarning> {
    self.earnings.iter().filter(|e| filter.matches(e)).cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.earnings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.earnings.is_empty()
  }
}
