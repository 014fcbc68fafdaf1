use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
  Transaction,
  Subscription,
}

impl ServiceType {
  pub const ALL: [ServiceType; 2] =
    [ServiceType::Transaction, ServiceType::Subscription];

  pub fn as_str(self) -> &'static str {
    match self {
      ServiceType::Transaction => "transaction",
      ServiceType::Subscription => "subscription",
    }
  }

  pub fn rule(self) -> ServiceFeeRule {
    match self {
      // 0.2% of the traded value, half of it goes to affiliates
      ServiceType::Transaction => ServiceFeeRule {
        service_type: self,
        amount: Decimal::new(2, 3),
        currency: CURRENCY,
        affiliate_share: Decimal::new(5, 1),
      },
      // flat €29, 30% to affiliates
      ServiceType::Subscription => ServiceFeeRule {
        service_type: self,
        amount: Decimal::new(29, 0),
        currency: CURRENCY,
        affiliate_share: Decimal::new(3, 1),
      },
    }
  }
}

impl fmt::Display for ServiceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ServiceType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "transaction" => Ok(ServiceType::Transaction),
      "subscription" => Ok(ServiceType::Subscription),
      _ => Err(Error::Configuration(format!("unknown service type `{s}`"))),
    }
  }
}

/// Monthly subscription price when paid in CREDZ tokens
pub const CREDZ_SUBSCRIPTION_PRICE: i64 = 100;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  #[default]
  Card,
  Credz,
}

impl PaymentMethod {
  /// Fee base handed to the engine for a subscription checkout.
  ///
  /// CREDZ checkouts are booked at the nominal token price under the
  /// subscription rule, like card checkouts are booked at the flat price.
  pub fn subscription_fee(self) -> Result<Decimal> {
    match self {
      PaymentMethod::Card => {
        ServiceType::Subscription.rule().fee_for(Decimal::ZERO)
      }
      PaymentMethod::Credz => Ok(Decimal::from(CREDZ_SUBSCRIPTION_PRICE)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceFeeRule {
  pub service_type: ServiceType,
  /// Fee rate for transactions, flat price for subscriptions
  pub amount: Decimal,
  pub currency: &'static str,
  /// Fraction of the fee routed to the affiliate pool
  pub affiliate_share: Decimal,
}

impl ServiceFeeRule {
  /// Fee charged for a service event.
  ///
  /// Transactions pay `amount` as a rate over the traded `base`,
  /// subscriptions pay the flat `amount` and ignore `base`.
  pub fn fee_for(&self, base: Decimal) -> Result<Decimal> {
    match self.service_type {
      ServiceType::Transaction => {
        base.checked_mul(self.amount).ok_or_else(|| Error::overflow("fee"))
      }
      ServiceType::Subscription => Ok(self.amount),
    }
  }

  /// Splits a fee into `(affiliate pool, platform share)`.
  pub fn split(&self, fee: Decimal) -> Result<(Decimal, Decimal)> {
    let pool = fee
      .checked_mul(self.affiliate_share)
      .ok_or_else(|| Error::overflow("affiliate pool"))?;
    let platform =
      fee.checked_sub(pool).ok_or_else(|| Error::overflow("platform share"))?;
    Ok((pool, platform))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
  }

  #[test]
  fn test_parse_known_types() {
    assert_eq!(
      "transaction".parse::<ServiceType>().unwrap(),
      ServiceType::Transaction
    );
    assert_eq!(
      "subscription".parse::<ServiceType>().unwrap(),
      ServiceType::Subscription
    );
  }

  #[test]
  fn test_parse_unknown_type_is_configuration_error() {
    let err = "invalid".parse::<ServiceType>().unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));

    // closed set, no case folding
    assert!("Transaction".parse::<ServiceType>().is_err());
  }

  #[test]
  fn test_transaction_fee_is_rate_of_notional() {
    let rule = ServiceType::Transaction.rule();
    assert_eq!(rule.fee_for(dec("1000")).unwrap(), dec("2"));
    assert_eq!(rule.currency, "EUR");
  }

  #[test]
  fn test_subscription_fee_is_flat() {
    let rule = ServiceType::Subscription.rule();
    assert_eq!(rule.fee_for(Decimal::ZERO).unwrap(), dec("29"));
    assert_eq!(rule.fee_for(dec("500")).unwrap(), dec("29"));
  }

  #[test]
  fn test_subscription_fee_by_payment_method() {
    assert_eq!(PaymentMethod::default(), PaymentMethod::Card);
    assert_eq!(PaymentMethod::Card.subscription_fee().unwrap(), dec("29"));
    assert_eq!(PaymentMethod::Credz.subscription_fee().unwrap(), dec("100"));
  }

  #[test]
  fn test_split_keeps_remainder_for_platform() {
    let (pool, platform) =
      ServiceType::Transaction.rule().split(dec("100")).unwrap();
    assert_eq!(pool, dec("50"));
    assert_eq!(platform, dec("50"));

    let (pool, platform) =
      ServiceType::Subscription.rule().split(dec("29")).unwrap();
    assert_eq!(pool, dec("8.7"));
    assert_eq!(platform, dec("20.3"));
  }

  #[test]
  fn test_serde_lowercase() {
    assert_eq!(
      json::to_string(&ServiceType::Subscription).unwrap(),
      "\"subscription\""
    );
  }
}
