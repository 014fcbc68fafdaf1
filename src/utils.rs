use crate::prelude::*;

pub fn format_money(amount: Decimal, currency: &str) -> String {
  format!("{:.2} {}", amount.round_dp(2), currency)
}

pub fn format_duration(duration: Duration) -> String {
  humantime::format_duration(duration).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_money_rounds_to_cents() {
    assert_eq!(format_money(Decimal::new(21749, 4), "EUR"), "2.17 EUR");
    assert_eq!(format_money(Decimal::new(1251, 4), "EUR"), "0.13 EUR");
    assert_eq!(format_money(Decimal::from(15), "EUR"), "15.00 EUR");
  }

  #[test]
  fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
  }
}
