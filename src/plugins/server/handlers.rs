use axum::{
  Json, Router,
  extract::{Path, Query, State},
  routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{
    COMMISSION_RATES, CommissionEarning, CommissionRateTier, PaymentMethod,
    ServiceFeeRule, ServiceType,
  },
  prelude::*,
  state::AppState,
  sv::{AffiliateStats, Commission, Distribution, EarningFilter},
};

type AppRef = State<Arc<AppState>>;

pub fn routes() -> Router<Arc<AppState>> {
  Router::new()
    .route("/health", get(health))
    .route("/api/commission/structure", get(structure))
    .route("/api/affiliates/{id}/events", post(record_event))
    .route("/api/affiliates/{id}/trades", post(record_trade))
    .route("/api/affiliates/{id}/subscriptions", post(record_subscription))
    .route("/api/affiliates/{id}/payout", post(payout))
    .route("/api/affiliates/{id}/stats", get(stats))
    .route("/api/affiliates/{id}/earnings", get(earnings))
    .route("/api/affiliates/{id}/level", get(level))
}

pub async fn health() -> &'static str {
  "OK"
}

#[derive(Serialize)]
pub struct Structure {
  tiers: [CommissionRateTier; 5],
  services: Vec<ServiceFeeRule>,
}

pub async fn structure() -> Json<Structure> {
  Json(Structure {
    tiers: COMMISSION_RATES,
    services: ServiceType::ALL.iter().map(|ty| ty.rule()).collect(),
  })
}

#[derive(Deserialize)]
pub struct EventReq {
  amount: Decimal,
  service_type: String,
  referred_user_id: String,
}

#[derive(Deserialize)]
pub struct TradeReq {
  notional: Decimal,
  referred_user_id: String,
}

#[derive(Deserialize)]
pub struct SubscriptionReq {
  referred_user_id: String,
  #[serde(default)]
  payment_method: PaymentMethod,
}

fn record(
  app: &AppState,
  affiliate_id: &str,
  fee: Decimal,
  service_type: ServiceType,
  referred_user_id: &str,
) -> Result<Json<Option<Distribution>>> {
  if affiliate_id.trim().is_empty() {
    return Ok(Json(None));
  }

  let distribution = app.with_session(affiliate_id, |commission| {
    commission.record(
      fee,
      service_type.as_str(),
      referred_user_id,
      Some(affiliate_id),
    )
  })?;

  Ok(Json(distribution))
}

pub async fn record_event(
  State(app): AppRef,
  Path(id): Path<String>,
  Json(req): Json<EventReq>,
) -> Result<Json<Option<Distribution>>> {
  let service_type = req.service_type.parse::<ServiceType>()?;
  record(&app, &id, req.amount, service_type, &req.referred_user_id)
}

pub async fn record_trade(
  State(app): AppRef,
  Path(id): Path<String>,
  Json(req): Json<TradeReq>,
) -> Result<Json<Option<Distribution>>> {
  if req.notional <= Decimal::ZERO {
    return Err(Error::InvalidArgs("Amount must be positive".into()));
  }

  let fee = ServiceType::Transaction.rule().fee_for(req.notional)?;
  record(&app, &id, fee, ServiceType::Transaction, &req.referred_user_id)
}

pub async fn record_subscription(
  State(app): AppRef,
  Path(id): Path<String>,
  Json(req): Json<SubscriptionReq>,
) -> Result<Json<Option<Distribution>>> {
  let fee = req.payment_method.subscription_fee()?;
  record(&app, &id, fee, ServiceType::Subscription, &req.referred_user_id)
}

#[derive(Serialize)]
pub struct PayoutResp {
  success: bool,
}

pub async fn payout(
  State(app): AppRef,
  Path(id): Path<String>,
) -> Json<PayoutResp> {
  // nothing recorded yet means nothing pending
  let success = app
    .modify_session(&id, |commission| commission.request_payout())
    .unwrap_or(true);

  Json(PayoutResp { success })
}

pub async fn stats(
  State(app): AppRef,
  Path(id): Path<String>,
) -> Json<AffiliateStats> {
  Json(app.read_session(&id, |c| c.stats().clone()).unwrap_or_default())
}

pub async fn earnings(
  State(app): AppRef,
  Path(id): Path<String>,
  Query(filter): Query<EarningFilter>,
) -> Result<Json<Vec<CommissionEarning>>> {
  filter.validate()?;
  Ok(Json(app.read_session(&id, |c| c.earnings(&filter)).unwrap_or_default()))
}

#[derive(Serialize)]
pub struct LevelResp {
  affiliate_id: String,
  level: u8,
}

pub async fn level(Path(id): Path<String>) -> Json<LevelResp> {
  let level = Commission::affiliate_level_of(&id);
  Json(LevelResp { affiliate_id: id, level })
}
