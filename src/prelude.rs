pub use std::{collections::BTreeMap, sync::Arc, time::Duration};

pub use chrono::{DateTime, Utc};
pub use dashmap::DashMap;
pub use rust_decimal::Decimal;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
