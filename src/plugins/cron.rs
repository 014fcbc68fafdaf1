use std::sync::Arc;

use async_trait::async_trait;

use crate::{plugins::Plugin, prelude::*, state::AppState, utils};

pub struct GC;

#[async_trait]
impl Plugin for GC {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    if app.config.session_ttl.is_zero() {
      info!("Session GC disabled via config (zero TTL)");
      return Ok(());
    }

    info!(
      "Session GC started (TTL: {}, every {})",
      utils::format_duration(app.config.session_ttl),
      utils::format_duration(app.config.gc_interval)
    );

    tokio::spawn(async move {
      let mut interval = tokio::time::interval(app.config.gc_interval);
      loop {
        interval.tick().await;
        let dropped = app.gc_sessions();
        if dropped > 0 {
          debug!("Dropped {dropped} idle affiliate sessions");
        }
      }
    });

    Ok(())
  }
}
