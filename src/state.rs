use crate::{config::Config, prelude::*, sv::Commission};

pub struct Session {
  pub commission: Commission,
  pub last_seen: DateTime<Utc>,
}

impl Session {
  fn new() -> Self {
    Self { commission: Commission::new(), last_seen: Utc::now() }
  }
}

pub struct AppState {
  pub config: Config,
  /// One commission engine per affiliate. Holding an entry locks its shard,
  /// so mutations of one affiliate never interleave.
  pub sessions: DashMap<String, Session>,
}

impl AppState {
  pub fn new(config: Config) -> Self {
    Self { config, sessions: DashMap::new() }
  }

  /// Run `f` against the affiliate's engine, opening a session if needed.
  pub fn with_session<T>(
    &self,
    affiliate_id: &str,
    f: impl FnOnce(&mut Commission) -> T,
  ) -> T {
    let mut session = self.sessions.entry(affiliate_id.to_string()).or_insert_with(
      || {
        debug!("Opening session for affiliate {affiliate_id}");
        Session::new()
      },
    );
    session.last_seen = Utc::now();
    f(&mut session.commission)
  }

  /// Mutate the affiliate's engine only if a session already exists.
  pub fn modify_session<T>(
    &self,
    affiliate_id: &str,
    f: impl FnOnce(&mut Commission) -> T,
  ) -> Option<T> {
    self.sessions.get_mut(affiliate_id).map(|mut session| {
      session.last_seen = Utc::now();
      f(&mut session.commission)
    })
  }

  /// Read the affiliate's engine without opening a session.
  pub fn read_session<T>(
    &self,
    affiliate_id: &str,
    f: impl FnOnce(&Commission) -> T,
  ) -> Option<T> {
    self.sessions.get(affiliate_id).map(|session| f(&session.commission))
  }

  /// Drop sessions idle for longer than the configured TTL. Sessions still
  /// holding pending earnings are kept until they are paid out.
  pub fn gc_sessions(&self) -> usize {
    let Ok(ttl) = chrono::TimeDelta::from_std(self.config.session_ttl) else {
      return 0;
    };
    if ttl.is_zero() {
      return 0;
    }

    let now = Utc::now();
    let before = self.sessions.len();
    self.sessions.retain(|affiliate_id, session| {
      if now - session.last_seen < ttl {
        return true;
      }
      let pending = session.commission.stats().pending_earnings;
      if pending > Decimal::ZERO {
        debug!("Keeping idle session {affiliate_id}: {pending} pending");
        return true;
      }
      false
    });
    before.saturating_sub(self.sessions.len())
  }
}
