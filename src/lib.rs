use crate::alert::{AlertPolicy, GateResult};
use crate::cli::AlertWardConfig;
use crate::error::Result;
use crate::request::ZapClient;
use console::{style, Emoji};
use log::{debug, info};

pub mod alert;
pub mod cli;
pub mod error;
pub mod output;
pub mod request;

/// Single-shot alert threshold gate.
///
/// Fetches the alert count summary from the scanning service and evaluates
/// it against the configured threshold policy.
pub struct AlertWard {
  config: AlertWardConfig,
  policy: AlertPolicy,
}

impl AlertWard {
  pub fn new(config: &AlertWardConfig) -> Result<Self> {
    let policy = config.alert_policy()?;
    Ok(Self {
      config: config.clone(),
      policy,
    })
  }
  pub async fn check(&self) -> Result<GateResult> {
    debug!("{}: {}", Emoji("🚦", "start"), self.config.target);
    let client = ZapClient::new(&self.config)?;
    let counts = client.alert_counts_by_risk().await?;
    let breaches = self.policy.evaluate(&counts);
    if breaches.is_empty() {
      info!(
        "{}no alerts above the allowed thresholds",
        Emoji("✅", "")
      );
    } else {
      info!(
        "{}{} severity band(s) above the allowed thresholds",
        Emoji("🐞", ""),
        style(breaches.len()).red()
      );
    }
    debug!("{}: {}", Emoji("🔚", "end"), self.config.target);
    Ok(GateResult {
      target: self.config.target.clone(),
      counts,
      breaches,
    })
  }
}
