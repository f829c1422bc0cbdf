use crate::error::{new_io_error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  // name:high
  High,
  // name:medium
  Medium,
  // name:low
  Low,
  // name:informational
  Informational,
}

/// Alert counts grouped by severity, as returned by the scanning service.
///
/// `High`, `Medium` and `Low` are required; `Informational` is present on
/// newer service versions and never participates in gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCounts {
  #[serde(rename = "High")]
  pub high: u64,
  #[serde(rename = "Medium")]
  pub medium: u64,
  #[serde(rename = "Low")]
  pub low: u64,
  #[serde(rename = "Informational", default, skip_serializing_if = "Option::is_none")]
  pub informational: Option<u64>,
}

impl AlertCounts {
  pub fn get(&self, severity: Severity) -> u64 {
    match severity {
      Severity::High => self.high,
      Severity::Medium => self.medium,
      Severity::Low => self.low,
      Severity::Informational => self.informational.unwrap_or_default(),
    }
  }
}

/// Maximum allowed alert count per gating band.
///
/// The default policy allows nothing: any alert fails the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AlertPolicy {
  #[serde(default)]
  pub high: u64,
  #[serde(default)]
  pub medium: u64,
  #[serde(default)]
  pub low: u64,
}

impl AlertPolicy {
  pub fn from_yaml(yaml_path: &Path) -> Result<Self> {
    let f = File::open(yaml_path)?;
    serde_yaml::from_reader::<File, AlertPolicy>(f).map_err(|x| new_io_error(&x.to_string()))
  }
  pub fn allowed(&self, severity: Severity) -> u64 {
    match severity {
      Severity::High => self.high,
      Severity::Medium => self.medium,
      Severity::Low => self.low,
      Severity::Informational => u64::MAX,
    }
  }
  /// Evaluate counts against the policy, one breach per exceeded band.
  pub fn evaluate(&self, counts: &AlertCounts) -> Vec<Breach> {
    let mut breaches = Vec::new();
    for severity in [Severity::High, Severity::Medium, Severity::Low] {
      let count = counts.get(severity);
      let allowed = self.allowed(severity);
      if count > allowed {
        breaches.push(Breach {
          severity,
          count,
          allowed,
        });
      }
    }
    breaches
  }
}

/// A severity band whose count exceeds the allowed maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Breach {
  pub severity: Severity,
  pub count: u64,
  pub allowed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GateResult {
  pub target: String,
  pub counts: AlertCounts,
  pub breaches: Vec<Breach>,
}

impl GateResult {
  pub fn passed(&self) -> bool {
    self.breaches.is_empty()
  }
  pub fn exit_code(&self) -> i32 {
    if self.passed() { 0 } else { 1 }
  }
}
