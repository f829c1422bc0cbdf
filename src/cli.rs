use crate::alert::AlertPolicy;
use crate::request::API_KEY_HEADER;
use argh::FromArgs;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub enum OutputFormat {
  #[default]
  STD,
  JSON,
}

impl FromStr for OutputFormat {
  type Err = std::io::Error;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let f = match s {
      "json" => OutputFormat::JSON,
      "txt" => OutputFormat::STD,
      _ => {
        return Err(std::io::Error::new(
          std::io::ErrorKind::InvalidInput,
          "invalid format",
        ));
      }
    };
    Ok(f)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, FromArgs)]
#[argh(description = "security scan alert threshold gate for CI pipelines")]
#[serde(rename_all = "kebab-case")]
pub struct AlertWardConfig {
  /// the scanning service base url (default: http://localhost:8080)
  #[argh(option, short = 't', default = "default_target()")]
  #[serde(default = "default_target")]
  pub target: String,
  /// api key sent in the X-ZAP-API-Key header, defaults to the ZAP_API_KEY environment variable
  #[argh(option)]
  #[serde(default)]
  pub api_key: Option<String>,
  /// set request timeout.
  #[argh(option, default = "default_timeout()")]
  #[serde(default = "default_timeout")]
  pub timeout: u64,
  /// threshold policy yaml file path
  #[argh(option)]
  #[serde(skip)]
  pub policy: Option<PathBuf>,
  /// export to the file
  #[argh(option, short = 'o')]
  #[serde(skip)]
  pub output: Option<PathBuf>,
  /// output format option[json,txt] default: txt
  #[argh(option)]
  #[serde(skip)]
  pub format: Option<OutputFormat>,
  /// disable output content coloring
  #[argh(switch)]
  #[serde(skip)]
  pub no_color: bool,
  /// silent mode, exit code only
  #[argh(switch)]
  #[serde(skip)]
  pub silent: bool,
  /// debug mode
  #[argh(switch)]
  #[serde(skip)]
  pub debug: bool,
}

pub fn default_target() -> String {
  String::from("http://localhost:8080")
}

fn default_timeout() -> u64 {
  10
}

impl AlertWardConfig {
  pub fn new() -> Self {
    let mut config: AlertWardConfig = argh::from_env();
    if config.api_key.is_none() {
      config.api_key = std::env::var("ZAP_API_KEY").ok().filter(|k| !k.is_empty());
    }
    // 补充默认输出格式
    if config.format.is_none() {
      if let Some(path) = &config.output {
        if let Some(ext) = path.extension() {
          config.format = Some(OutputFormat::from_str(&ext.to_string_lossy()).unwrap_or_default());
        }
      }
    }
    config
  }
  pub fn http_client_builder(&self) -> reqwest::ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = &self.api_key {
      if let Ok(value) = HeaderValue::from_str(key) {
        headers.insert(API_KEY_HEADER, value);
      }
    }
    reqwest::Client::builder()
      .default_headers(headers)
      .timeout(Duration::from_secs(self.timeout))
  }
  pub fn alert_policy(&self) -> crate::error::Result<AlertPolicy> {
    match &self.policy {
      Some(path) => AlertPolicy::from_yaml(path),
      None => Ok(AlertPolicy::default()),
    }
  }
}
