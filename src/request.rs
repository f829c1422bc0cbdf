use crate::alert::AlertCounts;
use crate::cli::AlertWardConfig;
use crate::error::{Error, Result};
use console::Emoji;
use log::debug;

/// Header carrying the service api key.
pub const API_KEY_HEADER: &str = "x-zap-api-key";
/// Alert count summary view, counts grouped by risk.
pub const ALERT_COUNTS_PATH: &str = "/JSON/alert/view/alertCountsByRisk";

pub struct ZapClient {
  client: reqwest::Client,
  base: String,
}

impl ZapClient {
  pub fn new(config: &AlertWardConfig) -> Result<Self> {
    let client = config.http_client_builder().build()?;
    Ok(Self {
      client,
      base: config.target.trim_end_matches('/').to_string(),
    })
  }
  pub async fn alert_counts_by_risk(&self) -> Result<AlertCounts> {
    let url = format!("{}{}", self.base, ALERT_COUNTS_PATH);
    debug!("{}{}", Emoji("📤", ""), url);
    let response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }
    let counts = response.json::<AlertCounts>().await?;
    debug!("{}{:?}", Emoji("📥", ""), counts);
    Ok(counts)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpListener;

  fn test_config(addr: &str) -> AlertWardConfig {
    AlertWardConfig {
      target: format!("http://{}", addr),
      api_key: Some("12345".to_string()),
      timeout: 5,
      policy: None,
      output: None,
      format: None,
      no_color: true,
      silent: true,
      debug: false,
    }
  }

  async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
      if let Ok((mut socket, _)) = listener.accept().await {
        let mut buffer = vec![0; 2048];
        let _ = socket.read(&mut buffer).await;
        let response = format!(
          "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
          status_line,
          body.len(),
          body
        );
        socket.write_all(response.as_bytes()).await.unwrap_or_default();
      }
    });
    addr
  }

  #[tokio::test]
  async fn fetch_alert_counts() {
    let addr = serve_once("200 OK", r#"{"High":0,"Medium":0,"Low":3}"#).await;
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    let counts = client.alert_counts_by_risk().await.unwrap();
    assert_eq!(counts.high, 0);
    assert_eq!(counts.low, 3);
  }

  #[tokio::test]
  async fn sends_api_key_and_accept_headers() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (tx, rx) = std::sync::mpsc::channel::<String>();
    tokio::spawn(async move {
      if let Ok((mut socket, _)) = listener.accept().await {
        let mut buffer = vec![0; 2048];
        let n = socket.read(&mut buffer).await.unwrap_or_default();
        tx.send(String::from_utf8_lossy(&buffer[..n]).to_string())
          .unwrap_or_default();
        let body = r#"{"High":0,"Medium":0,"Low":0}"#;
        let response = format!(
          "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
          body.len(),
          body
        );
        socket.write_all(response.as_bytes()).await.unwrap_or_default();
      }
    });
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    client.alert_counts_by_risk().await.unwrap();
    let request = rx.recv().unwrap();
    assert!(request.starts_with("GET /JSON/alert/view/alertCountsByRisk"));
    let request = request.to_lowercase();
    assert!(request.contains("x-zap-api-key: 12345"));
    assert!(request.contains("accept: application/json"));
  }

  #[tokio::test]
  async fn rejected_key_is_an_error() {
    let addr = serve_once("403 Forbidden", "{}").await;
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    assert!(matches!(
      client.alert_counts_by_risk().await,
      Err(Error::Status(_))
    ));
  }

  #[tokio::test]
  async fn malformed_body_is_an_error() {
    let addr = serve_once("200 OK", "not json").await;
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    assert!(matches!(
      client.alert_counts_by_risk().await,
      Err(Error::Http(_))
    ));
  }

  #[tokio::test]
  async fn missing_band_is_an_error() {
    let addr = serve_once("200 OK", r#"{"High":0,"Medium":0}"#).await;
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    assert!(client.alert_counts_by_risk().await.is_err());
  }

  #[tokio::test]
  async fn connection_refused_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    let client = ZapClient::new(&test_config(&addr)).unwrap();
    assert!(matches!(
      client.alert_counts_by_risk().await,
      Err(Error::Http(_))
    ));
  }
}
