use alert_ward::cli::AlertWardConfig;
use alert_ward::error::Result;
use alert_ward::output::Output;
use alert_ward::AlertWard;
use console::Emoji;
use log::error;
use std::process::exit;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
  let config = AlertWardConfig::new();
  init_logger(&config);
  match start(&config).await {
    Ok(code) => exit(code),
    Err(e) => {
      error!("{}{}", Emoji("💢", ""), e);
      exit(2)
    }
  }
}

fn init_logger(config: &AlertWardConfig) {
  let default_level = if config.debug { "debug" } else { "info" };
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("alert_ward={}", default_level))),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

async fn start(config: &AlertWardConfig) -> Result<i32> {
  let ward = AlertWard::new(config)?;
  let result = ward.check().await?;
  let mut output = Output::new(config);
  output.save_and_print(&result);
  Ok(result.exit_code())
}
