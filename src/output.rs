use crate::alert::{GateResult, Severity};
use crate::cli::{AlertWardConfig, OutputFormat};
use console::{style, Emoji, StyledObject};
use std::fs::File;
use std::io::{BufWriter, Write};

pub struct Output {
  pub config: AlertWardConfig,
  pub format: OutputFormat,
  pub writer: BufWriter<Box<dyn Write + Sync + Send + 'static>>,
}

fn styled_count(severity: Severity, count: u64) -> StyledObject<u64> {
  match severity {
    Severity::High => style(count).red(),
    Severity::Medium => style(count).yellow(),
    Severity::Low => style(count).cyan(),
    Severity::Informational => style(count).dim(),
  }
}

impl Output {
  pub fn new(config: &AlertWardConfig) -> Self {
    let output_format = config.format.clone().unwrap_or_default();
    if config.no_color {
      console::set_colors_enabled(false);
    }
    let writer: BufWriter<Box<dyn Write + Sync + Send + 'static>> = match &config.output {
      Some(path) => {
        // 保存文件禁用颜色输出
        console::set_colors_enabled(false);
        let f = File::create(path).expect("create output file err");
        BufWriter::new(Box::new(f))
      }
      None => {
        let handle = std::io::stdout();
        BufWriter::new(Box::new(handle))
      }
    };
    Self {
      config: config.clone(),
      format: output_format,
      writer,
    }
  }
  pub fn save_and_print(&mut self, result: &GateResult) {
    if self.config.silent {
      return;
    }
    match self.format {
      OutputFormat::STD => {
        writeln!(
          self.writer,
          "{}: {}",
          Emoji("🏹", ""),
          style(&result.target).blue()
        )
        .unwrap_or_default();
        for severity in [Severity::High, Severity::Medium, Severity::Low] {
          writeln!(
            self.writer,
            " |_{}{:?}: [{}]",
            Emoji("🎯", ""),
            severity,
            styled_count(severity, result.counts.get(severity))
          )
          .unwrap_or_default();
        }
        if let Some(informational) = result.counts.informational {
          writeln!(
            self.writer,
            " |_{}Informational: [{}]",
            Emoji("📰", ""),
            styled_count(Severity::Informational, informational)
          )
          .unwrap_or_default();
        }
        for breach in &result.breaches {
          writeln!(
            self.writer,
            " |_{}: [{}] {} found, {} allowed",
            Emoji("🐞", ""),
            style(format!("{:?}", breach.severity)).red(),
            breach.count,
            breach.allowed
          )
          .unwrap_or_default();
        }
        if result.passed() {
          writeln!(
            self.writer,
            " |_{}no alerts above the allowed thresholds",
            Emoji("✅", "")
          )
          .unwrap_or_default();
        }
      }
      OutputFormat::JSON => {
        writeln!(
          self.writer,
          "{}",
          serde_json::to_string(result).unwrap_or_default()
        )
        .unwrap_or_default();
      }
    }
    self.writer.flush().unwrap_or_default();
  }
}
