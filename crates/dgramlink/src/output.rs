use std::io::IsTerminal;

use clap::ValueEnum;
use dgramlink_frame::MessageHeader;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

/// Running totals for one side of an exchange.
#[derive(Debug, Default, Serialize)]
pub struct ExchangeSummary {
    /// Which role produced this summary.
    pub role: &'static str,
    /// Logical messages handled.
    pub messages: u64,
    /// Declared payload bytes across all messages.
    pub payload_bytes: u64,
    /// Frames implied by the handled headers.
    pub frames: u64,
}

impl ExchangeSummary {
    pub fn for_role(role: &'static str) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn record(&mut self, header: &MessageHeader) {
        self.messages += 1;
        self.payload_bytes += u64::from(header.payload_size);
        self.frames += u64::from(header.sub_packet_count);
    }
}

pub fn print_summary(summary: &ExchangeSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text => {
            println!(
                "{}: {} messages, {} frames, {} payload bytes",
                summary.role, summary.messages, summary.frames, summary.payload_bytes
            );
        }
    }
}
