use std::fmt;

use dgramlink_channel::ChannelError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Every fatal channel failure terminates with status 1; the message
/// names the operation that failed.
pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    CliError::new(FAILURE, format!("{context}: {err}"))
}
