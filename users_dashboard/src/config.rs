use crate::api::DEFAULT_API_URL;
use clap::Parser;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Manage users of a remote REST collection", long_about = None)]
pub struct Args {
    /// Base URL of the service exposing `/users`
    #[arg(short = 'u', long, env = "USERS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[arg(short, long, env = "USERS_API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Notifications buffered per subscriber
    #[arg(short, long, default_value_t = 64)]
    pub notification_capacity: usize,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
