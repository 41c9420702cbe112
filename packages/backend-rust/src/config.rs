use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Policy knobs of the mastery pipeline. Promotion threshold and sweep
/// cadence are product decisions, so they stay configurable.
#[derive(Debug, Clone)]
pub struct PracticePolicy {
    /// Repetition streak required at cycle completion for active -> learned
    pub promotion_min_repetition: i32,
    /// Optimistic write attempts before a submission fails with a conflict
    pub plan_write_retries: u32,
    /// Cron expression for the learned -> review due-date sweep
    pub review_sweep_cron: String,
}

impl Default for PracticePolicy {
    fn default() -> Self {
        Self {
            promotion_min_repetition: 2,
            plan_write_retries: 3,
            review_sweep_cron: "0 */10 * * * *".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub policy: PracticePolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let defaults = PracticePolicy::default();
        let policy = PracticePolicy {
            promotion_min_repetition: std::env::var("PROMOTION_MIN_REPETITION")
                .ok()
                .and_then(|value| value.parse::<i32>().ok())
                .filter(|value| *value >= 1)
                .unwrap_or(defaults.promotion_min_repetition),
            plan_write_retries: std::env::var("PLAN_WRITE_RETRIES")
                .ok()
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|value| *value >= 1)
                .unwrap_or(defaults.plan_write_retries),
            review_sweep_cron: std::env::var("REVIEW_SWEEP_CRON")
                .unwrap_or(defaults.review_sweep_cron),
        };

        Self { host, port, policy }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
