use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::{Clock, DefaultClock}};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;

const MAX_RETRIES: u32 = 3;

pub struct ApiClient {
    config: Config,
    clock: DefaultClock,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        // Riot development keys allow 20 requests per second
        let quota = Quota::per_second(NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN));
        let clock = DefaultClock::default();
        ApiClient {
            config,
            rate_limiter: RateLimiter::direct_with_clock(quota, clock.clone()),
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Blocks until the quota allows one more request.
    fn wait_for_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_slot();

            debug!("GET {}", redact_key(url));
            let response = ureq::get(url)
                .set("User-Agent", "league_stats/0.1.0")
                .call();

            match response {
                Ok(resp) => {
                    return resp.into_string().map_err(|e| {
                        AppError::HttpError(e.to_string())
                    });
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!("Rate limited, waiting {}ms before retry", wait_ms);
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!(
                        "{} returned status {}",
                        redact_key(url),
                        code
                    )));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let body = self.execute_request(url)?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(format!("{}: {}", redact_key(url), e))
        })
    }

    pub fn get_performances(&self, division: &str) -> Result<Vec<PerformanceRecord>, AppError> {
        self.get_json(&endpoints::performances(&self.config.stats_api_base, division))
    }

    pub fn get_team_performances(&self, division: &str) -> Result<Vec<TeamPerformance>, AppError> {
        self.get_json(&endpoints::team_performances(&self.config.stats_api_base, division))
    }

    pub fn get_teams(&self, division: &str) -> Result<Vec<TeamInfo>, AppError> {
        self.get_json(&endpoints::teams(&self.config.stats_api_base, division))
    }

    pub fn get_summoner(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::ConfigError("RIOT_API_KEY is required to resolve player names".to_string())
        })?;
        let url = endpoints::summoner_by_puuid(&self.config.region, puuid, api_key);
        self.get_json(&url)
    }

    pub fn get_champion_data(&self) -> Result<DataDragonChampions, AppError> {
        self.get_json(&endpoints::champion_data(&self.config.ddragon_version))
    }
}

fn redact_key(url: &str) -> &str {
    match url.find("api_key=") {
        Some(idx) => &url[..idx],
        None => url,
    }
}
