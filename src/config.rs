use std::env;

use crate::adjustments::FactorPolicy;
use crate::win_prob::{DEFAULT_MAX_GOALS, MAX_GOALS_LIMIT};

const DEFAULT_LEAGUE_AVG: f64 = 1.45;

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub league_avg: f64,
    pub max_goals: u32,
    pub factor_policy: FactorPolicy,
    pub value_only: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            league_avg: DEFAULT_LEAGUE_AVG,
            max_goals: DEFAULT_MAX_GOALS,
            factor_policy: FactorPolicy::Ignore,
            value_only: false,
        }
    }
}

impl PredictorConfig {
    pub fn from_env() -> Self {
        let league_avg = env::var("PREDICTOR_LEAGUE_AVG")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_LEAGUE_AVG)
            .clamp(0.1, 10.0);
        let max_goals = env::var("PREDICTOR_MAX_GOALS")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_GOALS)
            .clamp(1, MAX_GOALS_LIMIT);
        let factor_policy = if env_bool("PREDICTOR_STRICT_FACTORS", false) {
            FactorPolicy::Reject
        } else {
            FactorPolicy::Ignore
        };
        let value_only = env_bool("PREDICTOR_VALUE_ONLY", false);

        Self {
            league_avg,
            max_goals,
            factor_policy,
            value_only,
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> bool {
    let t = raw.trim().to_ascii_lowercase();
    !(t.is_empty() || t == "0" || t == "false" || t == "off" || t == "no")
}
