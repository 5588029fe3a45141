use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adjustments::Adjustments;
use crate::config::PredictorConfig;
use crate::error::PredictorError;
use crate::odds::{MarketOdds, ValueCheck, compare_market};
use crate::predictor::{Prediction, Predictor};
use crate::win_prob::MAX_GOALS_LIMIT;

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub goals_for: f64,
    pub goals_against: f64,
    pub games_played: u32,
}

/// One fixture with literal season totals, factors and optional market prices.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCase {
    #[serde(default)]
    pub league_avg: Option<f64>,
    #[serde(default)]
    pub max_goals: Option<u32>,
    pub home: TeamRecord,
    pub away: TeamRecord,
    #[serde(default)]
    pub factors: HashMap<String, f64>,
    #[serde(default)]
    pub market: Option<MarketOdds>,
}

#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    pub prediction: Prediction,
    pub market: Option<MarketOdds>,
    pub value: Vec<ValueCheck>,
}

pub fn parse_fixture_json(raw: &str) -> Result<FixtureCase> {
    serde_json::from_str(raw).context("parse fixture json")
}

pub fn load_fixture(path: &Path) -> Result<FixtureCase> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read fixture {}", path.display()))?;
    parse_fixture_json(&raw)
}

impl FixtureCase {
    pub fn run(&self, cfg: &PredictorConfig) -> Result<FixtureOutcome> {
        let league_avg = self.league_avg.unwrap_or(cfg.league_avg);
        let max_goals = self.max_goals.unwrap_or(cfg.max_goals);
        if !(1..=MAX_GOALS_LIMIT).contains(&max_goals) {
            return Err(PredictorError::Domain(format!(
                "fixture max_goals must be between 1 and {MAX_GOALS_LIMIT}, got {max_goals}"
            ))
            .into());
        }

        let mut predictor = Predictor::new(league_avg)?;
        for (team, is_home) in [(&self.home, true), (&self.away, false)] {
            predictor
                .set_team_strength(
                    &team.name,
                    team.goals_for,
                    team.goals_against,
                    team.games_played,
                    is_home,
                )
                .with_context(|| format!("strength for {}", team.name))?;
        }

        let adjustments = Adjustments::from_named(&self.factors, cfg.factor_policy)?;
        let prediction = predictor.predict(&self.home.name, &self.away.name, &adjustments, max_goals)?;
        let value = self
            .market
            .as_ref()
            .map(|m| compare_market(&prediction.probs, m))
            .unwrap_or_default();

        Ok(FixtureOutcome {
            prediction,
            market: self.market,
            value,
        })
    }
}
