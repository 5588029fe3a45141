use std::collections::HashMap;

use serde::Serialize;

use crate::adjustments::Adjustments;
use crate::error::{PredictorError, Result};
use crate::odds::FairOdds;
use crate::strength::{TeamStrength, Venue, compute_strength};
use crate::trace::Trace;
use crate::win_prob::{self, OutcomeProbs, Scoreline};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub home: String,
    pub away: String,
    pub expected_goals: ExpectedGoals,
    pub probs: OutcomeProbs,
    pub fair_odds: FairOdds,
    pub modal_scoreline: Option<Scoreline>,
    pub trace: Trace,
}

/// Owns the league context and the per-team strength registry for one session.
#[derive(Debug, Clone)]
pub struct Predictor {
    league_avg: f64,
    teams: HashMap<String, TeamStrength>,
}

impl Predictor {
    pub fn new(league_avg: f64) -> Result<Self> {
        if !league_avg.is_finite() || league_avg <= 0.0 {
            return Err(PredictorError::Domain(format!(
                "league average must be a positive number, got {league_avg}"
            )));
        }
        Ok(Self {
            league_avg,
            teams: HashMap::new(),
        })
    }

    pub fn league_avg(&self) -> f64 {
        self.league_avg
    }

    pub fn team(&self, name: &str) -> Option<&TeamStrength> {
        self.teams.get(name)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Computes and registers a team's strength, replacing any previous record.
    pub fn set_team_strength(
        &mut self,
        name: &str,
        goals_for: f64,
        goals_against: f64,
        games_played: u32,
        is_home: bool,
    ) -> Result<TeamStrength> {
        let strength = compute_strength(
            name,
            goals_for,
            goals_against,
            games_played,
            Venue::from_is_home(is_home),
            self.league_avg,
        )?;
        tracing::debug!(
            team = name,
            attack = strength.attack,
            defense = strength.defense,
            "team strength registered"
        );
        self.teams.insert(name.to_string(), strength.clone());
        Ok(strength)
    }

    pub fn compute_expected_goals(
        &self,
        home: &str,
        away: &str,
        adjustments: &Adjustments,
    ) -> Result<ExpectedGoals> {
        let (h, a) = self.lookup_pair(home, away)?;
        let (base_home, base_away) = self.baseline(h, a);
        let (home_xg, away_xg) = adjustments.apply_to(base_home, base_away);
        Ok(ExpectedGoals {
            home: home_xg,
            away: away_xg,
        })
    }

    pub fn simulate(&self, expected: ExpectedGoals, max_goals: u32) -> Result<OutcomeProbs> {
        win_prob::simulate(expected.home, expected.away, max_goals)
    }

    /// Full pipeline for one fixture, recording each intermediate value.
    pub fn predict(
        &self,
        home: &str,
        away: &str,
        adjustments: &Adjustments,
        max_goals: u32,
    ) -> Result<Prediction> {
        let (h, a) = self.lookup_pair(home, away)?;
        let mut trace = Trace::new();
        trace.push("league_avg", self.league_avg());
        trace.push(format!("{}.attack", h.name), h.attack);
        trace.push(format!("{}.defense", h.name), h.defense);
        trace.push(format!("{}.attack", a.name), a.attack);
        trace.push(format!("{}.defense", a.name), a.defense);

        let (base_home, base_away) = self.baseline(h, a);
        trace.push("baseline.home_xg", base_home);
        trace.push("baseline.away_xg", base_away);

        for (kind, multiplier) in adjustments.active() {
            trace.push(format!("factor.{kind}"), multiplier);
        }

        let (home_xg, away_xg) = adjustments.apply_to(base_home, base_away);
        trace.push("adjusted.home_xg", home_xg);
        trace.push("adjusted.away_xg", away_xg);

        let expected_goals = ExpectedGoals {
            home: home_xg,
            away: away_xg,
        };
        let probs = self.simulate(expected_goals, max_goals)?;
        trace.push("prob.home", probs.home);
        trace.push("prob.draw", probs.draw);
        trace.push("prob.away", probs.away);

        let fair_odds = FairOdds::from_probs(&probs);
        trace.push("odds.home", fair_odds.home);
        trace.push("odds.draw", fair_odds.draw);
        trace.push("odds.away", fair_odds.away);

        let modal_scoreline = win_prob::most_likely_scoreline(home_xg, away_xg, max_goals)?;

        Ok(Prediction {
            home: h.name.clone(),
            away: a.name.clone(),
            expected_goals,
            probs,
            fair_odds,
            modal_scoreline,
            trace,
        })
    }

    fn baseline(&self, home: &TeamStrength, away: &TeamStrength) -> (f64, f64) {
        (
            home.attack * away.defense * self.league_avg,
            away.attack * home.defense * self.league_avg,
        )
    }

    fn lookup_pair(&self, home: &str, away: &str) -> Result<(&TeamStrength, &TeamStrength)> {
        match (self.teams.get(home), self.teams.get(away)) {
            (Some(h), Some(a)) => Ok((h, a)),
            (h, a) => {
                let mut missing = Vec::new();
                if h.is_none() {
                    missing.push(home.to_string());
                }
                if a.is_none() {
                    missing.push(away.to_string());
                }
                Err(PredictorError::TeamsNotFound { missing })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::AdjustmentKind;

    fn scenario() -> Predictor {
        let mut p = Predictor::new(1.45).unwrap();
        p.set_team_strength("A", 14.98, 6.02, 7, true).unwrap();
        p.set_team_strength("B", 13.02, 10.99, 7, false).unwrap();
        p
    }

    #[test]
    fn league_average_is_fixed_at_construction() {
        let mut p = scenario();
        p.set_team_strength("C", 1.0, 1.0, 1, true).unwrap();
        assert_eq!(p.league_avg(), 1.45);
    }

    #[test]
    fn simulate_uses_given_expected_goals() {
        let p = scenario();
        let xg = p.compute_expected_goals("A", "B", &Adjustments::none()).unwrap();
        let probs = p.simulate(xg, 10).unwrap();
        assert_eq!(probs, win_prob::simulate(xg.home, xg.away, 10).unwrap());
        assert!(probs.home > probs.away);
        assert!(p.simulate(xg, win_prob::MAX_GOALS_LIMIT + 1).is_err());
    }

    #[test]
    fn rejects_bad_league_average() {
        assert!(Predictor::new(0.0).is_err());
        assert!(Predictor::new(f64::NAN).is_err());
    }

    #[test]
    fn recompute_overwrites_registry_entry() {
        let mut p = scenario();
        p.set_team_strength("A", 7.0, 7.0, 7, false).unwrap();
        assert_eq!(p.team_count(), 2);
        let a = p.team("A").unwrap();
        assert!((a.attack - 1.0 / 1.45).abs() < 1e-12);
        assert_eq!(a.venue, Venue::Away);
    }

    #[test]
    fn failed_recompute_keeps_previous_record() {
        let mut p = scenario();
        assert!(p.set_team_strength("A", 7.0, 7.0, 0, true).is_err());
        assert!((p.team("A").unwrap().attack - 1.478).abs() < 0.001);
    }

    #[test]
    fn missing_teams_listed_in_error() {
        let p = scenario();
        let err = p
            .compute_expected_goals("A", "Z", &Adjustments::none())
            .unwrap_err();
        assert_eq!(
            err,
            PredictorError::TeamsNotFound {
                missing: vec!["Z".to_string()]
            }
        );
        assert!(err.to_string().contains("compute team strengths first"));
    }

    #[test]
    fn predict_trace_matches_pipeline() {
        let p = scenario();
        let adj = Adjustments::none()
            .with(AdjustmentKind::HomeMissingKeyPlayer, 0.88)
            .unwrap();
        let pred = p.predict("A", "B", &adj, 10).unwrap();
        let xg = p.compute_expected_goals("A", "B", &adj).unwrap();
        assert_eq!(pred.expected_goals, xg);
        assert_eq!(pred.trace.get("factor.home_missing_key_player"), Some(0.88));
        assert_eq!(pred.trace.get("adjusted.home_xg"), Some(xg.home));
        let base = pred.trace.get("baseline.home_xg").unwrap();
        assert!((xg.home - base * 0.88).abs() < 1e-12);
        assert_eq!(pred.trace.get("prob.home"), Some(pred.probs.home));
        assert_eq!(pred.trace.get("league_avg"), Some(1.45));
        let modal = pred.modal_scoreline.unwrap();
        assert_eq!((modal.home, modal.away), (2, 1));
    }
}
