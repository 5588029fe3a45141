use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn from_is_home(is_home: bool) -> Self {
        if is_home { Venue::Home } else { Venue::Away }
    }
}

/// Attack/defense ratios of one team relative to the league average.
///
/// `defense` below 1.0 means the team concedes less than an average side.
/// `venue` is carried for the caller and never feeds the arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub name: String,
    pub attack: f64,
    pub defense: f64,
    pub venue: Venue,
    pub goals_for: f64,
    pub goals_against: f64,
    pub games_played: u32,
}

pub fn compute_strength(
    name: &str,
    goals_for: f64,
    goals_against: f64,
    games_played: u32,
    venue: Venue,
    league_avg: f64,
) -> Result<TeamStrength> {
    if games_played == 0 {
        return Err(PredictorError::Domain(format!(
            "games_played must be > 0 for team {name}"
        )));
    }
    if !goals_for.is_finite() || goals_for < 0.0 {
        return Err(PredictorError::Domain(format!(
            "goals_for must be a non-negative number for team {name}, got {goals_for}"
        )));
    }
    if !goals_against.is_finite() || goals_against < 0.0 {
        return Err(PredictorError::Domain(format!(
            "goals_against must be a non-negative number for team {name}, got {goals_against}"
        )));
    }

    let games = games_played as f64;
    let avg_scored = goals_for / games;
    let avg_conceded = goals_against / games;

    Ok(TeamStrength {
        name: name.to_string(),
        attack: avg_scored / league_avg,
        defense: avg_conceded / league_avg,
        venue,
        goals_for,
        goals_against,
        games_played,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_follow_per_game_rates() {
        let s = compute_strength("A", 14.98, 6.02, 7, Venue::Home, 1.45).unwrap();
        assert!((s.attack - (14.98 / 7.0) / 1.45).abs() < 1e-12);
        assert!((s.defense - (6.02 / 7.0) / 1.45).abs() < 1e-12);
        assert!((s.attack - 1.478).abs() < 0.001);
        assert!((s.defense - 0.593).abs() < 0.001);
    }

    #[test]
    fn zero_games_is_a_domain_error() {
        let err = compute_strength("A", 3.0, 2.0, 0, Venue::Away, 1.45).unwrap_err();
        assert!(matches!(err, PredictorError::Domain(_)));
    }

    #[test]
    fn negative_goals_rejected() {
        assert!(compute_strength("A", -1.0, 2.0, 3, Venue::Home, 1.45).is_err());
        assert!(compute_strength("A", 1.0, f64::NAN, 3, Venue::Home, 1.45).is_err());
    }

    #[test]
    fn venue_does_not_change_ratios() {
        let h = compute_strength("A", 10.0, 8.0, 5, Venue::Home, 1.3).unwrap();
        let a = compute_strength("A", 10.0, 8.0, 5, Venue::Away, 1.3).unwrap();
        assert_eq!(h.attack, a.attack);
        assert_eq!(h.defense, a.defense);
        assert_eq!(Venue::from_is_home(false), Venue::Away);
    }
}
