use serde::Serialize;

use crate::error::{PredictorError, Result};

pub const DEFAULT_MAX_GOALS: u32 = 10;
/// Largest goal cap the grid walk accepts.
pub const MAX_GOALS_LIMIT: u32 = 50;
/// Rates above this are far outside any plausible match and underflow `e^-λ`.
pub const MAX_EXPECTED_GOALS: f64 = 100.0;

/// Aggregate outcome probabilities over a truncated scoreline grid.
///
/// The three values sum to at most 1.0; whatever is missing sits beyond the
/// goal cap on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbs {
    pub fn total(&self) -> f64 {
        self.home + self.draw + self.away
    }

    pub fn truncated_mass(&self) -> f64 {
        (1.0 - self.total()).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
    pub prob: f64,
}

/// Sums independent Poisson mass over every `(h, a)` with `h, a < max_goals`.
pub fn simulate(home_xg: f64, away_xg: f64, max_goals: u32) -> Result<OutcomeProbs> {
    check_cap(max_goals)?;
    let pmf_h = poisson_pmf(check_rate("home", home_xg)?, max_goals);
    let pmf_a = poisson_pmf(check_rate("away", away_xg)?, max_goals);

    let mut p_home = 0.0;
    let mut p_draw = 0.0;
    let mut p_away = 0.0;

    for (h, p_h) in pmf_h.iter().enumerate() {
        for (a, p_a) in pmf_a.iter().enumerate() {
            let p = p_h * p_a;
            if h > a {
                p_home += p;
            } else if h < a {
                p_away += p;
            } else {
                p_draw += p;
            }
        }
    }

    tracing::debug!(home_xg, away_xg, max_goals, p_home, p_draw, p_away, "simulated scorelines");

    Ok(OutcomeProbs {
        home: p_home,
        draw: p_draw,
        away: p_away,
    })
}

/// Most probable single scoreline on the same grid `simulate` walks.
pub fn most_likely_scoreline(home_xg: f64, away_xg: f64, max_goals: u32) -> Result<Option<Scoreline>> {
    check_cap(max_goals)?;
    let pmf_h = poisson_pmf(check_rate("home", home_xg)?, max_goals);
    let pmf_a = poisson_pmf(check_rate("away", away_xg)?, max_goals);

    let mut best: Option<Scoreline> = None;
    for (h, p_h) in pmf_h.iter().enumerate() {
        for (a, p_a) in pmf_a.iter().enumerate() {
            let prob = p_h * p_a;
            if best.is_some_and(|b| prob <= b.prob) {
                continue;
            }
            best = Some(Scoreline {
                home: h as u32,
                away: a as u32,
                prob,
            });
        }
    }
    Ok(best)
}

fn check_rate(side: &str, lambda: f64) -> Result<f64> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(PredictorError::Domain(format!(
            "{side} expected goals must be a non-negative number, got {lambda}"
        )));
    }
    if lambda > MAX_EXPECTED_GOALS {
        return Err(PredictorError::Domain(format!(
            "{side} expected goals {lambda} exceeds {MAX_EXPECTED_GOALS}"
        )));
    }
    Ok(lambda)
}

fn check_cap(max_goals: u32) -> Result<()> {
    if max_goals > MAX_GOALS_LIMIT {
        return Err(PredictorError::Domain(format!(
            "goal cap {max_goals} exceeds {MAX_GOALS_LIMIT}"
        )));
    }
    Ok(())
}

/// P(k; lambda) for k in `0..len`, no tail folding.
fn poisson_pmf(lambda: f64, len: u32) -> Vec<f64> {
    let len = len as usize;
    let mut out = Vec::with_capacity(len);
    if len == 0 {
        return out;
    }
    out.push((-lambda).exp());
    for k in 1..len {
        let prev = out[k - 1];
        out.push(prev * lambda / k as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pmf_matches_closed_form() {
        let pmf = poisson_pmf(1.5, 5);
        assert_eq!(pmf.len(), 5);
        let p3 = (-1.5f64).exp() * 1.5f64.powi(3) / 6.0;
        assert!((pmf[3] - p3).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_puts_all_mass_on_nil() {
        let probs = simulate(0.0, 0.0, 10).unwrap();
        assert!((probs.draw - 1.0).abs() < 1e-12);
        assert_eq!(probs.home, 0.0);
        assert_eq!(probs.away, 0.0);
    }

    #[test]
    fn zero_cap_yields_no_mass() {
        let probs = simulate(1.2, 0.8, 0).unwrap();
        assert_eq!(probs.total(), 0.0);
        assert_eq!(probs.truncated_mass(), 1.0);
    }

    #[test]
    fn outputs_are_non_negative_and_bounded() {
        for (h, a) in [(0.3, 2.9), (2.0, 1.0), (4.5, 4.5), (7.0, 0.1)] {
            let probs = simulate(h, a, 10).unwrap();
            assert!(probs.home >= 0.0 && probs.draw >= 0.0 && probs.away >= 0.0);
            assert!(probs.total() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn mass_approaches_one_as_cap_grows() {
        let small = simulate(3.5, 2.5, 5).unwrap().total();
        let mid = simulate(3.5, 2.5, 10).unwrap().total();
        let large = simulate(3.5, 2.5, 30).unwrap().total();
        assert!(small < mid && mid <= large);
        assert!((large - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stronger_side_wins_more_often() {
        let probs = simulate(2.0, 1.0, DEFAULT_MAX_GOALS).unwrap();
        assert!(probs.home > probs.away);
        let flipped = simulate(1.0, 2.0, DEFAULT_MAX_GOALS).unwrap();
        assert!((flipped.away - probs.home).abs() < 1e-12);
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert!(simulate(-0.1, 1.0, 10).is_err());
        assert!(simulate(1.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn oversized_cap_is_rejected() {
        assert!(simulate(1.0, 1.0, MAX_GOALS_LIMIT).is_ok());
        let err = simulate(1.0, 1.0, MAX_GOALS_LIMIT + 1).unwrap_err();
        assert!(matches!(err, PredictorError::Domain(_)));
        assert!(simulate(1.0, 1.0, u32::MAX).is_err());
        assert!(most_likely_scoreline(1.0, 1.0, u32::MAX).is_err());
    }

    #[test]
    fn implausible_rate_is_rejected_instead_of_underflowing() {
        assert!(simulate(MAX_EXPECTED_GOALS, 1.0, 10).is_ok());
        assert!(simulate(800.0, 1.0, 10).is_err());
        assert!(most_likely_scoreline(1.0, 800.0, 10).is_err());
    }

    #[test]
    fn modal_scoreline_for_low_rates_is_nil_nil() {
        let best = most_likely_scoreline(0.5, 0.4, 10).unwrap().unwrap();
        assert_eq!((best.home, best.away), (0, 0));
        assert!(most_likely_scoreline(1.0, 1.0, 0).unwrap().is_none());
    }
}
