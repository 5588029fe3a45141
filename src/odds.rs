use serde::{Deserialize, Serialize};

use crate::win_prob::OutcomeProbs;

/// Returned by [`odds_from_probability`] when no finite price exists.
pub const UNDEFINED_ODDS: f64 = 0.0;

/// Decimal odds implied by `p`; `UNDEFINED_ODDS` when `p` is not positive.
pub fn odds_from_probability(p: f64) -> f64 {
    if p > 0.0 { 1.0 / p } else { UNDEFINED_ODDS }
}

pub fn is_valid_odds(odds: f64) -> bool {
    odds.is_finite() && odds > 0.0
}

/// Percentage by which the market price beats the model's fair price.
///
/// `None` unless both prices are valid and the market pays more than the model.
pub fn edge_pct(market_odds: f64, model_odds: f64) -> Option<f64> {
    if !is_valid_odds(model_odds) || !is_valid_odds(market_odds) {
        return None;
    }
    if market_odds <= model_odds {
        return None;
    }
    Some((market_odds - model_odds) / model_odds * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Home => "Home",
            Outcome::Draw => "Draw",
            Outcome::Away => "Away",
        }
    }

    fn prob(self, probs: &OutcomeProbs) -> f64 {
        match self {
            Outcome::Home => probs.home,
            Outcome::Draw => probs.draw,
            Outcome::Away => probs.away,
        }
    }

    fn price(self, market: &MarketOdds) -> f64 {
        match self {
            Outcome::Home => market.home,
            Outcome::Draw => market.draw,
            Outcome::Away => market.away,
        }
    }
}

/// Fair decimal odds for each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairOdds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl FairOdds {
    pub fn from_probs(probs: &OutcomeProbs) -> Self {
        Self {
            home: odds_from_probability(probs.home),
            draw: odds_from_probability(probs.draw),
            away: odds_from_probability(probs.away),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueCheck {
    pub outcome: Outcome,
    pub model_prob: f64,
    pub model_odds: f64,
    pub market_odds: f64,
    pub edge_pct: Option<f64>,
}

impl ValueCheck {
    pub fn is_value(&self) -> bool {
        self.edge_pct.is_some()
    }
}

pub fn compare_market(probs: &OutcomeProbs, market: &MarketOdds) -> Vec<ValueCheck> {
    Outcome::ALL
        .into_iter()
        .map(|outcome| {
            let model_prob = outcome.prob(probs);
            let model_odds = odds_from_probability(model_prob);
            let market_odds = outcome.price(market);
            ValueCheck {
                outcome,
                model_prob,
                model_odds,
                market_odds,
                edge_pct: edge_pct(market_odds, model_odds),
            }
        })
        .collect()
}

/// Market-implied probabilities with the bookmaker margin removed.
pub fn no_vig_probs(market: &MarketOdds) -> Option<OutcomeProbs> {
    if market.home <= 1.0 || market.draw <= 1.0 || market.away <= 1.0 {
        return None;
    }
    let ih = 1.0 / market.home;
    let id = 1.0 / market.draw;
    let ia = 1.0 / market.away;
    let sum = ih + id + ia;
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(OutcomeProbs {
        home: ih / sum,
        draw: id / sum,
        away: ia / sum,
    })
}

/// Bookmaker overround, e.g. 0.05 for a 105% book.
pub fn overround(market: &MarketOdds) -> Option<f64> {
    if !is_valid_odds(market.home) || !is_valid_odds(market.draw) || !is_valid_odds(market.away) {
        return None;
    }
    Some(1.0 / market.home + 1.0 / market.draw + 1.0 / market.away - 1.0)
}
