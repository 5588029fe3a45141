pub mod adjustments;
pub mod config;
pub mod error;
pub mod fixture;
pub mod odds;
pub mod predictor;
pub mod report;
pub mod strength;
pub mod trace;
pub mod win_prob;

pub use adjustments::{AdjustmentKind, Adjustments, FactorPolicy};
pub use error::{PredictorError, Result};
pub use odds::{MarketOdds, edge_pct, odds_from_probability};
pub use predictor::{ExpectedGoals, Prediction, Predictor};
pub use strength::{TeamStrength, Venue};
pub use win_prob::{DEFAULT_MAX_GOALS, OutcomeProbs, simulate};
