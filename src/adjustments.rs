use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{PredictorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Situational corrections applied on top of the baseline expected goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentKind {
    HomeMissingKeyPlayer,
    HomeFatigue,
    AwayMissingKeyPlayer,
    AwayH2hMentalBlock,
}

impl AdjustmentKind {
    pub const ALL: [AdjustmentKind; 4] = [
        AdjustmentKind::HomeMissingKeyPlayer,
        AdjustmentKind::HomeFatigue,
        AdjustmentKind::AwayMissingKeyPlayer,
        AdjustmentKind::AwayH2hMentalBlock,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AdjustmentKind::HomeMissingKeyPlayer => "home_missing_key_player",
            AdjustmentKind::HomeFatigue => "home_fatigue",
            AdjustmentKind::AwayMissingKeyPlayer => "away_missing_key_player",
            AdjustmentKind::AwayH2hMentalBlock => "away_h2h_mental_block",
        }
    }

    pub fn side(self) -> Side {
        match self {
            AdjustmentKind::HomeMissingKeyPlayer | AdjustmentKind::HomeFatigue => Side::Home,
            AdjustmentKind::AwayMissingKeyPlayer | AdjustmentKind::AwayH2hMentalBlock => Side::Away,
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AdjustmentKind {
    type Err = PredictorError;

    fn from_str(raw: &str) -> Result<Self> {
        AdjustmentKind::ALL
            .into_iter()
            .find(|kind| kind.key() == raw)
            .ok_or_else(|| PredictorError::UnknownFactor(raw.to_string()))
    }
}

/// How factor names outside [`AdjustmentKind`] are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactorPolicy {
    #[default]
    Ignore,
    Reject,
}

/// One multiplier per adjustment kind; 1.0 means no effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub home_missing_key_player: f64,
    pub home_fatigue: f64,
    pub away_missing_key_player: f64,
    pub away_h2h_mental_block: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            home_missing_key_player: 1.0,
            home_fatigue: 1.0,
            away_missing_key_player: 1.0,
            away_h2h_mental_block: 1.0,
        }
    }
}

impl Adjustments {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_named(factors: &HashMap<String, f64>, policy: FactorPolicy) -> Result<Self> {
        let mut out = Self::default();
        for (name, &value) in factors {
            match name.parse::<AdjustmentKind>() {
                Ok(kind) => out.apply(kind, value)?,
                Err(err) => match policy {
                    FactorPolicy::Ignore => {
                        tracing::warn!(factor = %name, value, "ignoring unrecognised adjustment factor");
                    }
                    FactorPolicy::Reject => return Err(err),
                },
            }
        }
        Ok(out)
    }

    /// Multiplies `multiplier` into the slot for `kind`.
    pub fn apply(&mut self, kind: AdjustmentKind, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PredictorError::InvalidFactor {
                name: kind.key().to_string(),
                value: multiplier,
            });
        }
        *self.slot_mut(kind) *= multiplier;
        Ok(())
    }

    pub fn with(mut self, kind: AdjustmentKind, multiplier: f64) -> Result<Self> {
        self.apply(kind, multiplier)?;
        Ok(self)
    }

    pub fn get(&self, kind: AdjustmentKind) -> f64 {
        match kind {
            AdjustmentKind::HomeMissingKeyPlayer => self.home_missing_key_player,
            AdjustmentKind::HomeFatigue => self.home_fatigue,
            AdjustmentKind::AwayMissingKeyPlayer => self.away_missing_key_player,
            AdjustmentKind::AwayH2hMentalBlock => self.away_h2h_mental_block,
        }
    }

    fn slot_mut(&mut self, kind: AdjustmentKind) -> &mut f64 {
        match kind {
            AdjustmentKind::HomeMissingKeyPlayer => &mut self.home_missing_key_player,
            AdjustmentKind::HomeFatigue => &mut self.home_fatigue,
            AdjustmentKind::AwayMissingKeyPlayer => &mut self.away_missing_key_player,
            AdjustmentKind::AwayH2hMentalBlock => &mut self.away_h2h_mental_block,
        }
    }

    /// Kinds whose multiplier differs from 1.0, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (AdjustmentKind, f64)> + '_ {
        AdjustmentKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, v)| *v != 1.0)
    }

    pub fn multiplier_for(&self, side: Side) -> f64 {
        AdjustmentKind::ALL
            .into_iter()
            .filter(|kind| kind.side() == side)
            .map(|kind| self.get(kind))
            .product()
    }

    /// Scales a `(home, away)` lambda pair.
    pub fn apply_to(&self, home_lambda: f64, away_lambda: f64) -> (f64, f64) {
        (
            home_lambda * self.multiplier_for(Side::Home),
            away_lambda * self.multiplier_for(Side::Away),
        )
    }
}
