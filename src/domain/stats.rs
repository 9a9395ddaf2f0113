//! Aggregate statistics over a trade log snapshot.

use crate::domain::trade::{Outcome, TradeRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct TradeStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub ongoing: usize,
    /// Wins over every trade that is not `Ongoing`, in percent, one decimal.
    pub win_rate_percent: f64,
}

impl TradeStats {
    pub fn compute(records: &[TradeRecord]) -> Self {
        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut breakevens = 0usize;
        let mut ongoing = 0usize;

        for record in records {
            match record.outcome {
                Some(Outcome::Win) => wins += 1,
                Some(Outcome::Loss) => losses += 1,
                Some(Outcome::Breakeven) => breakevens += 1,
                Some(Outcome::Ongoing) => ongoing += 1,
                None => {}
            }
        }

        // Trades without a recorded outcome still count as decided.
        let decided = records.len() - ongoing;
        let win_rate_percent = if decided > 0 {
            round_to_tenth(wins as f64 / decided as f64 * 100.0)
        } else {
            0.0
        };

        TradeStats {
            total: records.len(),
            wins,
            losses,
            breakevens,
            ongoing,
            win_rate_percent,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
