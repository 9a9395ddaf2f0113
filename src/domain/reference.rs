//! Static trading-plan reference: kill-zone windows in Berlin time, the rules
//! for each setup and the plan's standing rules. Display data only.

use crate::domain::trade::{Session, SetupType, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupRules {
    pub description: &'static str,
    pub pairs: &'static str,
    pub session: &'static str,
    /// Numbered steps, one per line.
    pub entry: &'static str,
    pub stop_loss: &'static str,
    pub take_profit: &'static str,
    pub notes: &'static str,
}

pub const CRITICAL_RULES: [&str; 8] = [
    "Trade only during kill zones",
    "Skip first 15 min of each session",
    "Max 2-3 quality setups per day",
    "Stop after 2 wins or 1 full loss",
    "Tight stops: FX 5-15 pips, XAU 0.5-1.5$",
    "Minimum 1:2 R:R on every trade",
    "Journal every trade with screenshot",
    "No trading 5 min before high-impact news",
];

impl Session {
    /// Local Berlin window for the session under the given offset.
    pub fn window(self, tz: TimeZone) -> &'static str {
        match (self, tz) {
            (Session::LondonKillZone, TimeZone::Cet) => "08:00 - 11:00",
            (Session::LondonKillZone, TimeZone::Cest) => "09:00 - 12:00",
            (Session::NewYorkKillZone, TimeZone::Cet) => "14:30 - 17:00",
            (Session::NewYorkKillZone, TimeZone::Cest) => "15:30 - 18:00",
            (Session::NyPmSession, TimeZone::Cet) => "19:00 - 21:00",
            (Session::NyPmSession, TimeZone::Cest) => "20:00 - 22:00",
            (Session::AsianSession, TimeZone::Cet) => "02:00 - 07:00",
            (Session::AsianSession, TimeZone::Cest) => "03:00 - 08:00",
        }
    }
}

const LIQUIDITY_GRAB_MSS: SetupRules = SetupRules {
    description: "Price sweeps liquidity (Asian high/low) then reverses with market structure shift",
    pairs: "GBPUSD, EURUSD",
    session: "London Kill Zone",
    entry: "1. Wait for liquidity sweep\n2. Confirm MSS (break of structure)\n3. Enter on FVG or Order Block\n4. Skip first 15 min of session",
    stop_loss: "Above/below the liquidity sweep wick (5-15 pips)",
    take_profit: "Target opposite liquidity or 1:2 to 1:3 RR",
    notes: "Best during London open. Avoid if no clear Asian range.",
};

const SILVER_BULLET: SetupRules = SetupRules {
    description: "High-probability reversal/continuation setup during NY kill zone",
    pairs: "XAUUSD, GBPUSD",
    session: "New York Kill Zone",
    entry: "1. Identify NY session bias\n2. Wait for liquidity grab\n3. Enter after MSS + FVG forms\n4. Must be within 14:30-17:00 CET / 15:30-18:00 CEST",
    stop_loss: "Beyond the swing point (XAUUSD: 0.5-1.5$, FX: 5-15 pips)",
    take_profit: "Target 1:2 minimum, scale out at 1:2 and 1:3",
    notes: "One of the highest win-rate setups. Trade only during kill zone window.",
};

const FVG_CONTINUATION: SetupRules = SetupRules {
    description: "Join existing trend after displacement creates fair value gap",
    pairs: "XAUUSD, GBPUSD, EURUSD",
    session: "London or New York Kill Zone",
    entry: "1. Identify strong directional move\n2. Wait for pullback into FVG\n3. Enter on bounce from FVG\n4. Confirm with lower timeframe MSS",
    stop_loss: "Below/above FVG (tight stops)",
    take_profit: "1:2 to 1:3, or next liquidity pool",
    notes: "Works best in trending conditions. Skip if FVG is too large (>20 pips).",
};

const BREAKAWAY_GAP: SetupRules = SetupRules {
    description: "Gap created during high-momentum breakout, rarely fills",
    pairs: "XAUUSD, GBPUSD",
    session: "Any Kill Zone",
    entry: "1. Identify clean breakout with gap\n2. Wait for minor pullback\n3. Enter on 50% gap retracement\n4. Must have volume confirmation",
    stop_loss: "Beyond gap high/low",
    take_profit: "Measured move or next structure",
    notes: "Rare setup. High conviction when it appears.",
};

const ORDER_BLOCK: SetupRules = SetupRules {
    description: "Last bullish/bearish candle before strong move, acts as support/resistance",
    pairs: "All pairs",
    session: "Any session",
    entry: "1. Mark last opposite candle before impulse\n2. Wait for price to return\n3. Enter on reaction (wick/engulf)\n4. Confirm with lower TF structure",
    stop_loss: "Beyond order block",
    take_profit: "1:2 minimum",
    notes: "Combine with FVG or liquidity sweep for higher probability.",
};

const MITIGATION_BLOCK: SetupRules = SetupRules {
    description: "Institutional order zone where price seeks liquidity before continuing",
    pairs: "All pairs",
    session: "Any Kill Zone",
    entry: "1. Identify unmitigated block\n2. Wait for price to tap zone\n3. Enter on rejection\n4. Confirm momentum shift",
    stop_loss: "5-10 pips beyond block",
    take_profit: "Next opposing block or 1:2 RR",
    notes: "Works best when aligned with higher timeframe bias.",
};

impl SetupType {
    pub fn rules(self) -> &'static SetupRules {
        match self {
            SetupType::LiquidityGrabMss => &LIQUIDITY_GRAB_MSS,
            SetupType::SilverBullet => &SILVER_BULLET,
            SetupType::FvgContinuation => &FVG_CONTINUATION,
            SetupType::BreakawayGap => &BREAKAWAY_GAP,
            SetupType::OrderBlock => &ORDER_BLOCK,
            SetupType::MitigationBlock => &MITIGATION_BLOCK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summer_windows_are_one_hour_later() {
        for session in Session::ALL {
            let winter = session.window(TimeZone::Cet);
            let summer = session.window(TimeZone::Cest);
            let start_hour = |w: &str| w[..2].parse::<u32>().unwrap();
            assert_eq!(start_hour(summer), start_hour(winter) + 1, "{}", session);
        }
    }

    #[test]
    fn every_setup_has_four_entry_steps() {
        for setup in SetupType::ALL {
            let rules = setup.rules();
            assert_eq!(rules.entry.lines().count(), 4, "{}", setup);
            assert!(rules.entry.starts_with("1. "));
        }
    }

    #[test]
    fn silver_bullet_is_a_new_york_setup() {
        let rules = SetupType::SilverBullet.rules();
        assert_eq!(rules.session, Session::NewYorkKillZone.label());
    }
}
