//! Trade record types and the fixed taxonomies they are tagged with.

use crate::domain::error::{RequiredField, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of labelled values.
///
/// The label is the canonical form: it is what gets displayed, exported and
/// stored. Parsing accepts the label or any alias, ignoring ASCII case.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($noun:literal) {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($label)
                        $(|| wanted.eq_ignore_ascii_case($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                let expected: Vec<&str> = $name::ALL.iter().map(|v| v.label()).collect();
                Err(format!(
                    "unknown {} '{}' (expected one of: {})",
                    $noun,
                    wanted,
                    expected.join(", ")
                ))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_enum! {
    /// Named trading-day window the trade was taken in.
    pub enum Session ("session") {
        LondonKillZone => "London Kill Zone" | "london",
        NewYorkKillZone => "New York Kill Zone" | "ny" | "new-york",
        NyPmSession => "NY PM Session" | "ny-pm",
        AsianSession => "Asian Session" | "asia" | "asian",
    }
}

labelled_enum! {
    /// Berlin winter or summer offset.
    pub enum TimeZone ("time zone") {
        Cet => "CET (Winter)" | "CET" | "winter",
        Cest => "CEST (Summer)" | "CEST" | "summer",
    }
}

labelled_enum! {
    pub enum Pair ("pair") {
        Xauusd => "XAUUSD",
        Gbpusd => "GBPUSD",
        Eurusd => "EURUSD",
    }
}

labelled_enum! {
    /// Setup-pattern category. Reference taxonomy only.
    pub enum SetupType ("setup type") {
        LiquidityGrabMss => "Liquidity Grab + MSS" | "liquidity-grab" | "mss",
        SilverBullet => "Silver Bullet" | "silver-bullet",
        FvgContinuation => "FVG Continuation" | "fvg",
        BreakawayGap => "Breakaway Gap" | "breakaway",
        OrderBlock => "Order Block" | "ob" | "order-block",
        MitigationBlock => "Mitigation Block" | "mb" | "mitigation-block",
    }
}

labelled_enum! {
    /// Ordinal entry grade, best first.
    pub enum EntryQuality ("entry quality") {
        APlus => "A+ (Perfect)" | "A+",
        A => "A (Very Good)" | "A",
        B => "B (Good)" | "B",
        C => "C (Acceptable)" | "C",
        D => "D (Marginal)" | "D",
    }
}

labelled_enum! {
    pub enum Outcome ("outcome") {
        Win => "Win",
        Loss => "Loss",
        Breakeven => "Breakeven" | "be",
        Ongoing => "Ongoing" | "open",
    }
}

impl EntryQuality {
    /// Short grade shown in the trade log table, e.g. `A+`.
    pub fn grade(self) -> &'static str {
        match self {
            EntryQuality::APlus => "A+",
            EntryQuality::A => "A",
            EntryQuality::B => "B",
            EntryQuality::C => "C",
            EntryQuality::D => "D",
        }
    }
}

/// Optional enumerated fields are stored as the empty string when unset.
mod blank {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse().map(Some).map_err(serde::de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

/// One logged trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub session: Session,
    #[serde(default, with = "blank")]
    pub time_zone: Option<TimeZone>,
    pub pair: Pair,
    pub setup_type: SetupType,
    #[serde(default, with = "blank")]
    pub entry_quality: Option<EntryQuality>,
    #[serde(default)]
    pub entry: String,
    #[serde(default)]
    pub sl: String,
    #[serde(default)]
    pub tp: String,
    #[serde(default)]
    pub rr: String,
    #[serde(default, with = "blank")]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub pips: String,
    #[serde(default)]
    pub notes: String,
}

impl TradeRecord {
    pub fn is_ongoing(&self) -> bool {
        self.outcome == Some(Outcome::Ongoing)
    }
}

/// Candidate trade as captured from the entry form; nothing is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeInput {
    pub date: Option<NaiveDate>,
    pub session: Option<Session>,
    pub time_zone: Option<TimeZone>,
    pub pair: Option<Pair>,
    pub setup_type: Option<SetupType>,
    pub entry_quality: Option<EntryQuality>,
    pub entry: String,
    pub sl: String,
    pub tp: String,
    pub rr: String,
    pub outcome: Option<Outcome>,
    pub pips: String,
    pub notes: String,
}

impl TradeInput {
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push(RequiredField::Date);
        }
        if self.session.is_none() {
            missing.push(RequiredField::Session);
        }
        if self.pair.is_none() {
            missing.push(RequiredField::Pair);
        }
        if self.setup_type.is_none() {
            missing.push(RequiredField::SetupType);
        }
        missing
    }

    /// Checks the required fields and stamps the candidate with `id`.
    pub fn into_record(self, id: i64) -> Result<TradeRecord, ValidationError> {
        match (self.date, self.session, self.pair, self.setup_type) {
            (Some(date), Some(session), Some(pair), Some(setup_type)) => Ok(TradeRecord {
                id,
                date,
                session,
                time_zone: self.time_zone,
                pair,
                setup_type,
                entry_quality: self.entry_quality,
                entry: self.entry,
                sl: self.sl,
                tp: self.tp,
                rr: self.rr,
                outcome: self.outcome,
                pips: self.pips,
                notes: self.notes,
            }),
            _ => Err(ValidationError {
                missing_fields: self.missing_fields(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> TradeInput {
        TradeInput {
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            session: Some(Session::LondonKillZone),
            pair: Some(Pair::Gbpusd),
            setup_type: Some(SetupType::OrderBlock),
            ..TradeInput::default()
        }
    }

    #[test]
    fn labels_parse_back() {
        for s in Session::ALL {
            assert_eq!(s.label().parse::<Session>().unwrap(), *s);
        }
        for s in SetupType::ALL {
            assert_eq!(s.label().parse::<SetupType>().unwrap(), *s);
        }
        for q in EntryQuality::ALL {
            assert_eq!(q.label().parse::<EntryQuality>().unwrap(), *q);
        }
    }

    #[test]
    fn parse_accepts_aliases_and_ignores_case() {
        assert_eq!("london".parse::<Session>().unwrap(), Session::LondonKillZone);
        assert_eq!("gbpusd".parse::<Pair>().unwrap(), Pair::Gbpusd);
        assert_eq!("CEST".parse::<TimeZone>().unwrap(), TimeZone::Cest);
        assert_eq!("a+".parse::<EntryQuality>().unwrap(), EntryQuality::APlus);
        assert_eq!(" win ".parse::<Outcome>().unwrap(), Outcome::Win);
    }

    #[test]
    fn parse_rejects_unknown_value() {
        let err = "USDJPY".parse::<Pair>().unwrap_err();
        assert!(err.contains("unknown pair 'USDJPY'"));
        assert!(err.contains("XAUUSD, GBPUSD, EURUSD"));
    }

    #[test]
    fn entry_quality_grade_is_first_word_of_label() {
        for q in EntryQuality::ALL {
            let first = q.label().split(' ').next().unwrap();
            assert_eq!(q.grade(), first);
        }
    }

    #[test]
    fn into_record_keeps_all_fields() {
        let input = TradeInput {
            time_zone: Some(TimeZone::Cet),
            rr: "1:2".into(),
            notes: "clean sweep".into(),
            outcome: Some(Outcome::Win),
            ..complete_input()
        };
        let record = input.into_record(42).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.session, Session::LondonKillZone);
        assert_eq!(record.time_zone, Some(TimeZone::Cet));
        assert_eq!(record.rr, "1:2");
        assert_eq!(record.notes, "clean sweep");
        assert_eq!(record.outcome, Some(Outcome::Win));
    }

    #[test]
    fn into_record_reports_every_missing_field() {
        let err = TradeInput::default().into_record(1).unwrap_err();
        assert_eq!(
            err.missing_fields,
            vec![
                RequiredField::Date,
                RequiredField::Session,
                RequiredField::Pair,
                RequiredField::SetupType,
            ]
        );

        let err = TradeInput {
            pair: None,
            ..complete_input()
        }
        .into_record(1)
        .unwrap_err();
        assert_eq!(err.missing_fields, vec![RequiredField::Pair]);
    }

    #[test]
    fn record_serializes_with_legacy_keys() {
        let record = complete_input().into_record(1704441600000).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1704441600000_i64);
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["session"], "London Kill Zone");
        assert_eq!(json["setupType"], "Order Block");
        assert_eq!(json["timeZone"], "");
        assert_eq!(json["entryQuality"], "");
        assert_eq!(json["outcome"], "");
    }

    #[test]
    fn record_reads_legacy_browser_json() {
        let json = r#"{
            "date": "2024-03-11",
            "session": "New York Kill Zone",
            "timeZone": "CEST",
            "pair": "XAUUSD",
            "setupType": "Silver Bullet",
            "entryQuality": "",
            "entry": "2150.5",
            "sl": "2149",
            "tp": "2154",
            "rr": "1:3",
            "outcome": "",
            "pips": "",
            "notes": "",
            "id": 1710170000000
        }"#;
        let record: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.time_zone, Some(TimeZone::Cest));
        assert_eq!(record.entry_quality, None);
        assert_eq!(record.outcome, None);
        assert_eq!(record.entry, "2150.5");
    }

    #[test]
    fn record_tolerates_missing_optional_keys() {
        let json = r#"{"id":7,"date":"2024-01-05","session":"Asian Session","pair":"EURUSD","setupType":"Breakaway Gap"}"#;
        let record: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.time_zone, None);
        assert_eq!(record.notes, "");
    }
}
