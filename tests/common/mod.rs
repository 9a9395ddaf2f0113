#![allow(dead_code)]

use chrono::NaiveDate;
use ictjournal::domain::error::JournalError;
pub use ictjournal::domain::trade::{
    EntryQuality, Outcome, Pair, Session, SetupType, TimeZone, TradeInput, TradeRecord,
};
use ictjournal::ports::storage_port::StoragePort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Storage whose reads and writes can be made to fail, for exercising the
/// store's soft-failure paths.
pub struct FailingStorage {
    pub entries: RefCell<HashMap<String, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub write_attempts: Cell<usize>,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
            write_attempts: Cell::new(0),
        }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.set(true);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.set(true);
        self
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StoragePort for FailingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, JournalError> {
        if self.fail_reads.get() {
            return Err(JournalError::Deserialization {
                key: key.to_string(),
                reason: "storage disabled".into(),
            });
        }
        Ok(self.stored(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), JournalError> {
        self.write_attempts.set(self.write_attempts.get() + 1);
        if self.fail_writes.get() {
            return Err(JournalError::Persistence {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_input(session: Session, pair: Pair, setup: SetupType) -> TradeInput {
    TradeInput {
        date: Some(date(2024, 1, 5)),
        session: Some(session),
        time_zone: Some(TimeZone::Cet),
        pair: Some(pair),
        setup_type: Some(setup),
        ..TradeInput::default()
    }
}

pub fn london_order_block(outcome: Outcome) -> TradeInput {
    TradeInput {
        outcome: Some(outcome),
        ..make_input(Session::LondonKillZone, Pair::Gbpusd, SetupType::OrderBlock)
    }
}

pub fn make_record(id: i64, outcome: Option<Outcome>) -> TradeRecord {
    TradeRecord {
        id,
        date: date(2024, 1, 5),
        session: Session::LondonKillZone,
        time_zone: None,
        pair: Pair::Gbpusd,
        setup_type: SetupType::OrderBlock,
        entry_quality: None,
        entry: String::new(),
        sl: String::new(),
        tp: String::new(),
        rr: String::new(),
        outcome,
        pips: String::new(),
        notes: String::new(),
    }
}
