//! Reward wallet
//!
//! In-memory for the current run: total coins from cleared levels plus the
//! fastest clear time seen for each level ordinal.

use serde::{Deserialize, Serialize};

/// Best result recorded for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub ordinal: u32,
    /// Fastest clear, in seconds
    pub best_secs: f32,
    pub clears: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
    /// Sorted by ordinal
    pub records: Vec<LevelRecord>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a cleared level. Returns true if `secs` is a new best for it.
    pub fn credit(&mut self, ordinal: u32, reward: u32, secs: f32) -> bool {
        self.coins += u64::from(reward);

        match self.records.binary_search_by_key(&ordinal, |r| r.ordinal) {
            Ok(i) => {
                let record = &mut self.records[i];
                record.clears += 1;
                if secs < record.best_secs {
                    record.best_secs = secs;
                    true
                } else {
                    false
                }
            }
            Err(i) => {
                self.records.insert(
                    i,
                    LevelRecord {
                        ordinal,
                        best_secs: secs,
                        clears: 1,
                    },
                );
                true
            }
        }
    }

    pub fn record(&self, ordinal: u32) -> Option<&LevelRecord> {
        self.records.iter().find(|r| r.ordinal == ordinal)
    }
}
