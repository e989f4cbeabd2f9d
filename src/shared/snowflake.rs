//! Snowflake ID Generator
//!
//! Time-ordered 64-bit ids for every persisted CRM record.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Default epoch (2024-01-01T00:00:00.000Z)
pub const DEFAULT_EPOCH: u64 = 1_704_067_200_000;

const SEQUENCE_MASK: u64 = 0xFFF;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    epoch: u64,
    machine_id: u64,
    /// (last timestamp, sequence within that millisecond)
    state: Mutex<(u64, u64)>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, epoch: u64) -> Self {
        Self {
            epoch,
            machine_id: machine_id & 0x3FF, // 10 bits
            state: Mutex::new((0, 0)),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let (timestamp, sequence) = {
            let mut state = self.state.lock();
            let (last, sequence) = *state;
            // A clock stepping backwards keeps issuing from `last`.
            let mut timestamp = current_timestamp().max(last);

            let sequence = if timestamp == last {
                let next = (sequence + 1) & SEQUENCE_MASK;
                if next == 0 {
                    // Sequence exhausted for this millisecond.
                    timestamp = wait_next_millis(last);
                }
                next
            } else {
                0
            };

            *state = (timestamp, sequence);
            (timestamp, sequence)
        };

        let id = (timestamp.saturating_sub(self.epoch) << 22) | (self.machine_id << 12) | sequence;

        // Top bit stays clear so the id is a positive BIGINT.
        (id & 0x7FFF_FFFF_FFFF_FFFF) as i64
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(1, DEFAULT_EPOCH)
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn wait_next_millis(last: u64) -> u64 {
    loop {
        let now = current_timestamp();
        if now > last {
            return now;
        }
        std::hint::spin_loop();
    }
}
