//! Usage counting with exponential decay.

use mojibox_core::types::Emoji;

/// Decay parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// Multiplier applied once per elapsed period
    pub factor: f64,
    /// Period length in milliseconds
    pub period_ms: i64,
}

impl Decay {
    /// Whole periods between `last_used` and `now`. Clock skew counts as zero.
    pub fn periods_between(&self, last_used: i64, now: i64) -> i64 {
        if self.period_ms <= 0 {
            return 0;
        }
        now.saturating_sub(last_used).max(0) / self.period_ms
    }

    /// Count after `periods` of decay, rounded down.
    pub fn decayed(&self, count: u32, periods: i64) -> u32 {
        if periods <= 0 {
            return count;
        }
        let exponent = i32::try_from(periods).unwrap_or(i32::MAX);
        (f64::from(count) * self.factor.powi(exponent)).floor() as u32
    }

    /// Apply one use at time `now`.
    pub fn record(&self, emoji: &mut Emoji, now: i64) {
        let count = match emoji.last_used {
            None => 0,
            Some(last_used) => self.decayed(emoji.usage(), self.periods_between(last_used, now)),
        };
        emoji.usage_count = Some(count.saturating_add(1));
        emoji.last_used = Some(now);
    }
}
