//! Time source for entries whose sitemap record has no `<lastmod>`.

use atom_syndication::FixedDateTime;
use chrono::{SubsecRound, Utc};

pub trait Clock {
    fn now(&self) -> FixedDateTime;
}

/// Wall clock, truncated to whole seconds (feeds carry second precision).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> FixedDateTime {
        Utc::now().trunc_subsecs(0).fixed_offset()
    }
}

/// Always returns the same instant. Used for `--now` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub FixedDateTime);

impl Clock for FixedClock {
    fn now(&self) -> FixedDateTime {
        self.0
    }
}
