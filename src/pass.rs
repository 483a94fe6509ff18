//! Next rise / set search.
//!
//! A linear scan in fixed steps from the observer's timestamp, optionally
//! followed by a bisection of the last step down to the millisecond.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use rayon::prelude::*;

use crate::coords::ObserverState;
use crate::propagator::Propagator;
use crate::sat::Satellite;

/// Default scan step.
pub const STEP_SECONDS: u32 = 10;
/// Default search horizon, one day.
pub const HORIZON_SECONDS: u32 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassKind {
    /// Elevation goes from <= 0 to > 0.
    Rise,
    /// Elevation goes from > 0 to <= 0.
    Set,
}

impl PassKind {
    /// The transition still to come, given whether the satellite is up now.
    pub fn next(currently_visible: bool) -> PassKind {
        if currently_visible {
            PassKind::Set
        } else {
            PassKind::Rise
        }
    }

    /// Whether an elevation sample satisfies this kind of event.
    pub fn is_reached(self, elevation: f64) -> bool {
        match self {
            PassKind::Rise => elevation > 0.0,
            PassKind::Set => elevation <= 0.0,
        }
    }
}

impl std::fmt::Display for PassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassKind::Rise => write!(f, "RISE"),
            PassKind::Set => write!(f, "SET"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassEvent {
    pub kind: PassKind,
    pub timestamp: DateTime<Utc>,
}

/// Result of one search. Running out of horizon is an answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(PassEvent),
    NoEventFound,
    Cancelled,
}

impl SearchOutcome {
    pub fn event(&self) -> Option<&PassEvent> {
        match self {
            SearchOutcome::Found(e) => Some(e),
            _ => None,
        }
    }
}

/// Cooperative cancellation flag, shared by cloning.
///
/// Checked before every scan step; cancelling never blocks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassSearch {
    /// Scan resolution. Zero is treated as one second.
    pub step_seconds: u32,
    /// How far past the start to look.
    pub horizon_seconds: u32,
    /// Bisect the final step to millisecond resolution.
    pub refine: bool,
}

impl Default for PassSearch {
    fn default() -> Self {
        PassSearch {
            step_seconds: STEP_SECONDS,
            horizon_seconds: HORIZON_SECONDS,
            refine: false,
        }
    }
}

impl PassSearch {
    pub fn refined() -> PassSearch {
        PassSearch {
            refine: true,
            ..Self::default()
        }
    }

    fn step(&self) -> u32 {
        self.step_seconds.max(1)
    }

    /// Finds the next transition away from `currently_visible`, scanning
    /// forward from `observer.timestamp`.
    ///
    /// The start instant itself is not sampled; the first sample is one step
    /// later. The returned timestamp always satisfies the event's elevation
    /// predicate and the sample one step (or, refined, one millisecond)
    /// earlier does not.
    pub fn next_event<P: Propagator>(
        &self,
        sat: &Satellite<P>,
        observer: &ObserverState,
        currently_visible: bool,
        cancel: &CancelToken,
    ) -> SearchOutcome {
        let kind = PassKind::next(currently_visible);
        let start = observer.timestamp;
        let step = self.step();
        let steps = self.horizon_seconds / step;
        debug!(
            "{}: searching {} from {} ({} steps of {} s)",
            sat, kind, start, steps, step
        );

        for k in 1..=steps {
            if cancel.is_cancelled() {
                debug!("{}: search cancelled after {} steps", sat, k - 1);
                return SearchOutcome::Cancelled;
            }
            let t = start + Duration::seconds(i64::from(k) * i64::from(step));
            if kind.is_reached(sat.elevation_at(observer, t)) {
                let timestamp = if self.refine {
                    refine(sat, observer, kind, t - Duration::seconds(i64::from(step)), t)
                } else {
                    t
                };
                debug!("{}: {} at {}", sat, kind, timestamp);
                return SearchOutcome::Found(PassEvent { kind, timestamp });
            }
        }

        debug!("{}: no {} within {} s", sat, kind, self.horizon_seconds);
        SearchOutcome::NoEventFound
    }

    /// Runs [`PassSearch::next_event`] for every satellite in parallel.
    ///
    /// Each satellite's current visibility is taken from its elevation at
    /// `observer.timestamp`. Outcomes come back in input order.
    pub fn next_events<P: Propagator + Sync>(
        &self,
        sats: &[Satellite<P>],
        observer: &ObserverState,
        cancel: &CancelToken,
    ) -> Vec<SearchOutcome> {
        sats.par_iter()
            .map(|sat| {
                let visible = sat.elevation_at(observer, observer.timestamp) > 0.0;
                self.next_event(sat, observer, visible, cancel)
            })
            .collect()
    }
}

/// Bisects `(lo, hi]` where the predicate fails at `lo` and holds at `hi`,
/// down to one millisecond. Returns the earliest instant found that holds.
fn refine<P: Propagator>(
    sat: &Satellite<P>,
    observer: &ObserverState,
    kind: PassKind,
    mut lo: DateTime<Utc>,
    mut hi: DateTime<Utc>,
) -> DateTime<Utc> {
    let one_ms = Duration::milliseconds(1);
    while hi - lo > one_ms {
        let half_ms = (hi - lo).num_milliseconds() / 2;
        let mid = lo + Duration::milliseconds(half_ms);
        if kind.is_reached(sat.elevation_at(observer, mid)) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}
