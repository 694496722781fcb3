use crate::domain::payment::ProcessorKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// An upstream only qualifies for traffic when its advertised minimum
/// response time is at or under this bound.
pub const MAX_ACCEPTABLE_RESPONSE_TIME_MS: i64 = 3000;

/// Shared-channel key under which the prober mirrors its latest decision.
pub const ROUTING_DECISION_KEY: &str = "routing:decision";

/// Health probe result for one upstream. Probe failures never surface as
/// errors; they collapse into a failing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSample {
    pub failing: bool,
    pub min_response_time: i64,
}

/// Sentinel response time reported when a probe times out.
pub const PROBE_TIMEOUT_SENTINEL_MS: i64 = 9999;

impl HealthSample {
    /// Connection failure, bad status, or undecodable body.
    pub fn hard_failure() -> Self {
        Self {
            failing: true,
            min_response_time: 0,
        }
    }

    /// Probe exceeded its deadline.
    pub fn timed_out() -> Self {
        Self {
            failing: true,
            min_response_time: PROBE_TIMEOUT_SENTINEL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    QueueOnly,
    UseDefault,
    UseFallback,
}

impl RoutingDecision {
    pub fn target(self) -> Option<ProcessorKind> {
        match self {
            RoutingDecision::QueueOnly => None,
            RoutingDecision::UseDefault => Some(ProcessorKind::Default),
            RoutingDecision::UseFallback => Some(ProcessorKind::Fallback),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoutingDecision::QueueOnly => "queue_only",
            RoutingDecision::UseDefault => "use_default",
            RoutingDecision::UseFallback => "use_fallback",
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RoutingDecision::QueueOnly => 0,
            RoutingDecision::UseDefault => 1,
            RoutingDecision::UseFallback => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => RoutingDecision::UseDefault,
            2 => RoutingDecision::UseFallback,
            _ => RoutingDecision::QueueOnly,
        }
    }
}

/// Routing policy, evaluated in strict order. Prefer the default upstream
/// whenever it is minimally healthy; fall back only when the default is
/// actually failing; otherwise hold payments in the queue.
pub fn decide(default: HealthSample, fallback: HealthSample) -> RoutingDecision {
    if default.failing && fallback.failing {
        return RoutingDecision::QueueOnly;
    }
    if !default.failing && default.min_response_time <= MAX_ACCEPTABLE_RESPONSE_TIME_MS {
        return RoutingDecision::UseDefault;
    }
    if default.failing && fallback.min_response_time <= MAX_ACCEPTABLE_RESPONSE_TIME_MS {
        return RoutingDecision::UseFallback;
    }
    RoutingDecision::QueueOnly
}

/// Process-wide routing selection. Single writer (the prober), any number of
/// readers; a plain atomic is enough since the decision is one field.
pub struct RouterState {
    decision: AtomicU8,
}

impl RouterState {
    /// Starts in the queue-only posture until the first probe cycle lands.
    pub fn new() -> Self {
        Self {
            decision: AtomicU8::new(RoutingDecision::QueueOnly.as_u8()),
        }
    }

    pub fn decision(&self) -> RoutingDecision {
        RoutingDecision::from_u8(self.decision.load(Ordering::Relaxed))
    }

    pub fn set_decision(&self, decision: RoutingDecision) {
        self.decision.store(decision.as_u8(), Ordering::Relaxed);
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}
