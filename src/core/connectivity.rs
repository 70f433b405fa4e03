//! Connectivity bootstrap state machine
//!
//! Telemetry cannot flow until the node is associated with the network, and
//! the node has nothing useful to do without telemetry, so startup blocks for
//! as long as association takes. The policy is deliberate: there is no
//! timeout, no fallback transport, and no failure path out of bootstrap.
//!
//! The blocking itself lives in the platform layer
//! (`platform::rp2350::network`). This module holds the pure state machine it
//! drives, so the transition and retry logic is testable on the host with a
//! bounded fake instead of an actual wait.

/// Association state of the network link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum LinkState {
    /// No association attempt has started
    Disconnected,
    /// An association attempt is in flight
    Connecting,
    /// Associated; the address is assigned and telemetry can start
    Connected,
}

/// Association retry policy.
///
/// The node has exactly one: keep attempting until the network accepts us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    #[default]
    RetryForever,
}

/// Tracks the bootstrap state across association attempts.
///
/// The platform layer calls [`begin_attempt`](LinkMonitor::begin_attempt)
/// before each join and feeds the observed link status into
/// [`observe`](LinkMonitor::observe) until the monitor reports connected.
#[derive(Debug, Default)]
pub struct LinkMonitor {
    state: LinkState,
    policy: RetryPolicy,
    attempts: u32,
}

impl Default for LinkState {
    fn default() -> Self {
        LinkState::Disconnected
    }
}

impl LinkMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current association state.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Number of association attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record the start of an association attempt.
    pub fn begin_attempt(&mut self) {
        self.state = LinkState::Connecting;
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Feed one observation of the platform link status and return the
    /// resulting state.
    ///
    /// A false observation never demotes a connected monitor: bootstrap runs
    /// once, and a link lost later is left to the natural retry of the
    /// telemetry cadence.
    pub fn observe(&mut self, associated: bool) -> LinkState {
        if associated {
            self.state = LinkState::Connected;
        }
        self.state
    }

    /// True once association has completed and polling can stop.
    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Whether another attempt should be scheduled after a failed poll.
    pub fn should_retry(&self) -> bool {
        match self.policy {
            RetryPolicy::RetryForever => true,
        }
    }
}
