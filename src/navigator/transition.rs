use derive_more::derive::Display;

/// Where the content region is in its swap cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    #[display("idle")]
    Idle,
    #[display("fading-out")]
    FadingOut,
    #[display("loading")]
    Loading,
    #[display("fading-in")]
    FadingIn,
}

/// Identifies one navigation. Only the newest ticket may advance the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[display("#{}", _0)]
pub struct Ticket(u64);

/// `Idle -> FadingOut -> Loading -> FadingIn -> Idle`, with `Loading -> Idle`
/// on failure. Beginning a navigation from any phase other than `Idle`
/// supersedes the one in flight: its ticket stops being current and every
/// later transition it attempts is refused.
#[derive(Debug)]
pub struct TransitionMachine {
    phase: Phase,
    current: u64,
    superseded: u64,
}

impl Default for TransitionMachine {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            current: 0,
            superseded: 0,
        }
    }
}

impl TransitionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How many navigations have been cut off by a newer one.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }

    pub fn begin(&mut self) -> Ticket {
        if self.phase != Phase::Idle {
            self.superseded += 1;
        }
        self.current += 1;
        self.phase = Phase::FadingOut;
        Ticket(self.current)
    }

    pub fn start_loading(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, Phase::FadingOut, Phase::Loading)
    }

    pub fn start_fade_in(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, Phase::Loading, Phase::FadingIn)
    }

    pub fn finish(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, Phase::FadingIn, Phase::Idle)
    }

    pub fn fail(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, Phase::Loading, Phase::Idle)
    }

    fn advance(&mut self, ticket: Ticket, from: Phase, to: Phase) -> bool {
        if !self.is_current(ticket) || self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }
}
