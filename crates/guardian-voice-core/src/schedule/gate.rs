/// Change the gate asks the loop controller to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// Start listening.
    Enable,
    /// Stop listening.
    Disable,
}

/// Remembers the last applied logical state so repeated evaluations with
/// the same outcome do nothing.
#[derive(Debug, Default)]
pub struct HibernationGate {
    last_applied: Option<bool>,
}

impl HibernationGate {
    /// Gate with nothing applied yet; the first evaluation always transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `logical_enabled`, returning the transition to perform if it
    /// differs from what was last applied.
    pub fn apply(&mut self, logical_enabled: bool) -> Option<GateTransition> {
        if self.last_applied == Some(logical_enabled) {
            return None;
        }
        self.last_applied = Some(logical_enabled);

        Some(if logical_enabled {
            GateTransition::Enable
        } else {
            GateTransition::Disable
        })
    }

    /// Last applied state.
    pub fn last_applied(&self) -> Option<bool> {
        self.last_applied
    }

    /// Forget the last applied state so the next evaluation transitions.
    pub fn forget(&mut self) {
        self.last_applied = None;
    }
}
