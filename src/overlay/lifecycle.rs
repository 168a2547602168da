//! Edge detection for the `opened` property.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open,
    Close,
}

impl Transition {
    /// Map an observed `(previous, current)` pair of `opened` values to the
    /// transition it triggers, if any. A close requires the previous value to
    /// have been `true`, so an initial `false` never produces one.
    pub fn from_change(previous: bool, current: bool) -> Option<Self> {
        match (previous, current) {
            (false, true) => Some(Transition::Open),
            (true, false) => Some(Transition::Close),
            _ => None,
        }
    }

    pub fn target(self) -> LifecycleState {
        match self {
            Transition::Open => LifecycleState::Open,
            Transition::Close => LifecycleState::Closed,
        }
    }
}
