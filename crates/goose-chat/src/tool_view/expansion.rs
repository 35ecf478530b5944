/// Whether a section's body is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Expanded,
}

impl Expansion {
    pub fn from_start(is_start_expanded: bool) -> Self {
        if is_start_expanded {
            Expansion::Expanded
        } else {
            Expansion::Collapsed
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Expansion::Collapsed => Expansion::Expanded,
            Expansion::Expanded => Expansion::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Expansion::Expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionEvent {
    /// The user clicked the section header
    Toggle,
    /// The caller's force-expand condition, as of the latest evaluation
    Force(bool),
}

/// Expansion of one section plus the last force flag seen.
///
/// Forcing only acts when the flag turns on, so a section forced open can
/// still be collapsed by the user, and a flag turning off never collapses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionState {
    expansion: Expansion,
    forcing: bool,
}

impl ExpansionState {
    pub fn new(is_start_expanded: bool) -> Self {
        Self {
            expansion: Expansion::from_start(is_start_expanded),
            forcing: false,
        }
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    pub fn is_expanded(&self) -> bool {
        self.expansion.is_expanded()
    }

    pub fn apply(&mut self, event: ExpansionEvent) {
        *self = reduce(*self, event);
    }
}

pub fn reduce(state: ExpansionState, event: ExpansionEvent) -> ExpansionState {
    match event {
        ExpansionEvent::Toggle => ExpansionState {
            expansion: state.expansion.flipped(),
            ..state
        },
        ExpansionEvent::Force(true) if !state.forcing => ExpansionState {
            expansion: Expansion::Expanded,
            forcing: true,
        },
        ExpansionEvent::Force(forcing) => ExpansionState { forcing, ..state },
    }
}
