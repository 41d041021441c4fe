//! A complete sense: one strategy of each kind, ready to register.

use std::fmt;
use std::sync::Arc;

use crate::{LineOfSight, Modifier, Stimulus};

/// One implementation of each strategy trait under a shared name.
///
/// Subsystem crates hand these out; the engine turns each into a registered
/// system.  Strategies are behind `Arc` so several systems may share one
/// (a single line-of-sight model can serve more than one sense).
#[derive(Clone)]
pub struct Sense {
    pub name:     String,
    pub stimulus: Arc<dyn Stimulus>,
    pub los:      Arc<dyn LineOfSight>,
    pub modifier: Arc<dyn Modifier>,
}

impl Sense {
    pub fn new(
        name:     impl Into<String>,
        stimulus: Arc<dyn Stimulus>,
        los:      Arc<dyn LineOfSight>,
        modifier: Arc<dyn Modifier>,
    ) -> Self {
        Self { name: name.into(), stimulus, los, modifier }
    }
}

impl fmt::Debug for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sense")
            .field("name", &self.name)
            .field("stimulus", &self.stimulus.name())
            .field("los", &self.los.name())
            .field("modifier", &self.modifier.name())
            .finish()
    }
}
