//! Per-slot extension fallback.
//!
//! Every slot starts on the first candidate extension. Each load failure
//! reported by the page moves that slot's cursor one step down the candidate
//! list; failing on the last candidate makes the slot `Unavailable` for the
//! rest of the session. Slots never influence each other.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Currently trying the candidate at this index.
    Attempting(usize),
    /// Every candidate failed.
    Unavailable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("slot {slot} has no loadable image")]
    Unresolvable { slot: usize },
    #[error("slot {slot} out of range (slot count {count})")]
    OutOfRange { slot: usize, count: usize },
}

#[derive(Clone, Debug)]
pub struct ExtensionResolver {
    base_path: String,
    candidates: Vec<String>,
    states: Vec<Resolution>,
}

impl ExtensionResolver {
    /// With an empty candidate list every slot is unavailable from the start.
    pub fn new(slot_count: usize, base_path: impl Into<String>, candidates: Vec<String>) -> Self {
        let initial = if candidates.is_empty() {
            Resolution::Unavailable
        } else {
            Resolution::Attempting(0)
        };
        Self {
            base_path: base_path.into(),
            candidates,
            states: vec![initial; slot_count],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.states.len()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn resolution(&self, slot: usize) -> Option<Resolution> {
        self.states.get(slot).copied()
    }

    pub fn is_available(&self, slot: usize) -> bool {
        matches!(self.resolution(slot), Some(Resolution::Attempting(_)))
    }

    pub fn available_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| matches!(s, Resolution::Attempting(_)))
            .count()
    }

    /// Path currently being attempted for `slot`. Unavailable slots report the
    /// last candidate (the last one that was tried); callers that must not
    /// render broken images check [`Self::is_available`] or use
    /// [`Self::try_resolve_path`].
    pub fn resolve_path(&self, slot: usize) -> Option<String> {
        let ext = match self.resolution(slot)? {
            Resolution::Attempting(idx) => self.candidates.get(idx),
            Resolution::Unavailable => self.candidates.last(),
        };
        Some(self.path_with(slot, ext.map(String::as_str).unwrap_or_default()))
    }

    pub fn try_resolve_path(&self, slot: usize) -> Result<String, ResolveError> {
        match self.resolution(slot) {
            None => Err(ResolveError::OutOfRange {
                slot,
                count: self.slot_count(),
            }),
            Some(Resolution::Unavailable) => Err(ResolveError::Unresolvable { slot }),
            Some(Resolution::Attempting(idx)) => Ok(self.path_with(slot, &self.candidates[idx])),
        }
    }

    /// Record that the currently attempted resource for `slot` failed to load
    /// and return the slot's new state. `None` for an out-of-range slot.
    pub fn on_load_failure(&mut self, slot: usize) -> Option<Resolution> {
        let last = self.candidates.len().checked_sub(1);
        let state = self.states.get_mut(slot)?;
        *state = match (*state, last) {
            (Resolution::Attempting(idx), Some(last)) if idx < last => {
                Resolution::Attempting(idx + 1)
            }
            _ => Resolution::Unavailable,
        };
        Some(*state)
    }

    fn path_with(&self, slot: usize, ext: &str) -> String {
        format!("{}{}.{}", self.base_path, slot + 1, ext)
    }
}
