//! Symptom to disease selection.
//!
//! A `Selector` maps a presence vector over the symptom vocabulary to a single
//! disease label. `RandomSelector` is the placeholder in use: it draws
//! uniformly from the known disease labels and does not look at which
//! symptoms are present.

use rand::seq::SliceRandom;

use crate::data::DataStore;

/// Fixed-order flags, one per vocabulary symptom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceVector(Vec<bool>);

impl PresenceVector {
    pub fn new(present: Vec<bool>) -> Self {
        Self(present)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of symptoms marked present.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&present| present).count()
    }
}

/// Chooses a disease label for a presence vector.
pub trait Selector: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Exactly one label, or `None` when no prediction can be made.
    fn select(&self, presence: &PresenceVector) -> Option<String>;
}

/// Uniform random choice over disease labels.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    labels: Vec<String>,
}

impl RandomSelector {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Draw from the labels of the description table.
    pub fn from_store(store: &DataStore) -> Self {
        Self::new(store.descriptions().labels().to_vec())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Selector for RandomSelector {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&self, presence: &PresenceVector) -> Option<String> {
        // No vocabulary means the input could not be interpreted at all
        if presence.is_empty() {
            return None;
        }
        self.labels.choose(&mut rand::thread_rng()).cloned()
    }
}
