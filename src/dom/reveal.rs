use std::collections::BTreeSet;

pub const FADE_IN_CLASS: &str = "fade-in";
pub const SHOWN_CLASS: &str = "show";

/// One-shot intersection tracking over the fade-in candidates of a region.
///
/// An element leaves the observed set the first time it is reported at or
/// above the threshold, so later reports for it are ignored.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<usize>,
}

impl RevealObserver {
    pub fn new(threshold: f64, targets: impl IntoIterator<Item = usize>) -> Self {
        Self {
            threshold,
            observed: targets.into_iter().collect(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_observing(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Returns true when this report should reveal the element.
    pub fn on_intersection(&mut self, index: usize, ratio: f64) -> bool {
        if ratio <= 0.0 || ratio < self.threshold {
            return false;
        }
        self.observed.remove(&index)
    }
}
