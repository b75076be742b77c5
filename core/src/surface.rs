//! Candidate display surface owned by a session.
//!
//! A host implements [`CandidateSurface`] on top of its toolkit (a panel of
//! clickable labels above an on-screen keyboard, a popup, a terminal line).
//! The session pushes the candidate list after every change and releases the
//! surface exactly once when it is torn down.

/// Display for the current candidate list.
pub trait CandidateSurface {
    /// Show `candidates` in order, replacing whatever was shown.
    fn show(&mut self, candidates: &[String]);

    /// Remove all shown candidates.
    fn clear(&mut self);

    /// Free the surface. Called once, at session teardown.
    fn release(&mut self) {}
}

/// Surface that displays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl CandidateSurface for NullSurface {
    fn show(&mut self, _candidates: &[String]) {}

    fn clear(&mut self) {}
}

/// Surface that remembers what it was asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    /// Currently shown candidates
    pub shown: Vec<String>,
    /// Number of `show` calls
    pub updates: usize,
    pub releases: usize,
}

impl CandidateSurface for RecordingSurface {
    fn show(&mut self, candidates: &[String]) {
        self.shown = candidates.to_vec();
        self.updates += 1;
    }

    fn clear(&mut self) {
        self.shown.clear();
    }

    fn release(&mut self) {
        self.shown.clear();
        self.releases += 1;
    }
}

impl<S: CandidateSurface + ?Sized> CandidateSurface for Box<S> {
    fn show(&mut self, candidates: &[String]) {
        (**self).show(candidates)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
