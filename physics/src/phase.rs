//! The contract shared by the broad and narrow phases.
//!
//! A phase keeps the result of its last `update`. Every update installs a new
//! shared slice, so a [`CollisionPhase::snapshot`] taken between frames is
//! never modified afterwards.

use crate::{body::BodyHandle, broadphase::CollisionPair, contact::Contact};
use std::{collections::BTreeSet, fmt, sync::Arc};

/// Anything that links two bodies: candidate pairs and contacts alike.
///
/// [`CollisionPhase::objects`] and [`crate::groups::get_groups`] only need the
/// two handles, so they work over either phase's results.
pub trait BodyPair {
    fn body_pair(&self) -> (BodyHandle, BodyHandle);
}

impl BodyPair for CollisionPair {
    fn body_pair(&self) -> (BodyHandle, BodyHandle) {
        (self.a, self.b)
    }
}

impl BodyPair for Contact {
    fn body_pair(&self) -> (BodyHandle, BodyHandle) {
        self.handles()
    }
}

pub trait CollisionPhase {
    type Input<'a>;
    type Item: BodyPair + Clone;

    /// Replaces the held results with the ones computed from `input`.
    fn update(&mut self, input: Self::Input<'_>);

    fn results(&self) -> &[Self::Item];

    fn snapshot(&self) -> Arc<[Self::Item]>;

    /// `update` followed by returning the phase, for chaining.
    fn run(&mut self, input: Self::Input<'_>) -> &mut Self
    where
        Self: Sized,
    {
        self.update(input);
        self
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.results().iter()
    }

    fn len(&self) -> usize {
        self.results().len()
    }

    fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    /// Distinct bodies appearing in any of the current results.
    fn objects(&self) -> BTreeSet<BodyHandle> {
        let mut objs = BTreeSet::new();
        for item in self.results() {
            let (a, b) = item.body_pair();
            objs.insert(a);
            objs.insert(b);
        }
        objs
    }
}

/// Result storage of a phase.
#[derive(Clone)]
pub(crate) struct PhaseData<T> {
    data: Arc<[T]>,
}

impl<T> PhaseData<T> {
    pub fn new() -> Self {
        PhaseData {
            data: Arc::from(Vec::new()),
        }
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.data = Arc::from(items);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.data)
    }
}

impl<T> Default for PhaseData<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PhaseData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_snapshot_survives_replace() {
        let mut data = PhaseData::new();
        data.replace(vec![1, 2, 3]);
        let before = data.snapshot();
        data.replace(vec![4]);
        assert_eq!(&[1, 2, 3], &before[..]);
        assert_eq!(&[4], data.as_slice());
        assert_eq!("[4]", format!("{:?}", data));
    }
}
