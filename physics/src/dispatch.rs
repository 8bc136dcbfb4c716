//! The table mapping ordered pairs of shape kinds to intersection tests.
//!
//! A table starts with the direct tests it is seeded with. The narrow phase
//! adds derived entries (swapped or generic) the first time it meets a pair
//! of kinds without one; entries are never removed while a world runs. The
//! table is shared behind an `Arc` and guarded by a read-write lock since
//! writes only happen on first encounters.

use crate::{
    contact::Contact,
    error::CollisionError,
    intersect::{self, Collider},
    shapes::ShapeKind,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

pub type TestFn = fn(&Collider<'_>, &Collider<'_>) -> Option<Contact>;

/// A named intersection routine.
#[derive(Copy, Clone)]
pub struct CollisionTest {
    pub name: &'static str,
    pub func: TestFn,
}

impl CollisionTest {
    pub const fn new(name: &'static str, func: TestFn) -> Self {
        CollisionTest { name, func }
    }
}

impl PartialEq for CollisionTest {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for CollisionTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const GENERIC_TEST: CollisionTest = CollisionTest::new("generic", intersect::generic);

pub const DEFAULT_TESTS: [(ShapeKind, ShapeKind, CollisionTest); 4] = [
    (
        ShapeKind::Circle,
        ShapeKind::Circle,
        CollisionTest::new("circle_circle", intersect::circle_circle),
    ),
    (
        ShapeKind::Rect,
        ShapeKind::Rect,
        CollisionTest::new("rect_rect", intersect::rect_rect),
    ),
    (
        ShapeKind::Circle,
        ShapeKind::Rect,
        CollisionTest::new("circle_rect", intersect::circle_rect),
    ),
    (
        ShapeKind::Poly,
        ShapeKind::Poly,
        CollisionTest::new("poly_poly", intersect::poly_poly),
    ),
];

/// How the entry for a key `(a, b)` evaluates a pair `(A, B)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TestEntry {
    /// `test(A, B)`.
    Direct(CollisionTest),
    /// `test(B, A)`, with the resulting contact swapped back.
    Swapped(CollisionTest),
    /// The shape agnostic fallback.
    Generic,
}

impl TestEntry {
    pub fn call(&self, a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
        match self {
            TestEntry::Direct(test) => (test.func)(a, b),
            TestEntry::Swapped(test) => (test.func)(b, a).map(|contact| contact.swapped()),
            TestEntry::Generic => intersect::generic(a, b),
        }
    }

    /// Turns the entry registered for `(b, a)` into the equivalent one for `(a, b)`.
    pub fn reversed(self) -> TestEntry {
        match self {
            TestEntry::Direct(test) => TestEntry::Swapped(test),
            TestEntry::Swapped(test) => TestEntry::Direct(test),
            TestEntry::Generic => TestEntry::Generic,
        }
    }

    /// The routine that ends up being run.
    pub fn implementation(&self) -> CollisionTest {
        match self {
            TestEntry::Direct(test) | TestEntry::Swapped(test) => *test,
            TestEntry::Generic => GENERIC_TEST,
        }
    }
}

type EntryMap = HashMap<(ShapeKind, ShapeKind), TestEntry>;

#[derive(Default)]
pub struct DispatchTable {
    entries: RwLock<EntryMap>,
}

impl DispatchTable {
    /// A table with no entries; every pair falls through to the generic test.
    pub fn new() -> Self {
        DispatchTable {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_default_tests() -> Self {
        let table = DispatchTable::new();
        for (a, b, test) in DEFAULT_TESTS {
            table.register(a, b, TestEntry::Direct(test));
        }
        table
    }

    // a panic while holding the lock cannot leave the map half written
    fn read(&self) -> RwLockReadGuard<'_, EntryMap> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntryMap> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lookup(&self, a: ShapeKind, b: ShapeKind) -> Result<TestEntry, CollisionError> {
        self.read()
            .get(&(a, b))
            .copied()
            .ok_or(CollisionError::NotImplemented { a, b })
    }

    pub fn register(&self, a: ShapeKind, b: ShapeKind, entry: TestEntry) {
        log::trace!("dispatch ({}, {}) -> {:?}", a, b, entry);
        self.write().insert((a, b), entry);
    }

    pub fn get_implementation(&self, a: ShapeKind, b: ShapeKind) -> Result<CollisionTest, CollisionError> {
        self.lookup(a, b).map(|entry| entry.implementation())
    }

    /// Runs the entry registered for exactly the kinds of `(a, b)`.
    pub fn get_collision(&self, a: &Collider<'_>, b: &Collider<'_>) -> Result<Option<Contact>, CollisionError> {
        let entry = self.lookup(a.body.shape_kind(), b.body.shape_kind())?;
        Ok(entry.call(a, b))
    }

    pub fn generic(&self, a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
        intersect::generic(a, b)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<((ShapeKind, ShapeKind), TestEntry)> {
        let mut entries: Vec<_> = self.read().iter().map(|(&key, &entry)| (key, entry)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::body::{Body, BodyHandle};
    use crate::shapes::Shape;
    use glam::Vec2;

    #[test]
    fn test_lookup_miss_is_not_implemented() {
        let table = DispatchTable::new();
        assert!(table.is_empty());
        assert_eq!(
            Err(CollisionError::NotImplemented {
                a: ShapeKind::Rect,
                b: ShapeKind::Circle
            }),
            table.lookup(ShapeKind::Rect, ShapeKind::Circle)
        );
    }

    #[test]
    fn test_default_tests_are_one_directional() {
        let table = DispatchTable::with_default_tests();
        assert_eq!(4, table.len());
        assert!(table.lookup(ShapeKind::Circle, ShapeKind::Rect).is_ok());
        assert!(table.lookup(ShapeKind::Rect, ShapeKind::Circle).is_err());
        assert_eq!(
            "circle_rect",
            table
                .get_implementation(ShapeKind::Circle, ShapeKind::Rect)
                .unwrap()
                .name
        );
    }

    #[test]
    fn test_reversed_entries() {
        let test = DEFAULT_TESTS[2].2;
        assert_eq!(TestEntry::Swapped(test), TestEntry::Direct(test).reversed());
        assert_eq!(TestEntry::Direct(test), TestEntry::Swapped(test).reversed());
        assert_eq!(TestEntry::Generic, TestEntry::Generic.reversed());
        assert_eq!(GENERIC_TEST, TestEntry::Generic.implementation());
    }

    #[test]
    fn test_swapped_entry_matches_direct_call() {
        let circle = Body {
            position: Vec2::new(0.0, 0.9),
            shape: Shape::make_circle(0.5),
            ..Body::default()
        };
        let rect = Body {
            shape: Shape::make_rect(Vec2::new(1.0, 0.5)),
            ..Body::default()
        };
        let c = Collider::new(BodyHandle(0), &circle);
        let r = Collider::new(BodyHandle(1), &rect);

        let test = DEFAULT_TESTS[2].2;
        let direct = TestEntry::Direct(test).call(&c, &r).unwrap();
        let swapped = TestEntry::Swapped(test).call(&r, &c).unwrap();
        assert_eq!(direct.swapped(), swapped);
        assert_eq!(BodyHandle(1), swapped.handle_a);
        assert_eq!(Vec2::Y, swapped.normal);
    }

    #[test]
    fn test_entries_sorted() {
        let table = DispatchTable::with_default_tests();
        table.register(ShapeKind::Rect, ShapeKind::Poly, TestEntry::Generic);
        let keys: Vec<_> = table.entries().into_iter().map(|(key, _)| key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(sorted, keys);
        assert_eq!(5, keys.len());
    }
}
