//! Narrow phase: confirms broad phase pairs and computes their contacts.
//!
//! Each pair is resolved through the shared [`DispatchTable`]:
//!
//! 1. the entry for `(kind A, kind B)` if there is one;
//! 2. otherwise the entry for `(kind B, kind A)`, run with the arguments
//!    swapped; when the pair collides its mirror image is cached under
//!    `(kind A, kind B)`;
//! 3. otherwise the generic test, cached under both orders.
//!
//! So every pair costs at most three lookups, and once a pair of kinds has
//! been resolved with a contact every later pair of those kinds a single one.

use crate::{
    body::{Body, BodyHandle},
    broadphase::CollisionPair,
    contact::{Contact, WorldId},
    dispatch::{DispatchTable, TestEntry},
    error::CollisionError,
    groups::get_groups,
    intersect::Collider,
    phase::{CollisionPhase, PhaseData},
};
use std::{fmt, sync::Arc};

/// Input of [`NarrowPhase::update`]: the bodies and the candidate pairs found among them.
#[derive(Copy, Clone, Debug)]
pub struct NarrowInput<'a> {
    pub bodies: &'a [Body],
    pub pairs: &'a [CollisionPair],
}

impl<'a> NarrowInput<'a> {
    pub fn new(bodies: &'a [Body], pairs: &'a [CollisionPair]) -> Self {
        NarrowInput { bodies, pairs }
    }
}

/// How the pairs of the last update were resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub pairs: usize,
    pub direct: usize,
    pub swapped: usize,
    pub generic: usize,
    /// Entries added to the dispatch table.
    pub registered: usize,
    pub contacts: usize,
}

impl DispatchStats {
    fn record(&mut self, resolution: &Resolution) {
        match resolution.entry {
            TestEntry::Direct(_) => self.direct += 1,
            TestEntry::Swapped(_) => self.swapped += 1,
            TestEntry::Generic => self.generic += 1,
        }
        self.registered += resolution.registered;
    }
}

/// Outcome of resolving one pair. `registered` counts the table entries it added.
struct Resolution {
    entry: TestEntry,
    registered: usize,
    contact: Option<Contact>,
}

fn resolve(dispatch: &DispatchTable, a: &Collider<'_>, b: &Collider<'_>) -> Resolution {
    let kind_a = a.body.shape_kind();
    let kind_b = b.body.shape_kind();

    match dispatch.lookup(kind_a, kind_b) {
        Ok(entry) => {
            return Resolution {
                entry,
                registered: 0,
                contact: entry.call(a, b),
            };
        }
        Err(CollisionError::NotImplemented { .. }) => {}
    }

    match dispatch.lookup(kind_b, kind_a) {
        Ok(reverse) => {
            // only a pair that collides installs the mirrored entry
            let entry = reverse.reversed();
            let contact = entry.call(a, b);
            let registered = if contact.is_some() {
                dispatch.register(kind_a, kind_b, entry);
                1
            } else {
                0
            };
            Resolution {
                entry,
                registered,
                contact,
            }
        }
        Err(CollisionError::NotImplemented { .. }) => {
            dispatch.register(kind_a, kind_b, TestEntry::Generic);
            let mut registered = 1;
            if kind_a != kind_b {
                dispatch.register(kind_b, kind_a, TestEntry::Generic);
                registered += 1;
            }
            Resolution {
                entry: TestEntry::Generic,
                registered,
                contact: dispatch.generic(a, b),
            }
        }
    }
}

pub struct NarrowPhase {
    dispatch: Arc<DispatchTable>,
    world: Option<WorldId>,
    contacts: PhaseData<Contact>,
    stats: DispatchStats,
}

impl NarrowPhase {
    pub fn new(dispatch: Arc<DispatchTable>, world: Option<WorldId>) -> Self {
        NarrowPhase {
            dispatch,
            world,
            contacts: PhaseData::new(),
            stats: DispatchStats::default(),
        }
    }

    pub fn world(&self) -> Option<WorldId> {
        self.world
    }

    pub fn dispatch(&self) -> &Arc<DispatchTable> {
        &self.dispatch
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Contact between `a` and `b` if their shapes intersect. May add entries
    /// to the dispatch table.
    pub fn get_collision(&self, a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
        resolve(&self.dispatch, a, b).contact.map(|contact| Contact {
            world: self.world,
            ..contact
        })
    }

    /// Bodies of the current contacts grouped into connected clusters.
    pub fn get_groups(&self) -> Vec<Vec<BodyHandle>> {
        get_groups(self.contacts.as_slice())
    }
}

impl fmt::Debug for NarrowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NarrowPhase").field(&self.contacts).finish()
    }
}

impl CollisionPhase for NarrowPhase {
    type Input<'a> = NarrowInput<'a>;
    type Item = Contact;

    fn update(&mut self, input: NarrowInput<'_>) {
        let mut stats = DispatchStats {
            pairs: input.pairs.len(),
            ..DispatchStats::default()
        };
        let mut contacts = Vec::with_capacity(input.pairs.len());

        for pair in input.pairs {
            let (Some(body_a), Some(body_b)) = (
                input.bodies.get(pair.a.index()),
                input.bodies.get(pair.b.index()),
            ) else {
                log::warn!("skipping pair ({:?}, {:?}) with unknown body", pair.a, pair.b);
                continue;
            };
            let a = Collider::new(pair.a, body_a);
            let b = Collider::new(pair.b, body_b);

            let resolution = resolve(&self.dispatch, &a, &b);
            stats.record(&resolution);
            if let Some(mut contact) = resolution.contact {
                contact.world = self.world;
                contacts.push(contact);
            }
        }

        stats.contacts = contacts.len();
        log::debug!(
            "narrowphase: {} pairs, {} contacts (direct {}, swapped {}, generic {}, registered {})",
            stats.pairs,
            stats.contacts,
            stats.direct,
            stats.swapped,
            stats.generic,
            stats.registered
        );
        self.stats = stats;
        self.contacts.replace(contacts);
    }

    fn results(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    fn snapshot(&self) -> Arc<[Contact]> {
        self.contacts.snapshot()
    }
}
