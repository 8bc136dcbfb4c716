use crate::{body::BodyHandle, phase::BodyPair};
use std::collections::{BTreeMap, HashMap};

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Splits the bodies linked by `pairs` into maximal connected groups.
///
/// Members of a group are sorted and groups are ordered by their first member.
pub fn get_groups<P: BodyPair>(pairs: &[P]) -> Vec<Vec<BodyHandle>> {
    let mut slots: HashMap<BodyHandle, usize> = HashMap::new();
    let mut handles = Vec::new();
    let mut slot_of = |handle: BodyHandle, handles: &mut Vec<BodyHandle>| {
        *slots.entry(handle).or_insert_with(|| {
            handles.push(handle);
            handles.len() - 1
        })
    };

    let links: Vec<(usize, usize)> = pairs
        .iter()
        .map(|pair| {
            let (a, b) = pair.body_pair();
            (slot_of(a, &mut handles), slot_of(b, &mut handles))
        })
        .collect();

    let mut sets = DisjointSet::new(handles.len());
    for (a, b) in links {
        sets.union(a, b);
    }

    let mut groups: BTreeMap<usize, Vec<BodyHandle>> = BTreeMap::new();
    for (slot, &handle) in handles.iter().enumerate() {
        groups.entry(sets.find(slot)).or_default().push(handle);
    }

    let mut groups: Vec<Vec<BodyHandle>> = groups
        .into_values()
        .map(|mut group| {
            group.sort();
            group
        })
        .collect();
    groups.sort_by_key(|group| group[0]);
    groups
}
