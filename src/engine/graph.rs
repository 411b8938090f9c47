//! Deduplicating, append-only fact store.
//!
//! `add` returning whether the link was newly inserted is the one signal the
//! reasoner uses to detect that a round made progress, so the dedup check
//! must stay structural (all four fields, attrs as a set). There is no
//! removal operation; keeping the store monotonic is what makes forward
//! chaining confluent.
//!
//! Lookups by `from` entity and by link type go through hash indices into
//! the insertion-ordered fact vector. A condition with neither end bound
//! still scans the whole type bucket, which is the expected worst case for a
//! conjunctive join's first condition.

use std::collections::{HashMap, HashSet};

use crate::{EntityRef, LinkType, PendLink};

/// The fact set owned by a single reasoning run.
#[derive(Debug, Default, Clone)]
pub struct LinkGraph {
    links: Vec<PendLink>,
    seen: HashSet<PendLink>,
    by_from: HashMap<EntityRef, Vec<usize>>,
    by_type: HashMap<LinkType, Vec<usize>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        LinkGraph::default()
    }

    /// Insert `link` unless a structurally-equal fact already exists.
    /// Returns whether it was newly inserted.
    pub fn add(&mut self, link: PendLink) -> bool {
        if self.seen.contains(&link) {
            return false;
        }
        let idx = self.links.len();
        self.by_from.entry(link.from.clone()).or_default().push(idx);
        self.by_type.entry(link.link_type).or_default().push(idx);
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    /// Add every link in `links`; returns how many were newly inserted.
    pub fn extend(&mut self, links: impl IntoIterator<Item = PendLink>) -> usize {
        let mut added = 0;
        for link in links {
            if self.add(link) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, link: &PendLink) -> bool {
        self.seen.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All facts, in insertion order.
    pub fn links(&self) -> &[PendLink] {
        &self.links
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendLink> {
        self.links.iter()
    }

    /// Facts whose `from` entity equals `from`.
    pub fn links_from(&self, from: &EntityRef) -> impl Iterator<Item = &PendLink> {
        self.by_from.get(from).into_iter().flatten().map(|&idx| &self.links[idx])
    }

    /// Facts of the given link type.
    pub fn links_of_type(&self, link_type: LinkType) -> impl Iterator<Item = &PendLink> {
        self.by_type.get(&link_type).into_iter().flatten().map(|&idx| &self.links[idx])
    }
}
