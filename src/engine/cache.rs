//! Value-keyed caches for incremental passes.
//!
//! Both caches key on *values*, never on identity: a declaration that
//! compares equal to one seen in the previous pass reuses its outcomes, and a
//! document whose input nodes compare equal reuses its text. Nothing is ever
//! invalidated explicitly.
//!
//! ## Generations
//!
//! A pass reads from the previous generation and writes every entry it uses
//! into a fresh one. Entries that were not touched by the pass are dropped
//! when the generator swaps generations, which keeps the caches bounded by
//! the size of the last input.
//!
//! A cancelled pass never swaps, so the previous generation stays intact.

use std::collections::HashMap;

use crate::emit::{Bucket, Document};
use crate::engine::Outcome;
use crate::{Declaration, Node, OwnerKey};

/// One generation of both caches.
#[derive(Debug, Default)]
pub(crate) struct Caches {
    pub(crate) outcomes: OutcomeCache,
    pub(crate) documents: DocumentCache,
}

#[derive(Debug, Default)]
pub(crate) struct OutcomeCache {
    entries: HashMap<Declaration, Vec<Outcome>>,
}

impl OutcomeCache {
    pub(crate) fn get(&self, declaration: &Declaration) -> Option<&[Outcome]> {
        self.entries.get(declaration).map(Vec::as_slice)
    }

    pub(crate) fn insert(&mut self, declaration: Declaration, outcomes: Vec<Outcome>) {
        self.entries.insert(declaration, outcomes);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Identity of one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DocumentKey {
    pub(crate) owner: OwnerKey,
    pub(crate) bucket: Bucket,
}

#[derive(Debug)]
struct DocumentEntry {
    nodes: Vec<Node>,
    document: Document,
}

#[derive(Debug, Default)]
pub(crate) struct DocumentCache {
    entries: HashMap<DocumentKey, DocumentEntry>,
}

impl DocumentCache {
    /// The cached document for `key`, if it was built from exactly `nodes`.
    pub(crate) fn get(&self, key: &DocumentKey, nodes: &[Node]) -> Option<&Document> {
        self.entries.get(key).filter(|e| e.nodes == nodes).map(|e| &e.document)
    }

    pub(crate) fn insert(&mut self, key: DocumentKey, nodes: Vec<Node>, document: Document) {
        self.entries.insert(key, DocumentEntry { nodes, document });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IconPackDescriptor, NodeKind};
    use std::collections::BTreeSet;

    fn pack(name: &str) -> Node {
        Node {
            owner: OwnerKey::new("App", "Icons"),
            location: None,
            imports: BTreeSet::new(),
            kind: NodeKind::IconPack(IconPackDescriptor { pack_name: name.into() }),
        }
    }

    #[test]
    fn document_hit_requires_equal_nodes() {
        let key = DocumentKey { owner: OwnerKey::new("App", "Icons"), bucket: Bucket::IconPack };
        let doc = Document { output_id: "App.Icons.IconPack.g.cs".into(), text: "// text".into() };
        let mut cache = DocumentCache::default();
        cache.insert(key.clone(), vec![pack("Fluent")], doc.clone());

        assert_eq!(cache.get(&key, &[pack("Fluent")]), Some(&doc));
        assert_eq!(cache.get(&key, &[pack("Mdl2Assets")]), None);
        assert_eq!(cache.get(&key, &[]), None);
    }
}
