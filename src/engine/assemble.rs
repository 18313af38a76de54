//! Document assembly planning.
//!
//! Merges the validated node streams, groups them by [`OwnerKey`] and decides
//! which documents each owner gets. An owner can have up to three documents,
//! one per [`Bucket`]:
//!
//! ```text
//! owner nodes ──┬─ exactly one theme node      ─▶ Theme
//!               ├─ exactly one icon-pack node  ─▶ IconPack
//!               └─ any notify / backing-field  ─▶ Members
//! ```
//!
//! Grouping keeps first-seen owner order and input order within an owner, so
//! the same input always plans the same documents in the same order. Nothing
//! downstream relies on document order, but stable order keeps output and
//! logs diffable.

use indexmap::IndexMap;

use crate::emit::Bucket;
use crate::engine::cache::DocumentKey;
use crate::{Node, NodeKind, OwnerKey};

bitflags::bitflags! {
    /// Buckets present for one owner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct BucketSet: u8 {
        const THEME     = 1 << 0;
        const ICON_PACK = 1 << 1;
        const MEMBERS   = 1 << 2;
    }
}

/// Nodes of one owner, split by the bucket they feed.
#[derive(Debug)]
pub(crate) struct OwnerGroup {
    pub(crate) owner: OwnerKey,
    themes: Vec<Node>,
    icon_packs: Vec<Node>,
    members: Vec<Node>,
}

impl OwnerGroup {
    fn new(owner: OwnerKey) -> Self {
        OwnerGroup { owner, themes: Vec::new(), icon_packs: Vec::new(), members: Vec::new() }
    }

    fn push(&mut self, node: Node) {
        match node.kind {
            NodeKind::Theme(_) => self.themes.push(node),
            NodeKind::IconPack(_) => self.icon_packs.push(node),
            NodeKind::Notify(_) | NodeKind::BackingField(_) => self.members.push(node),
        }
    }

    pub(crate) fn buckets(&self) -> BucketSet {
        let mut set = BucketSet::empty();
        set.set(BucketSet::THEME, self.themes.len() == 1);
        set.set(BucketSet::ICON_PACK, self.icon_packs.len() == 1);
        set.set(BucketSet::MEMBERS, !self.members.is_empty());
        set
    }

    /// The documents this owner needs, with the nodes each is built from.
    pub(crate) fn into_documents(self) -> Vec<PlannedDocument> {
        let buckets = self.buckets();
        let mut planned = Vec::with_capacity(buckets.bits().count_ones() as usize);

        let parts = [
            (BucketSet::THEME, Bucket::Theme, self.themes),
            (BucketSet::ICON_PACK, Bucket::IconPack, self.icon_packs),
            (BucketSet::MEMBERS, Bucket::Members, self.members),
        ];
        for (flag, bucket, nodes) in parts {
            if buckets.contains(flag) {
                planned.push(PlannedDocument { key: DocumentKey { owner: self.owner.clone(), bucket }, nodes });
            }
        }

        planned
    }
}

#[derive(Debug)]
pub(crate) struct PlannedDocument {
    pub(crate) key: DocumentKey,
    pub(crate) nodes: Vec<Node>,
}

/// Group `nodes` by owner, keeping first-seen owner order.
pub(crate) fn group_by_owner<I>(nodes: I) -> Vec<OwnerGroup>
where
    I: IntoIterator<Item = Node>,
{
    let mut groups: IndexMap<OwnerKey, OwnerGroup> = IndexMap::new();
    for node in nodes {
        groups.entry(node.owner.clone()).or_insert_with_key(|k| OwnerGroup::new(k.clone())).push(node);
    }
    groups.into_values().collect()
}

/// Plan every document for `nodes`.
pub(crate) fn plan<I>(nodes: I) -> Vec<PlannedDocument>
where
    I: IntoIterator<Item = Node>,
{
    group_by_owner(nodes).into_iter().flat_map(OwnerGroup::into_documents).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IconPackDescriptor, NotifyProperty, ThemeDescriptor};
    use std::collections::BTreeSet;

    fn node(owner: &str, kind: NodeKind) -> Node {
        Node { owner: OwnerKey::new("App", owner), location: None, imports: BTreeSet::new(), kind }
    }

    fn notify(owner: &str, field: &str) -> Node {
        node(
            owner,
            NodeKind::Notify(NotifyProperty {
                field_name: field.into(),
                field_type: "int".into(),
                already_implements_change_notification: false,
                wants_partial_hooks: false,
            }),
        )
    }

    fn theme(owner: &str) -> Node {
        node(owner, NodeKind::Theme(ThemeDescriptor { colors: Vec::new(), uses_fallback_palette: true }))
    }

    fn pack(owner: &str) -> Node {
        node(owner, NodeKind::IconPack(IconPackDescriptor { pack_name: "Fluent".into() }))
    }

    #[test]
    fn owner_with_every_kind_gets_three_documents() {
        let planned = plan([notify("Shell", "_a"), theme("Shell"), pack("Shell"), notify("Shell", "_b")]);
        let buckets: Vec<_> = planned.iter().map(|p| p.key.bucket).collect();

        assert_eq!(buckets, [Bucket::Theme, Bucket::IconPack, Bucket::Members]);
        assert_eq!(planned[2].nodes, [notify("Shell", "_a"), notify("Shell", "_b")]);
    }

    #[test]
    fn groups_keep_first_seen_owner_order() {
        let groups = group_by_owner([notify("B", "_x"), notify("A", "_y"), notify("B", "_z")]);
        let owners: Vec<_> = groups.iter().map(|g| g.owner.type_name.as_str()).collect();
        assert_eq!(owners, ["B", "A"]);
    }

    #[test]
    fn singleton_bucket_needs_exactly_one_node() {
        let groups = group_by_owner([theme("Dark"), theme("Dark"), pack("Dark")]);
        assert_eq!(groups[0].buckets(), BucketSet::ICON_PACK);
    }
}
