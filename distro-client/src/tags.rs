//! Typed cache tags
//!
//! Queries declare the tags they provide, mutations the tags they invalidate.
//! Both sides use the same closed [`TagType`], so a misspelled tag is a
//! compile error instead of a silently stale screen.

use std::fmt;

/// Resource family a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagType {
    Auth,
    Zone,
    Route,
    RouteSchedule,
    Staff,
    Shop,
    Product,
    Wallet,
    WalletTransaction,
    SubsidyOrder,
    Warehouse,
    WarehouseInventory,
    CreditLimitRequest,
}

/// Which part of a resource family a tag covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagId {
    /// The whole family; when invalidated, matches every tag of the type
    Whole,
    /// The collection itself (membership of list queries)
    List,
    /// One item
    Id(i64),
}

/// Cache tag: a resource family plus an optional item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub kind: TagType,
    pub id: TagId,
}

impl Tag {
    /// Type-wide tag
    pub const fn of(kind: TagType) -> Self {
        Self {
            kind,
            id: TagId::Whole,
        }
    }

    /// Collection tag
    pub const fn list(kind: TagType) -> Self {
        Self {
            kind,
            id: TagId::List,
        }
    }

    /// Item tag
    pub const fn id(kind: TagType, id: i64) -> Self {
        Self {
            kind,
            id: TagId::Id(id),
        }
    }

    /// Whether invalidating `self` invalidates a query that provided `provided`
    pub fn matches(&self, provided: &Tag) -> bool {
        if self.kind != provided.kind {
            return false;
        }
        match self.id {
            TagId::Whole => true,
            id => id == provided.id,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            TagId::Whole => write!(f, "{:?}", self.kind),
            TagId::List => write!(f, "{:?}:LIST", self.kind),
            TagId::Id(id) => write!(f, "{:?}:{}", self.kind, id),
        }
    }
}

/// Tags for a list result: one per item plus the collection tag
pub fn list_tags(kind: TagType, ids: impl IntoIterator<Item = i64>) -> Vec<Tag> {
    ids.into_iter()
        .map(|id| Tag::id(kind, id))
        .chain(std::iter::once(Tag::list(kind)))
        .collect()
}

/// Tags touched by a change to one item that can also move it between lists
pub fn item_and_list(kind: TagType, id: i64) -> Vec<Tag> {
    vec![Tag::id(kind, id), Tag::list(kind)]
}
