use ahash::AHashSet;
use std::fmt;

/// The kinds of externally defined entities a quest may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// NPCs: conversation partners, speakers, quest progressors.
    Character,
    Item,
    Faction,
    Resource,
    /// World objects, e.g. the target of `ItemUsedOnObject`.
    Object,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 5] = [
        CatalogKind::Character,
        CatalogKind::Item,
        CatalogKind::Faction,
        CatalogKind::Resource,
        CatalogKind::Object,
    ];

    /// The noun used in issue messages.
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Character => "NPC",
            CatalogKind::Item => "item",
            CatalogKind::Faction => "faction",
            CatalogKind::Resource => "resource",
            CatalogKind::Object => "object",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Existence lookup for entity IDs.
///
/// This is the seam between the validator and wherever reference data lives.
/// [`ReferenceCatalog`] is the in-memory implementation used by the loader.
pub trait ReferenceLookup: Send + Sync {
    fn contains(&self, kind: CatalogKind, id: &str) -> bool;
}

/// In-memory ID sets, one per [`CatalogKind`]. A missing set is simply empty.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    characters: AHashSet<String>,
    items: AHashSet<String>,
    factions: AHashSet<String>,
    resources: AHashSet<String>,
    objects: AHashSet<String>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of several IDs of one kind.
    pub fn with<I, S>(mut self, kind: CatalogKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend(kind, ids);
        self
    }

    pub fn insert(&mut self, kind: CatalogKind, id: impl Into<String>) -> bool {
        self.set_mut(kind).insert(id.into())
    }

    pub fn extend<I, S>(&mut self, kind: CatalogKind, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_mut(kind).extend(ids.into_iter().map(Into::into));
    }

    pub fn ids(&self, kind: CatalogKind) -> &AHashSet<String> {
        match kind {
            CatalogKind::Character => &self.characters,
            CatalogKind::Item => &self.items,
            CatalogKind::Faction => &self.factions,
            CatalogKind::Resource => &self.resources,
            CatalogKind::Object => &self.objects,
        }
    }

    pub fn characters(&self) -> &AHashSet<String> {
        &self.characters
    }

    pub fn items(&self) -> &AHashSet<String> {
        &self.items
    }

    pub fn factions(&self) -> &AHashSet<String> {
        &self.factions
    }

    pub fn resources(&self) -> &AHashSet<String> {
        &self.resources
    }

    pub fn objects(&self) -> &AHashSet<String> {
        &self.objects
    }

    /// Total number of IDs across all kinds.
    pub fn len(&self) -> usize {
        CatalogKind::ALL.iter().map(|kind| self.ids(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_mut(&mut self, kind: CatalogKind) -> &mut AHashSet<String> {
        match kind {
            CatalogKind::Character => &mut self.characters,
            CatalogKind::Item => &mut self.items,
            CatalogKind::Faction => &mut self.factions,
            CatalogKind::Resource => &mut self.resources,
            CatalogKind::Object => &mut self.objects,
        }
    }
}

impl ReferenceLookup for ReferenceCatalog {
    fn contains(&self, kind: CatalogKind, id: &str) -> bool {
        self.ids(kind).contains(id)
    }
}
