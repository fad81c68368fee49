//! Catalog entities.

/// Catalog item identified by its id rather than by its content.
///
/// Products, attributes and services are entities: two items with the same id
/// are the same item even if their labels differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether both items denote the same catalog entry.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
