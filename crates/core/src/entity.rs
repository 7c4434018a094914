//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Derived lot state is recomputed on every read, but it keeps a stable identity
/// (its lot key) across recomputations.
pub trait Entity {
    /// Identity of the entity (for lots, a composite natural key).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
