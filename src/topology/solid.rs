use super::shell::ShellKey;

slotmap::new_key_type! {
    /// Arena key for a solid in the topology store.
    pub struct SolidKey;
}

/// Data associated with a topological solid.
///
/// A solid is a bounded volume enclosed by one or more shells.
/// The first shell is the outer shell; additional shells represent voids.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// The outer shell of the solid.
    pub outer_shell: ShellKey,
    /// Inner shells representing voids within the solid.
    pub inner_shells: Vec<ShellKey>,
}

impl SolidData {
    /// Creates a solid without voids.
    #[must_use]
    pub fn new(outer_shell: ShellKey) -> Self {
        Self {
            outer_shell,
            inner_shells: Vec::new(),
        }
    }

    /// All shells in traversal order: the outer shell first, then the voids.
    pub fn shells(&self) -> impl Iterator<Item = ShellKey> + '_ {
        std::iter::once(self.outer_shell).chain(self.inner_shells.iter().copied())
    }
}
