use super::face::FaceKey;

slotmap::new_key_type! {
    /// Arena key for a shell in the topology store.
    pub struct ShellKey;
}

/// Data associated with a topological shell.
///
/// A shell is a connected set of faces forming a surface boundary.
#[derive(Debug, Clone)]
pub struct ShellData {
    /// The faces that make up this shell, in traversal order.
    pub faces: Vec<FaceKey>,
}

impl ShellData {
    /// Creates a shell from the given faces.
    #[must_use]
    pub fn new(faces: Vec<FaceKey>) -> Self {
        Self { faces }
    }
}
