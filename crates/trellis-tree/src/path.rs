//! Positional addressing into an ordered tree.

use std::fmt;

/// Ordered sequence of indices addressing a node from the tree root.
///
/// `path[0]` indexes the root sequence; each deeper entry indexes the children
/// sequence of the node selected so far. An empty path addresses nothing and
/// is rejected by resolution.
///
/// # Example
///
/// ```
/// use trellis_tree::TreePath;
///
/// let path = TreePath::root(0).child(2).child(1);
/// assert_eq!(path.as_slice(), &[0, 2, 1]);
/// assert_eq!(path.to_string(), "/0/2/1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    /// Create a path from raw indices, root index first.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path addressing a root-level node.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Extend the path one level deeper.
    #[must_use]
    pub fn child(mut self, index: usize) -> Self {
        self.0.push(index);
        self
    }

    /// Number of depths the path traverses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path addresses nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw indices, root index first.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Ancestor indices plus the final index, or `None` when empty.
    pub(crate) fn split_last(&self) -> Option<(&[usize], usize)> {
        self.0.split_last().map(|(last, ancestors)| (ancestors, *last))
    }
}

impl From<Vec<usize>> for TreePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for TreePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for TreePath {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl FromIterator<usize> for TreePath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
