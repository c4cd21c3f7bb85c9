/// Byte offset into the position space shared by every file of a [`FileManager`].
///
/// [`FileManager`]: crate::FileManager
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Pos {
    pub fn with_offset(&self, offset: usize) -> Self {
        Self(self.0 + offset)
    }

    pub fn offset(&self) -> usize {
        self.0
    }
}
