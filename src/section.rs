/// A maximal run of contiguous bytes at a known address. The data is never
/// sparse: it covers exactly `data.len()` consecutive addresses starting at
/// `start_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub start_address: u32,
    pub data: Vec<u8>,
}

impl Section {
    pub fn new(start_address: u32, data: Vec<u8>) -> Self {
        debug_assert!(
            data.len() <= u32::MAX as usize,
            "section data exceeds u32::MAX bytes"
        );
        Self {
            start_address,
            data,
        }
    }

    /// Exclusive end address. Widened to u64 because a section may end
    /// exactly at the top of the 32-bit address space.
    pub fn end_address(&self) -> u64 {
        self.start_address as u64 + self.data.len() as u64
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `other` begins exactly where this section ends.
    pub fn is_contiguous_with(&self, other: &Section) -> bool {
        self.end_address() == other.start_address as u64
    }
}
