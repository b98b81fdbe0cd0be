use pixkit_image::{storage::OwnedStorage, BufferAllocator, CpuAllocator};

use crate::error::IoError;

/// Compression method of an 'ALPH' chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaCompression {
    /// Raw alpha values.
    None,
    /// Alpha compressed as the green channel of a lossless bitstream.
    Lossless,
    /// A value not defined by the container format.
    Reserved(u8),
}

/// Prediction filter applied to the alpha plane before compression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaFilter {
    /// No filter.
    None,
    /// Predict from the left neighbour.
    Horizontal,
    /// Predict from the neighbour above.
    Vertical,
    /// Predict from the left, top and top-left neighbours.
    Gradient,
}

/// The header byte of an 'ALPH' chunk.
///
/// Bits 0-1 hold the compression method, bits 2-3 the filtering method,
/// bits 4-5 the pre-processing hint and bits 6-7 are reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlphaChunkHeader(pub u8);

impl AlphaChunkHeader {
    /// The compression method.
    pub fn compression(self) -> AlphaCompression {
        match self.0 & 0b11 {
            0 => AlphaCompression::None,
            1 => AlphaCompression::Lossless,
            other => AlphaCompression::Reserved(other),
        }
    }

    /// The filtering method.
    pub fn filtering(self) -> AlphaFilter {
        match (self.0 >> 2) & 0b11 {
            0 => AlphaFilter::None,
            1 => AlphaFilter::Horizontal,
            2 => AlphaFilter::Vertical,
            _ => AlphaFilter::Gradient,
        }
    }

    /// The pre-processing hint, 1 when the alpha was level-reduced.
    pub fn preprocessing(self) -> u8 {
        (self.0 >> 4) & 0b11
    }

    /// The reserved bits.
    pub fn reserved(self) -> u8 {
        self.0 >> 6
    }
}

/// Alpha plane bytes read from an 'ALPH' chunk, owned through an allocator.
///
/// The memory goes back to the allocator when the value is dropped.
pub struct AlphaData<A: BufferAllocator = CpuAllocator> {
    storage: OwnedStorage<u8, A>,
}

impl<A: BufferAllocator> AlphaData<A> {
    /// Copy `data` into memory from `alloc`.
    pub fn from_slice(data: &[u8], alloc: A) -> Result<Self, IoError> {
        Ok(Self {
            storage: OwnedStorage::from_slice(data, alloc)?,
        })
    }

    /// The alpha bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl<A: BufferAllocator> std::fmt::Debug for AlphaData<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaData")
            .field("len", &self.len())
            .finish()
    }
}
