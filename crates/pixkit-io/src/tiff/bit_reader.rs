/// Reads unsigned samples of arbitrary bit width, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Read the next `bits` bits (at most 16) as an unsigned value.
    ///
    /// Returns `None` if fewer than `bits` bits remain.
    pub fn read_bits(&mut self, bits: u32) -> Option<u16> {
        debug_assert!(bits <= 16);
        if self.bit_pos + bits as usize > self.data.len() * 8 {
            return None;
        }

        let mut value = 0u32;
        for _ in 0..bits {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.bit_pos += 1;
        }

        Some(value as u16)
    }

    /// Skip to the start of the next byte unless already aligned.
    pub fn align_to_byte(&mut self) {
        self.bit_pos = self.bit_pos.div_ceil(8) * 8;
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.bit_pos
    }
}
