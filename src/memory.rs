/// Highest valid address. The address space holds `MEMORY_MAX + 1` cells.
pub const MEMORY_MAX: usize = 0xFFFF;

/// Flat 64KB address space backing both code and data.
pub struct Memory {
    cells: Box<[u8; MEMORY_MAX + 1]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; MEMORY_MAX + 1]),
        }
    }

    /// Bulk-copy a binary image into memory starting at `base`.
    ///
    /// The caller must ensure the image fits within the address space;
    /// no bounds are enforced here beyond the slice copy itself.
    pub fn load(&mut self, base: u16, image: &[u8]) {
        let base = base as usize;
        self.cells[base..base + image.len()].copy_from_slice(image);
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[addr as usize] = value;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
