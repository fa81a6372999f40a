use neander_core::common::MEMORY_SIZE;

/// Plain byte array: what every cached read must agree with.
#[derive(Debug, Clone)]
pub struct ReferenceMemory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for ReferenceMemory {
    fn default() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }
}

impl ReferenceMemory {
    pub fn read(&self, addr: u8) -> u8 {
        self.cells[usize::from(addr)]
    }

    pub fn write(&mut self, addr: u8, value: u8) {
        self.cells[usize::from(addr)] = value;
    }
}
