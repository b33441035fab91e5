//! CRC-32 (IEEE 802.3, reflected polynomial 0xEDB88320)

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Table-driven CRC-32 calculator
#[derive(Debug, Clone)]
pub struct Crc32 {
    table: [u32; 256],
}

impl Crc32 {
    /// Build the 256-entry lookup table
    pub fn new() -> Self {
        let mut table = [0u32; 256];
        for (n, slot) in table.iter_mut().enumerate() {
            let mut c = n as u32;
            for _ in 0..8 {
                c = if c & 1 != 0 {
                    POLYNOMIAL ^ (c >> 1)
                } else {
                    c >> 1
                };
            }
            *slot = c;
        }
        Self { table }
    }

    /// Checksum of a complete buffer
    pub fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in data {
            crc = self.table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        crc ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let crc = Crc32::new();
        assert_eq!(crc.checksum(b""), 0);
        assert_eq!(crc.checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(
            crc.checksum(b"The quick brown fox jumps over the lazy dog"),
            0x414F_A339
        );
    }

    #[test]
    fn test_table_entries() {
        let crc = Crc32::new();
        assert_eq!(crc.table[0], 0);
        assert_eq!(crc.table[1], 0x7707_3096);
        assert_eq!(crc.table[255], 0x2D02_EF8D);
    }
}
