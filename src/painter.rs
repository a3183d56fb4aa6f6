// Pixel painting on the packed 1bpp bitmap that lives in the pattern table.
// Visual: LMB leaves a trail of foreground-colored dots; RMB wipes them all.
use crate::types::PointerState;
use crate::vdp::{DisplayRegisters, BITMAP_BYTES, PATTERN_TABLE};

/// Byte offset of pixel (x, y) inside the bitmap.
/// Tiles are 8x8: one byte per tile row, 32 tiles across, so a tile row of the
/// screen spans 256 bytes.
#[inline]
pub fn pixel_offset(x: u8, y: u8) -> u16 {
    let (x, y) = (u16::from(x), u16::from(y));
    8 * (x / 8) + 256 * (y / 8) + (y % 8)
}

/// Bit for pixel column `x` inside its byte; the MSB is the leftmost pixel.
#[inline]
pub fn pixel_mask(x: u8) -> u8 {
    0x80 >> (x % 8)
}

/// Set the bit under the pointer.
///
/// Read-modify-write: the byte is read through the read address and only then
/// written back through the write address, so sibling bits survive.
pub fn set_pixel<D: DisplayRegisters>(display: &mut D, at: PointerState) {
    let address = PATTERN_TABLE + pixel_offset(at.x(), at.y());

    display.set_read_address(address);
    let bits = display.read_data() | pixel_mask(at.x());

    display.set_write_address(address);
    display.write_data(bits);
}

/// Zero the whole bitmap.
pub fn clear_all<D: DisplayRegisters>(display: &mut D) {
    display.set_write_address(PATTERN_TABLE);
    for _ in 0..BITMAP_BYTES {
        display.write_data(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdp::Vdp;

    #[derive(Debug, PartialEq)]
    enum Op {
        ReadAddr(u16),
        WriteAddr(u16),
        Read,
        Write(u8),
    }

    /// Records the order of register transactions.
    struct Recording {
        inner: Vdp,
        ops: Vec<Op>,
    }

    impl DisplayRegisters for Recording {
        fn set_read_address(&mut self, address: u16) {
            self.ops.push(Op::ReadAddr(address));
            self.inner.set_read_address(address);
        }
        fn set_write_address(&mut self, address: u16) {
            self.ops.push(Op::WriteAddr(address));
            self.inner.set_write_address(address);
        }
        fn read_data(&mut self) -> u8 {
            self.ops.push(Op::Read);
            self.inner.read_data()
        }
        fn write_data(&mut self, value: u8) {
            self.ops.push(Op::Write(value));
            self.inner.write_data(value);
        }
        fn write_register(&mut self, register: u8, value: u8) {
            self.inner.write_register(register, value);
        }
        fn read_status(&mut self) -> u8 {
            self.inner.read_status()
        }
    }

    #[test]
    fn offsets_follow_tile_layout() {
        assert_eq!(pixel_offset(0, 0), 0);
        assert_eq!(pixel_offset(7, 7), 7);
        assert_eq!(pixel_offset(8, 0), 8);
        assert_eq!(pixel_offset(0, 8), 256);
        assert_eq!(pixel_offset(255, 191), 8 * 31 + 256 * 23 + 7);
        assert!((pixel_offset(255, 191) as usize) < BITMAP_BYTES);
    }

    #[test]
    fn masks_run_msb_first() {
        assert_eq!(pixel_mask(0), 0x80);
        assert_eq!(pixel_mask(1), 0x40);
        assert_eq!(pixel_mask(7), 0x01);
        assert_eq!(pixel_mask(13), 0x04);
    }

    #[test]
    fn set_pixel_adds_exactly_one_bit() {
        let mut vdp = Vdp::new();
        let addr = pixel_offset(19, 42);
        vdp.set_write_address(addr);
        vdp.write_data(0b1000_0001);

        set_pixel(&mut vdp, PointerState::new(19, 42));

        let after = vdp.peek(addr);
        assert_eq!(after, 0b1001_0001);
        assert_eq!((after ^ 0b1000_0001).count_ones(), 1);
    }

    #[test]
    fn neighbouring_pixels_in_one_byte_both_survive() {
        let mut vdp = Vdp::new();
        set_pixel(&mut vdp, PointerState::new(0, 0));
        set_pixel(&mut vdp, PointerState::new(1, 0));
        assert_eq!(vdp.peek(0), 0xC0);
    }

    #[test]
    fn set_pixel_reads_before_it_writes() {
        let mut rec = Recording { inner: Vdp::new(), ops: Vec::new() };
        set_pixel(&mut rec, PointerState::new(9, 1));
        assert_eq!(
            rec.ops,
            vec![Op::ReadAddr(9), Op::Read, Op::WriteAddr(9), Op::Write(0x40)]
        );
    }

    #[test]
    fn clear_all_zeroes_the_bitmap_only() {
        let mut vdp = Vdp::new();
        vdp.set_write_address(0);
        for i in 0..(BITMAP_BYTES + 16) {
            vdp.write_data(i as u8 | 1);
        }

        clear_all(&mut vdp);

        assert!(vdp.vram()[..BITMAP_BYTES].iter().all(|&b| b == 0));
        assert_ne!(vdp.peek(BITMAP_BYTES as u16), 0);
    }
}
