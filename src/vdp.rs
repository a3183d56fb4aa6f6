// Register-level model of a TMS9918-class video display processor.
// Everything the sketch loop does to the screen goes through `DisplayRegisters`:
// an address register, a data port that auto-increments, eight write-only
// control registers and a status register carrying the vertical-blank flag.

/// 16 KiB of video RAM.
pub const VRAM_SIZE: usize = 0x4000;
/// Addresses wrap at 14 bits.
pub const ADDRESS_MASK: u16 = 0x3FFF;

// ----------------------------- bitmap-mode table layout -----------------------------

pub const PATTERN_TABLE: u16 = 0x0000;
pub const NAME_TABLE: u16 = 0x1800;
pub const SPRITE_ATTRIBUTES: u16 = 0x1B00;
pub const COLOR_TABLE: u16 = 0x2000;
pub const SPRITE_PATTERNS: u16 = 0x3800;

/// 768 tiles of 8 bytes: the packed 1bpp bitmap behind the pattern table.
pub const BITMAP_BYTES: usize = 768 * 8;
/// Name table entries (32x24 tiles).
pub const NAME_ENTRIES: usize = 768;

/// A sprite Y of 0xD0 ends the sprite list.
pub const SPRITE_LIST_END: u8 = 0xD0;
/// Bytes per sprite attribute entry (Y, X, pattern, color).
pub const SPRITE_ENTRY_BYTES: u16 = 4;
pub const MAX_SPRITES: usize = 32;

// ----------------------------- registers -----------------------------

pub const REG_MODE0: u8 = 0;
pub const REG_MODE1: u8 = 1;
pub const REG_NAME: u8 = 2;
pub const REG_COLOR: u8 = 3;
pub const REG_PATTERN: u8 = 4;
pub const REG_SPRITE_ATTR: u8 = 5;
pub const REG_SPRITE_PAT: u8 = 6;
pub const REG_BACKDROP: u8 = 7;

/// R0 bit selecting Graphics II (bitmap) mode.
pub const MODE0_BITMAP: u8 = 0x02;

/// Flags in R1.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
pub enum Mode1Flag {
    Magnify = 1 << 0,
    Sprites16 = 1 << 1,
    Unblank = 1 << 6,
    Vram16K = 1 << 7,
}

/// Flags in the status register.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
pub enum StatusFlag {
    VBlank = 1 << 7,
}

/// Primitive access to the display controller's address space.
///
/// The address set by `set_read_address`/`set_write_address` advances by one
/// after every data port access. None of these operations can fail.
pub trait DisplayRegisters {
    fn set_read_address(&mut self, address: u16);
    fn set_write_address(&mut self, address: u16);
    fn read_data(&mut self) -> u8;
    fn write_data(&mut self, value: u8);
    fn write_register(&mut self, register: u8, value: u8);

    /// Reading the status register clears its vertical-blank flag.
    fn read_status(&mut self) -> u8;

    /// Block until the controller reports a vertical blank.
    fn wait_vblank(&mut self) {
        while self.read_status() & StatusFlag::VBlank as u8 == 0 {
            std::hint::spin_loop();
        }
    }
}

pub struct Vdp {
    vram: Box<[u8]>,
    registers: [u8; 8],
    address: u16,
    status: u8,
    free_running: bool,
}

impl Vdp {
    /// A controller whose vertical-blank flag is raised by whoever scans it out.
    pub fn new() -> Self {
        Self {
            vram: vec![0u8; VRAM_SIZE].into_boxed_slice(),
            registers: [0; 8],
            address: 0,
            status: 0,
            free_running: false,
        }
    }

    /// A controller with no scanout attached: every status read reports a
    /// vertical blank, so each poll starts a new frame immediately.
    pub fn headless() -> Self {
        Self { free_running: true, ..Self::new() }
    }

    /// Whole VRAM, for inspecting a session after it ran.
    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// Read a byte without touching the address register.
    pub fn peek(&self, address: u16) -> u8 {
        self.vram[(address & ADDRESS_MASK) as usize]
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers[(register & 0x07) as usize]
    }

    pub fn raise_vblank(&mut self) {
        self.status |= StatusFlag::VBlank as u8;
    }

    pub fn vblank_pending(&self) -> bool {
        self.status & StatusFlag::VBlank as u8 != 0
    }

    pub fn bitmap_mode(&self) -> bool {
        self.register(REG_MODE0) & MODE0_BITMAP != 0
    }

    pub fn mode1_flag(&self, flag: Mode1Flag) -> bool {
        self.register(REG_MODE1) & flag as u8 != 0
    }

    pub fn name_table(&self) -> u16 {
        u16::from(self.register(REG_NAME) & 0x0F) << 10
    }

    /// In bitmap mode only the top bit of R3 places the color table.
    pub fn color_table(&self) -> u16 {
        if self.bitmap_mode() {
            u16::from(self.register(REG_COLOR) & 0x80) << 6
        } else {
            u16::from(self.register(REG_COLOR)) << 6
        }
    }

    /// In bitmap mode only bit 2 of R4 places the pattern table.
    pub fn pattern_table(&self) -> u16 {
        if self.bitmap_mode() {
            u16::from(self.register(REG_PATTERN) & 0x04) << 11
        } else {
            u16::from(self.register(REG_PATTERN) & 0x07) << 11
        }
    }

    pub fn sprite_attribute_table(&self) -> u16 {
        u16::from(self.register(REG_SPRITE_ATTR) & 0x7F) << 7
    }

    pub fn sprite_pattern_table(&self) -> u16 {
        u16::from(self.register(REG_SPRITE_PAT) & 0x07) << 11
    }

    pub fn backdrop(&self) -> u8 {
        self.register(REG_BACKDROP) & 0x0F
    }

    fn advance(&mut self) {
        self.address = (self.address + 1) & ADDRESS_MASK;
    }
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayRegisters for Vdp {
    fn set_read_address(&mut self, address: u16) {
        self.address = address & ADDRESS_MASK;
    }

    fn set_write_address(&mut self, address: u16) {
        self.address = address & ADDRESS_MASK;
    }

    fn read_data(&mut self) -> u8 {
        let value = self.vram[self.address as usize];
        self.advance();
        value
    }

    fn write_data(&mut self, value: u8) {
        self.vram[self.address as usize] = value;
        self.advance();
    }

    fn write_register(&mut self, register: u8, value: u8) {
        self.registers[(register & 0x07) as usize] = value;
    }

    fn read_status(&mut self) -> u8 {
        if self.free_running {
            self.raise_vblank();
        }
        let status = self.status;
        self.status &= !(StatusFlag::VBlank as u8);
        status
    }
}
