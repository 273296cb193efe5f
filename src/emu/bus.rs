use log::warn;

use super::cart::Cartridge;

/// Address-bus stub. Only cartridge space is mapped: ROM at 0x0000-0x7FFF
/// and external RAM at 0xA000-0xBFFF. Everything else behaves like an open
/// bus (reads float to 0xFF, writes are dropped) instead of faulting, so the
/// caller keeps the halt-or-continue decision.
pub struct Bus {
    pub cart: Cartridge,
}

impl Bus {
    pub fn new(cart: Cartridge) -> Self {
        Self { cart }
    }

    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cart.read(addr), // ROM (no MBC)
            0xA000..=0xBFFF => self.cart.read_ram(addr - 0xA000).unwrap_or_else(|| {
                warn!("read past external ram at {addr:#06X}");
                0xFF
            }),
            _ => {
                warn!("read from unmapped address {addr:#06X}");
                0xFF // open bus
            }
        }
    }

    pub fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                // ROM is read-only without an MBC; drop the write
                warn!("write to rom address {addr:#06X} ignored");
            }
            0xA000..=0xBFFF => {
                if !self.cart.write_ram(addr - 0xA000, value) {
                    warn!("write past external ram at {addr:#06X} ignored");
                }
            }
            _ => warn!("write to unmapped address {addr:#06X} ignored"),
        }
    }
}
