use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

mod emu;

use emu::{Bus, CartError, Cartridge, ValidationOptions};

#[derive(Parser, Debug)]
struct Args {
    /// Path to .gb ROM file
    rom: String,

    /// Also verify the 16-bit global checksum (many real dumps fail it)
    #[arg(long)]
    check_global_checksum: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match load(&args) {
        Ok(bus) => {
            let cart = &bus.cart;
            info!("title: {}", cart.title());
            info!(
                "rom: {} bytes, ram: {} bytes, type: {:#04X}, version: {}",
                cart.rom_size(),
                cart.ram_size(),
                cart.header().cartridge_type,
                cart.header().rom_version,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            // exit codes: 0 ok, 1 allocation failure, 2 anything else
            match err.downcast_ref::<CartError>() {
                Some(CartError::Alloc { .. }) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

fn load(args: &Args) -> Result<Bus> {
    let opts = ValidationOptions {
        check_global_checksum: args.check_global_checksum,
    };

    let cart = Cartridge::from_file(&args.rom, opts)
        .with_context(|| format!("failed to load {}", args.rom))?;

    Ok(Bus::new(cart))
}
