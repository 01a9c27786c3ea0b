use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use pocketgb_core::{
    Cartridge, FrameStatus, GameBoy, MachineConfig, NopProcessor, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use typed_builder::TypedBuilder;

const USAGE: &str = "Usage: pocketgb <rom_path> [frames] [out_rgb24_path]";
const DEFAULT_FRAMES: u32 = 60;

#[derive(Debug, TypedBuilder)]
struct RunOptions {
    rom_path: PathBuf,
    #[builder(default = DEFAULT_FRAMES)]
    frames: u32,
    #[builder(default, setter(strip_option))]
    out_path: Option<PathBuf>,
}

impl RunOptions {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let Some(rom_path) = args.next() else {
            bail!("{USAGE}");
        };
        let frames = match args.next() {
            Some(frames) => frames
                .parse()
                .with_context(|| format!("Invalid frame count '{frames}'"))?,
            None => DEFAULT_FRAMES,
        };

        let options = match args.next() {
            Some(out_path) => RunOptions::builder()
                .rom_path(rom_path.into())
                .frames(frames)
                .out_path(out_path.into())
                .build(),
            None => RunOptions::builder()
                .rom_path(rom_path.into())
                .frames(frames)
                .build(),
        };
        Ok(options)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let options = RunOptions::from_args(std::env::args().skip(1))?;
    log::info!("Running with {:?}", options);

    let cartridge = Cartridge::from_file(&options.rom_path)
        .with_context(|| format!("Failed to load ROM '{}'", options.rom_path.display()))?;
    println!(
        "Title: '{}'  controller: {:?}  size: {} bytes  ROM banks: {}  RAM banks: {}",
        cartridge.title(),
        cartridge.controller(),
        cartridge.len(),
        cartridge.declared_rom_banks(),
        cartridge.ram_bank_count()
    );

    let mut gb = GameBoy::new(MachineConfig::default(), NopProcessor, ());
    gb.insert_cartridge(cartridge);

    for frame in 0..options.frames {
        match gb.update() {
            FrameStatus::Completed => {}
            status => {
                log::warn!("Frame {} ended early: {:?}", frame, status);
                break;
            }
        }
    }

    println!(
        "Ran {} frames, {} opcodes, pc=0x{:04X}",
        options.frames,
        gb.total_opcodes(),
        gb.cpu.regs.pc
    );

    if let Some(out_path) = &options.out_path {
        let buffer = gb.framebuffer().as_rgb24();
        std::fs::write(out_path, buffer)
            .with_context(|| format!("Failed to write '{}'", out_path.display()))?;
        println!(
            "Wrote {} bytes ({}x{} rgb24) to '{}'",
            buffer.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            out_path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_positional_arguments() {
        let options = RunOptions::from_args(args(&["game.gb", "3", "out.rgb"])).unwrap();
        assert_eq!(options.rom_path, PathBuf::from("game.gb"));
        assert_eq!(options.frames, 3);
        assert_eq!(options.out_path, Some(PathBuf::from("out.rgb")));
    }

    #[test]
    fn frames_and_output_are_optional() {
        let options = RunOptions::from_args(args(&["game.gb"])).unwrap();
        assert_eq!(options.frames, DEFAULT_FRAMES);
        assert_eq!(options.out_path, None);
    }

    #[test]
    fn rejects_missing_rom_and_bad_frame_count() {
        assert!(RunOptions::from_args(args(&[])).is_err());
        assert!(RunOptions::from_args(args(&["game.gb", "many"])).is_err());
    }
}
