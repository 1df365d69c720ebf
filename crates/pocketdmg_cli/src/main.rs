use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use pocketdmg::{Emulator, FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use typed_builder::TypedBuilder;

const USAGE: &str = "Usage: pocketdmg <rom_path> [--boot <boot_rom>] [--frames <n>] [--out <frame.pgm>]";

const DEFAULT_FRAMES: u32 = 60;
const DEFAULT_OUT: &str = "frame.pgm";

/// Grey levels for shade indices 0..=3 (lightest first).
const PALETTE: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

#[derive(Debug, TypedBuilder)]
struct RunConfig {
    rom_path: PathBuf,
    #[builder(default)]
    boot_rom_path: Option<PathBuf>,
    #[builder(default = DEFAULT_FRAMES)]
    frames: u32,
    #[builder(default = PathBuf::from(DEFAULT_OUT))]
    out_path: PathBuf,
}

impl RunConfig {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut rom_path = None;
        let mut boot_rom_path = None;
        let mut frames = None;
        let mut out_path = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--boot" => boot_rom_path = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                "--frames" => {
                    let value = next_value(&mut args, &arg)?;
                    frames = Some(
                        value
                            .parse::<u32>()
                            .with_context(|| format!("invalid frame count '{value}'"))?,
                    );
                }
                "--out" => out_path = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
                path if rom_path.is_none() => rom_path = Some(PathBuf::from(path)),
                other => bail!("unexpected argument '{other}'\n{USAGE}"),
            }
        }

        let Some(rom_path) = rom_path else {
            bail!("no ROM path provided\n{USAGE}");
        };
        Ok(RunConfig::builder()
            .rom_path(rom_path)
            .boot_rom_path(boot_rom_path)
            .frames(frames.unwrap_or(DEFAULT_FRAMES))
            .out_path(out_path.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)))
            .build())
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("'{flag}' expects a value\n{USAGE}"))
}

/// Binary PGM (P5) with the DMG shades mapped to grey.
fn encode_pgm(frame: &FrameBuffer) -> Vec<u8> {
    let mut out = format!("P5\n{} {}\n255\n", SCREEN_WIDTH, SCREEN_HEIGHT).into_bytes();
    out.extend(frame.pixels().iter().map(|&shade| PALETTE[(shade & 0x03) as usize]));
    out
}

fn run(config: &RunConfig) -> Result<()> {
    let mut emulator = Emulator::new();

    if let Some(path) = &config.boot_rom_path {
        let image = std::fs::read(path)
            .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
        emulator
            .load_boot_rom(&image)
            .with_context(|| format!("failed to load boot ROM '{}'", path.display()))?;
    }

    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", config.rom_path.display()))?;
    emulator
        .load_cartridge(&rom)
        .with_context(|| format!("failed to load ROM '{}'", config.rom_path.display()))?;
    if let Some(header) = emulator.cartridge_header() {
        log::info!("Running '{}' ({:?})", header.title, header.mapper);
    }

    for frame in 0..config.frames {
        emulator
            .render_frame()
            .with_context(|| format!("emulation stopped in frame {frame}"))?;
    }

    let pgm = encode_pgm(emulator.frame());
    std::fs::write(&config.out_path, &pgm)
        .with_context(|| format!("failed to write '{}'", config.out_path.display()))?;
    println!(
        "Wrote {}x{} frame after {} frames to '{}'",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        config.frames,
        config.out_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_args(std::env::args().skip(1))?;
    log::debug!("{config:?}");
    run(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_apply_when_only_rom_is_given() {
        let config = RunConfig::from_args(args(&["game.gb"])).unwrap();
        assert_eq!(config.rom_path, PathBuf::from("game.gb"));
        assert_eq!(config.frames, 60);
        assert_eq!(config.out_path, PathBuf::from("frame.pgm"));
        assert!(config.boot_rom_path.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = RunConfig::from_args(args(&[
            "--frames", "5", "game.gb", "--boot", "dmg.bin", "--out", "x.pgm",
        ]))
        .unwrap();
        assert_eq!(config.frames, 5);
        assert_eq!(config.boot_rom_path, Some(PathBuf::from("dmg.bin")));
        assert_eq!(config.out_path, PathBuf::from("x.pgm"));
    }

    #[test]
    fn missing_rom_and_bad_values_are_errors() {
        assert!(RunConfig::from_args(args(&[])).is_err());
        assert!(RunConfig::from_args(args(&["game.gb", "--frames", "many"])).is_err());
        assert!(RunConfig::from_args(args(&["game.gb", "--out"])).is_err());
    }

    #[test]
    fn pgm_maps_shades_to_grey() {
        let frame = FrameBuffer::new();
        let pgm = encode_pgm(&frame);
        let header = b"P5\n160 144\n255\n";
        assert_eq!(&pgm[..header.len()], header);
        assert_eq!(pgm.len(), header.len() + SCREEN_WIDTH * SCREEN_HEIGHT);
        assert!(pgm[header.len()..].iter().all(|&b| b == 0xFF));
    }
}
