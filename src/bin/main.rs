use std::path::PathBuf;

use clap::{
    Parser,
    ValueEnum,
};
use tracing_subscriber::EnvFilter;
use zephyr_nvs_gen::{
    entries_from_csv_file,
    EntryLayout,
    ImageConfig,
    SettingsEntry,
    SettingsImage,
};

#[derive(Parser)]
#[command(name = "zephyr-nvs-gen")]
#[command(about = "Generate NVS settings for Zephyr with NVS backend", long_about = None)]
struct Cli {
    /// NVS sector count
    #[arg(long, default_value = "8", value_parser = parse_usize)]
    sector_count: usize,

    /// Base address of the image in flash, used for Intel HEX output
    #[arg(long, default_value = "0xf8000", value_parser = parse_u32)]
    offset: u32,

    /// Flash sector size in bytes
    #[arg(long, default_value = "4096", value_parser = parse_usize)]
    sector_size: usize,

    /// Settings entry as NAME=HEX, may be given multiple times
    #[arg(long = "entry", value_name = "NAME=HEX", value_parser = parse_entry)]
    entries: Vec<SettingsEntry>,

    /// CSV file with `name,value` columns, appended after --entry values
    #[arg(long)]
    entries_file: Option<PathBuf>,

    /// Encode every entry instead of only the first one
    #[arg(long)]
    all_entries: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Output file path (default: nvs_generated.hex or nvs_generated.bin)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Intel HEX placed at --offset
    Hex,
    /// Raw image bytes
    Bin,
}

impl Format {
    fn default_output(self) -> PathBuf {
        match self {
            Self::Hex => PathBuf::from("nvs_generated.hex"),
            Self::Bin => PathBuf::from("nvs_generated.bin"),
        }
    }
}

fn parse_u64(s: &str) -> Result<u64, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u64>().map_err(|e| e.to_string())
    }
}

fn parse_usize(s: &str) -> Result<usize, String> {
    usize::try_from(parse_u64(s)?).map_err(|e| e.to_string())
}

fn parse_u32(s: &str) -> Result<u32, String> {
    u32::try_from(parse_u64(s)?).map_err(|e| e.to_string())
}

fn parse_entry(s: &str) -> Result<SettingsEntry, String> {
    s.parse::<SettingsEntry>().map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut entries = cli.entries;
    if let Some(path) = &cli.entries_file {
        println!("Parsing entries file: {}", path.display());
        entries.extend(entries_from_csv_file(path)?);
    }

    println!("sector_count: {}", cli.sector_count);
    println!("offset: {:#x}", cli.offset);

    let config = ImageConfig {
        sector_count: cli.sector_count,
        sector_size: cli.sector_size,
        offset: cli.offset,
        layout: if cli.all_entries {
            EntryLayout::All
        } else {
            EntryLayout::FirstOnly
        },
    };

    let mut image = SettingsImage::new(config)?;
    image.generate(&entries)?;

    let output = cli.output.unwrap_or_else(|| cli.format.default_output());
    match cli.format {
        Format::Hex => image.to_ihex_file(&output)?,
        Format::Bin => image.to_bin_file(&output)?,
    }

    println!("Successfully generated NVS image: {}", output.display());
    println!(
        "Size: {} bytes ({} sectors)",
        image.data().len(),
        image.config().sector_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["zephyr-nvs-gen"]).unwrap();
        assert_eq!(cli.sector_count, 8);
        assert_eq!(cli.offset, 0xF8000);
        assert_eq!(cli.sector_size, 4096);
        assert!(cli.entries.is_empty());
        assert!(!cli.all_entries);
    }

    #[test]
    fn hex_and_decimal_integers() {
        let cli = Cli::try_parse_from([
            "zephyr-nvs-gen",
            "--sector-count",
            "0X10",
            "--offset",
            "1015808",
            "--sector-size",
            "0x1000",
        ])
        .unwrap();
        assert_eq!(cli.sector_count, 16);
        assert_eq!(cli.offset, 0xF8000);
        assert_eq!(cli.sector_size, 4096);
    }

    #[test]
    fn entries_keep_command_line_order() {
        let cli = Cli::try_parse_from([
            "zephyr-nvs-gen",
            "--entry",
            "b=01",
            "--entry",
            "a=02",
        ])
        .unwrap();
        let names: Vec<&str> = cli.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(cli.entries[0].value, [0x01]);
        assert_eq!(cli.entries[1].value, [0x02]);
    }

    #[test]
    fn rejects_malformed_integers() {
        for offset in ["0x", "0x100000000", "-1", "abc"] {
            let result = Cli::try_parse_from(["zephyr-nvs-gen", "--offset", offset]);
            assert!(result.is_err(), "accepted --offset {offset}");
        }
    }

    #[test]
    fn rejects_malformed_entry() {
        assert!(Cli::try_parse_from(["zephyr-nvs-gen", "--entry", "foo=xyz"]).is_err());
        assert!(Cli::try_parse_from(["zephyr-nvs-gen", "--entry", "foo"]).is_err());
    }
}
