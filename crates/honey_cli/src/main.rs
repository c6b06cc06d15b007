use std::path::PathBuf;
use std::process;

use clap::Parser;
use honey_core::core_api::{Engine, PRESET_VALUES, SaveReport, Snapshot};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE.BMGSave")]
    path: PathBuf,
    /// New honey value to write; a backup is taken before the first write.
    /// Negative values are accepted and clamped to zero.
    #[arg(
        long,
        value_name = "VALUE",
        allow_hyphen_values = true,
        conflicts_with = "preset"
    )]
    set: Option<String>,
    /// One of the quick-set values: 10000, 50000, 100000, 999999, 9999999.
    #[arg(long, value_name = "VALUE", value_parser = parse_preset)]
    preset: Option<u32>,
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let engine = Engine::new();
    let mut session = engine.load(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {e}", cli.path.display());
        process::exit(1);
    });

    if cli.set.is_none() && cli.preset.is_none() {
        print_snapshot(&session.snapshot(), cli.json);
        return;
    }

    if let Some(text) = cli.set.as_deref() {
        let staged = session.stage_text(text).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(2);
        });
        if staged.clamped {
            eprintln!("Warning: honey value cannot be negative, writing 0");
        }
    } else if let Some(value) = cli.preset {
        session.stage(value);
    }

    let report = session.save().unwrap_or_else(|e| {
        eprintln!("Error saving {}: {e}", cli.path.display());
        process::exit(1);
    });
    print_report(&report, cli.json);
}

fn print_snapshot(snapshot: &Snapshot, json: bool) {
    if json {
        print_json(snapshot);
        return;
    }
    println!(
        "{}: {} honey ({} bytes)",
        snapshot.file_name,
        format_number_with_commas(snapshot.honey),
        snapshot.file_len
    );
}

fn print_report(report: &SaveReport, json: bool) {
    if json {
        print_json(report);
        return;
    }
    println!(
        "Honey updated: {} -> {}",
        format_number_with_commas(report.previous),
        format_number_with_commas(report.new)
    );
    if report.backup_created {
        println!("Backup written to {}", report.backup_path.display());
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn parse_preset(value: &str) -> Result<u32, String> {
    let parsed: u32 = value
        .parse()
        .map_err(|_| format!("invalid preset '{value}'"))?;
    if PRESET_VALUES.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "'{value}' is not a preset, expected one of: {}",
            PRESET_VALUES
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

fn format_number_with_commas(n: u32) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_group_from_the_right() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(999), "999");
        assert_eq!(format_number_with_commas(10_000), "10,000");
        assert_eq!(format_number_with_commas(9_999_999), "9,999,999");
    }

    #[test]
    fn preset_parser_accepts_only_known_values() {
        assert_eq!(parse_preset("999999"), Ok(999_999));
        assert!(parse_preset("123").is_err());
        assert!(parse_preset("honey").is_err());
    }
}
