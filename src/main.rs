use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use art_gallery::{import, sort_for_display, Art, Gallery, GalleryConfig};

/// Query an art catalog
#[derive(Debug, Parser)]
#[command(name = "art-gallery", version, about)]
struct Cli {
    /// Gallery config (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Catalog CSV (name,art_type,artist_name,creation_date,price)
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every piece
    All,
    /// Artist names, sorted and deduplicated
    Artists,
    /// Pieces by one artist (exact, case-sensitive)
    ByArtist { name: String },
    /// Pieces created inside the recency window
    Recent,
    /// Priced pieces within inclusive bounds
    ByPrice {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<Decimal>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<Decimal>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };

    let gallery = Gallery::with_config(config);
    let arts = import::load_csv(&cli.catalog)?;
    let summary = import::seed(&gallery, arts);
    info!(
        catalog = %cli.catalog.display(),
        added = summary.added,
        duplicates = summary.duplicates,
        "catalog loaded"
    );

    match cli.command {
        Command::Artists => print_artists(&gallery.get_artists(), cli.json),
        Command::All => print_arts(gallery.get_all_art().to_vec(), cli.json),
        Command::ByArtist { name } => {
            print_arts(gallery.get_art_by_artist(&name).into_iter().collect(), cli.json)
        }
        Command::Recent => print_arts(gallery.get_recent_art().into_iter().collect(), cli.json),
        Command::ByPrice { min, max } => {
            let found = gallery.get_art_by_price(min, max)?;
            print_arts(found.into_iter().collect(), cli.json)
        }
    }
}

fn print_artists(artists: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(artists)?);
    } else {
        for artist in artists {
            println!("{}", artist);
        }
    }
    Ok(())
}

fn print_arts(mut arts: Vec<Art>, json: bool) -> Result<()> {
    sort_for_display(&mut arts);

    if json {
        println!("{}", serde_json::to_string_pretty(&arts)?);
    } else if arts.is_empty() {
        eprintln!("No matching art");
    } else {
        for art in &arts {
            println!("{}", art);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_price(args: &[&str]) -> (Option<Decimal>, Option<Decimal>) {
        let argv = ["art-gallery", "catalog.csv", "by-price"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::ByPrice { min, max } => (min, max),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_by_price_bounds() {
        assert_eq!(
            by_price(&["--min", "10000", "--max", "20000"]),
            (Some(Decimal::from(10_000)), Some(Decimal::from(20_000)))
        );
        assert_eq!(by_price(&[]), (None, None));
    }

    #[test]
    fn test_cli_by_price_negative_bounds() {
        assert_eq!(
            by_price(&["--min", "-5", "--max", "-1.5"]),
            (Some(Decimal::from(-5)), Some(Decimal::new(-15, 1)))
        );
    }

    #[test]
    fn test_cli_rejects_unparseable_bound() {
        let argv = ["art-gallery", "catalog.csv", "by-price", "--min", "cheap"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
