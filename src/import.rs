// 📂 Catalog import - CSV → Art → Gallery
//
// Expected header: name,art_type,artist_name,creation_date,price
// Empty creation_date defaults to today; empty price means not for sale.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::entities::art::{Art, ArtDraft, ArtType};
use crate::gallery::Gallery;

/// One raw CSV row, every cell as text
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    art_type: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    creation_date: String,
    #[serde(default)]
    price: String,
}

impl CatalogRow {
    fn into_draft(self) -> Result<ArtDraft> {
        let art_type = non_empty(&self.art_type)
            .map(ArtType::from_str)
            .transpose()?;
        let creation_date = non_empty(&self.creation_date)
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("Invalid creation_date '{}' (expected YYYY-MM-DD)", s))
            })
            .transpose()?;
        let price = non_empty(&self.price)
            .map(|s| Decimal::from_str(s).with_context(|| format!("Invalid price '{}'", s)))
            .transpose()?;

        Ok(ArtDraft {
            name: Some(self.name),
            art_type,
            artist_name: Some(self.artist_name),
            creation_date,
            price,
        })
    }
}

fn non_empty(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
}

/// Load every row of a catalog file
pub fn load_csv(csv_path: &Path) -> Result<Vec<Art>> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open catalog {}", csv_path.display()))?;
    read_csv(file).with_context(|| format!("Failed to load catalog {}", csv_path.display()))
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Art>> {
    read_csv_as_of(reader, SystemClock.today())
}

/// Parse catalog rows; rows without a creation date get `today`.
///
/// Stops at the first bad row, naming its 1-based position.
pub fn read_csv_as_of<R: Read>(reader: R, today: NaiveDate) -> Result<Vec<Art>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut arts = Vec::new();
    for (index, result) in rdr.deserialize::<CatalogRow>().enumerate() {
        let row_number = index + 1;
        let row = result.with_context(|| format!("Failed to read catalog row {}", row_number))?;
        let art = row
            .into_draft()
            .and_then(|draft| draft.build_as_of(today).map_err(anyhow::Error::from))
            .with_context(|| format!("Invalid catalog row {}", row_number))?;
        arts.push(art);
    }

    Ok(arts)
}

/// Add every piece to the gallery, counting duplicates instead of failing
pub fn seed<C: Clock>(gallery: &Gallery<C>, arts: impl IntoIterator<Item = Art>) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for art in arts {
        let label = format!("{} by {}", art.name(), art.artist_name());
        if gallery.add_art(art) {
            summary.added += 1;
        } else {
            warn!(art = %label, "duplicate catalog entry skipped");
            summary.duplicates += 1;
        }
    }

    info!(added = summary.added, duplicates = summary.duplicates, "catalog seeded");
    summary
}
