// 🏛️ Gallery - In-memory catalog of unique art pieces
//
// One RwLock around the backing collection: queries take the shared lock,
// add/delete take the exclusive lock, and every operation holds it for
// exactly one critical section.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::GalleryConfig;
use crate::entities::art::Art;
use crate::error::{GalleryError, Result};

// ============================================================================
// PRICE RANGE
// ============================================================================

/// Inclusive price bounds, either side optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl PriceRange {
    /// Fails when both bounds are given and `min > max`
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(GalleryError::InvalidPriceRange { min, max });
            }
        }
        Ok(PriceRange { min, max })
    }

    pub fn min(&self) -> Option<Decimal> {
        self.min
    }

    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Read-only copy of the gallery contents at the moment it was taken.
///
/// Owns its own storage, so later gallery mutations never show up here, and
/// it has no mutating methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtSnapshot {
    arts: Arc<[Art]>,
}

impl ArtSnapshot {
    pub fn len(&self) -> usize {
        self.arts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arts.is_empty()
    }

    pub fn contains(&self, art: &Art) -> bool {
        self.arts.contains(art)
    }

    /// Pieces in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Art> {
        self.arts.iter()
    }

    pub fn to_vec(&self) -> Vec<Art> {
        self.arts.to_vec()
    }
}

impl<'a> IntoIterator for &'a ArtSnapshot {
    type Item = &'a Art;
    type IntoIter = std::slice::Iter<'a, Art>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// DISPLAY ORDER
// ============================================================================

/// Listing order: artist, then name, then art type
pub fn display_order(a: &Art, b: &Art) -> Ordering {
    a.artist_name()
        .cmp(b.artist_name())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.art_type().cmp(&b.art_type()))
}

/// Sort query results into a stable listing order
pub fn sort_for_display(arts: &mut [Art]) {
    arts.sort_by(display_order);
}

// ============================================================================
// STORE
// ============================================================================

/// Backing set: each piece maps to its insertion sequence number, so
/// membership checks are O(1) and snapshots can still replay insertion order.
#[derive(Debug, Default)]
struct ArtStore {
    entries: HashMap<Art, u64>,
    next_seq: u64,
}

impl ArtStore {
    fn insert(&mut self, art: Art) -> bool {
        if self.entries.contains_key(&art) {
            return false;
        }
        self.entries.insert(art, self.next_seq);
        self.next_seq += 1;
        true
    }

    fn remove(&mut self, art: &Art) -> bool {
        self.entries.remove(art).is_some()
    }

    fn iter(&self) -> impl Iterator<Item = &Art> {
        self.entries.keys()
    }

    fn in_insertion_order(&self) -> Vec<Art> {
        let mut ordered: Vec<(&Art, u64)> = self.entries.iter().map(|(art, seq)| (art, *seq)).collect();
        ordered.sort_unstable_by_key(|(_, seq)| *seq);
        ordered.into_iter().map(|(art, _)| art.clone()).collect()
    }
}

// ============================================================================
// GALLERY
// ============================================================================

/// The gallery service.
///
/// Holds pieces unique under `Art` equality (name, type, artist), in
/// insertion order. Every method takes `&self`; share it across threads with
/// `Arc<Gallery>`.
pub struct Gallery<C: Clock = SystemClock> {
    arts: RwLock<ArtStore>,
    config: GalleryConfig,
    clock: C,
}

impl Gallery<SystemClock> {
    /// Empty gallery with default config and the system clock
    pub fn new() -> Self {
        Self::with_config(GalleryConfig::default())
    }

    pub fn with_config(config: GalleryConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Gallery<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Gallery<C> {
    pub fn with_clock(config: GalleryConfig, clock: C) -> Self {
        Gallery {
            arts: RwLock::new(ArtStore::default()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    // A panic while holding the lock cannot leave a half-applied operation:
    // each critical section is a single insert, remove or read.
    fn read(&self) -> RwLockReadGuard<'_, ArtStore> {
        self.arts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ArtStore> {
        self.arts.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // MUTATIONS
    // ------------------------------------------------------------------------

    /// Add a piece. Returns `false` for `None` or when an equal piece is
    /// already present; the gallery is left unchanged in both cases.
    pub fn add_art(&self, art: impl Into<Option<Art>>) -> bool {
        let art: Option<Art> = art.into();
        let Some(art) = art else {
            debug!("add_art called without a piece");
            return false;
        };

        let name = art.name().to_string();
        let artist = art.artist_name().to_string();
        let inserted = self.write().insert(art);
        if inserted {
            debug!(%name, %artist, inserted, "art added");
        } else {
            debug!(%name, %artist, inserted, "duplicate art rejected");
        }
        inserted
    }

    /// Remove the piece equal to `art`. Returns `false` for `None` or when
    /// no equal piece is stored.
    pub fn delete_art<'a>(&self, art: impl Into<Option<&'a Art>>) -> bool {
        let art: Option<&Art> = art.into();
        let Some(art) = art else {
            debug!("delete_art called without a piece");
            return false;
        };

        let removed = self.write().remove(art);
        if removed {
            debug!(name = %art.name(), artist = %art.artist_name(), removed, "art deleted");
        } else {
            debug!(name = %art.name(), artist = %art.artist_name(), removed, "art not in gallery");
        }
        removed
    }

    // ------------------------------------------------------------------------
    // QUERIES
    // ------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    pub fn contains(&self, art: &Art) -> bool {
        self.read().entries.contains_key(art)
    }

    /// Copy of everything currently stored, in insertion order
    pub fn get_all_art(&self) -> ArtSnapshot {
        let arts: Arc<[Art]> = self.read().in_insertion_order().into();
        ArtSnapshot { arts }
    }

    /// Distinct artist names, ascending
    pub fn get_artists(&self) -> Vec<String> {
        let artists: BTreeSet<String> = self
            .read()
            .iter()
            .map(|art| art.artist_name().to_string())
            .collect();
        artists.into_iter().collect()
    }

    /// Pieces whose artist name equals `artist_name` exactly (case-sensitive)
    pub fn get_art_by_artist(&self, artist_name: &str) -> HashSet<Art> {
        let found = self.filter(|art| art.artist_name() == artist_name);
        debug!(artist = %artist_name, count = found.len(), "art by artist");
        found
    }

    /// Pieces created inside the recency window ending today.
    ///
    /// A piece is recent when `0 <= today - creation_date < recent_window_days`
    /// days. "Today" is read from the clock on every call.
    pub fn get_recent_art(&self) -> HashSet<Art> {
        let today = self.clock.today();
        let window = i64::from(self.config.recent_window_days);

        let found = self.filter(|art| {
            let elapsed = (today - art.creation_date()).num_days();
            (0..window).contains(&elapsed)
        });
        debug!(%today, window_days = window, count = found.len(), "recent art");
        found
    }

    /// Priced pieces with `min <= price <= max`; either bound may be omitted.
    ///
    /// Unpriced pieces are never returned. With no bounds at all, every priced
    /// piece is returned. Fails with [`GalleryError::InvalidPriceRange`] when
    /// `min > max`, before looking at any piece.
    pub fn get_art_by_price(&self, min: Option<Decimal>, max: Option<Decimal>) -> Result<HashSet<Art>> {
        let range = PriceRange::new(min, max)?;
        Ok(self.get_art_in_range(&range))
    }

    pub fn get_art_in_range(&self, range: &PriceRange) -> HashSet<Art> {
        let found = self.filter(|art| art.price().is_some_and(|price| range.contains(price)));
        debug!(min = ?range.min(), max = ?range.max(), count = found.len(), "art by price");
        found
    }

    fn filter<F>(&self, predicate: F) -> HashSet<Art>
    where
        F: Fn(&Art) -> bool,
    {
        self.read()
            .iter()
            .filter(|art| predicate(art))
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::entities::art::{ArtDraft, ArtType};
    use chrono::{Days, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn art(name: &str, art_type: ArtType, artist: &str) -> Art {
        ArtDraft::new(name, art_type, artist)
            .created_on(date(1600, 2, 23))
            .build()
            .unwrap()
    }

    fn priced(name: &str, artist: &str, price: i64) -> Art {
        ArtDraft::new(name, ArtType::Sculpture, artist)
            .created_on(date(1600, 2, 23))
            .priced(dec(price))
            .build()
            .unwrap()
    }

    fn mona_lisa() -> Art {
        art("Mona Lisa", ArtType::Painting, "Leonard Di Vinci")
    }

    fn nefertiti() -> Art {
        art("Bust of Nefertiti", ArtType::Sculpture, "Thutmose")
    }

    #[test]
    fn test_add_art_none() {
        let gallery = Gallery::new();

        assert!(!gallery.add_art(None));
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_add_art() {
        let gallery = Gallery::new();

        assert!(gallery.add_art(mona_lisa()));
        assert_eq!(gallery.len(), 1);
        assert!(gallery.contains(&mona_lisa()));
    }

    #[test]
    fn test_add_art_same_content_twice() {
        let gallery = Gallery::new();
        let later_copy = ArtDraft::new("Mona Lisa", ArtType::Painting, "Leonard Di Vinci")
            .created_on(date(1923, 2, 12))
            .priced(dec(100))
            .build()
            .unwrap();

        assert!(gallery.add_art(mona_lisa()));
        assert!(!gallery.add_art(mona_lisa()));
        assert!(!gallery.add_art(later_copy));
        assert_eq!(gallery.len(), 1);

        // The first stored value wins
        let stored = gallery.get_all_art();
        assert_eq!(stored.iter().next().unwrap().price(), None);
    }

    #[test]
    fn test_delete_art_none() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());

        assert!(!gallery.delete_art(None));
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_delete_art_empty_gallery() {
        let gallery = Gallery::new();
        assert!(!gallery.delete_art(&mona_lisa()));
    }

    #[test]
    fn test_delete_art_present() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());

        assert!(gallery.delete_art(&mona_lisa()));
        assert!(gallery.is_empty());
        assert!(!gallery.delete_art(&mona_lisa()));
    }

    #[test]
    fn test_delete_art_absent() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());

        assert!(!gallery.delete_art(&nefertiti()));
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_delete_art_only_date_differs() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());
        gallery.add_art(nefertiti());

        let other_date = ArtDraft::new("Mona Lisa", ArtType::Painting, "Leonard Di Vinci")
            .created_on(date(1923, 2, 12))
            .build()
            .unwrap();

        assert!(gallery.delete_art(&other_date));
        assert_eq!(gallery.len(), 1);
        assert!(gallery.contains(&nefertiti()));
    }

    #[test]
    fn test_get_all_art() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());
        gallery.add_art(nefertiti());

        let arts = gallery.get_all_art();
        assert_eq!(arts.len(), 2);
        assert!(arts.contains(&mona_lisa()));
        assert!(arts.contains(&nefertiti()));

        let order: Vec<&str> = arts.iter().map(|a| a.name()).collect();
        assert_eq!(order, vec!["Mona Lisa", "Bust of Nefertiti"]);
    }

    #[test]
    fn test_get_all_art_snapshot_is_frozen() {
        let gallery = Gallery::new();
        gallery.add_art(mona_lisa());
        gallery.add_art(nefertiti());

        let arts = gallery.get_all_art();
        assert!(gallery.delete_art(&mona_lisa()));
        gallery.add_art(art("David", ArtType::Sculpture, "Michelangelo"));
        gallery.add_art(art("Guernica", ArtType::Painting, "Picasso"));

        assert_eq!(arts.len(), 2);
        assert!(arts.contains(&mona_lisa()));
        assert_eq!(gallery.get_all_art().len(), 3);
    }

    #[test]
    fn test_get_artists_sorted_unique() {
        let gallery = Gallery::new();
        gallery.add_art(art("Bust of Nefertiti", ArtType::Sculpture, "cde"));
        gallery.add_art(art("Bust of Nefertiti", ArtType::Sculpture, "bcd"));
        gallery.add_art(art("Mona Lisa", ArtType::Painting, "Abc"));
        gallery.add_art(art("Bust of Nefertiti", ArtType::Sculpture, "bbc"));
        gallery.add_art(art("Duplicates of life", ArtType::Sculpture, "bbc"));

        assert_eq!(gallery.get_artists(), vec!["Abc", "bbc", "bcd", "cde"]);
    }

    #[test]
    fn test_get_artists_empty() {
        assert!(Gallery::new().get_artists().is_empty());
    }

    #[test]
    fn test_get_art_by_artist() {
        let gallery = Gallery::new();
        let one = art("Bust of Nefertiti", ArtType::Sculpture, "Thutmose");
        let two = art("Bust of Nefertiti Version 2", ArtType::Sculpture, "Thutmose");
        let three = mona_lisa();
        let four = art("Faux Bust of Nefertiti", ArtType::Sculpture, "Elton John");
        for piece in [&one, &two, &three, &four] {
            gallery.add_art(piece.clone());
        }

        let thutmose = gallery.get_art_by_artist("Thutmose");
        assert_eq!(thutmose.len(), 2);
        assert!(thutmose.contains(&one));
        assert!(thutmose.contains(&two));

        let leonardo = gallery.get_art_by_artist("Leonard Di Vinci");
        assert_eq!(leonardo.len(), 1);
        assert!(leonardo.contains(&three));

        assert!(gallery.get_art_by_artist("thutmose").is_empty());
        assert!(gallery.get_art_by_artist("Nobody").is_empty());
    }

    #[test]
    fn test_get_recent_art_window_edges() {
        let today = date(2024, 3, 1);
        let gallery = Gallery::with_clock(GalleryConfig::default(), FixedClock(today));
        let aged = |name: &str, days: u64| {
            ArtDraft::new(name, ArtType::Painting, "Someone")
                .created_on(today.checked_sub_days(Days::new(days)).unwrap())
                .build()
                .unwrap()
        };

        gallery.add_art(aged("today", 0));
        gallery.add_art(aged("36 days", 36));
        gallery.add_art(aged("364 days", 364));
        gallery.add_art(aged("365 days", 365));
        gallery.add_art(mona_lisa());
        gallery.add_art(
            ArtDraft::new("tomorrow", ArtType::Painting, "Someone")
                .created_on(today.checked_add_days(Days::new(1)).unwrap())
                .build()
                .unwrap(),
        );

        let mut names: Vec<String> = gallery
            .get_recent_art()
            .into_iter()
            .map(|a| a.name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["36 days", "364 days", "today"]);
    }

    #[test]
    fn test_get_recent_art_reads_clock_each_call() {
        struct SteppingClock(std::sync::Mutex<NaiveDate>);
        impl Clock for SteppingClock {
            fn today(&self) -> NaiveDate {
                let mut current = self.0.lock().unwrap();
                let today = *current;
                *current = today.checked_add_days(Days::new(200)).unwrap();
                today
            }
        }

        let start = date(2024, 1, 1);
        let gallery = Gallery::with_clock(
            GalleryConfig::default(),
            SteppingClock(std::sync::Mutex::new(start)),
        );
        gallery.add_art(
            ArtDraft::new("fresh", ArtType::Print, "Someone")
                .created_on(start)
                .build()
                .unwrap(),
        );

        assert_eq!(gallery.get_recent_art().len(), 1); // day 0
        assert_eq!(gallery.get_recent_art().len(), 1); // day 200
        assert!(gallery.get_recent_art().is_empty()); // day 400
    }

    #[test]
    fn test_get_recent_art_custom_window() {
        let today = date(2024, 3, 1);
        let config = GalleryConfig {
            recent_window_days: 30,
        };
        let gallery = Gallery::with_clock(config, FixedClock(today));
        gallery.add_art(
            ArtDraft::new("29 days", ArtType::Drawing, "Someone")
                .created_on(today.checked_sub_days(Days::new(29)).unwrap())
                .build()
                .unwrap(),
        );
        gallery.add_art(
            ArtDraft::new("30 days", ArtType::Drawing, "Someone")
                .created_on(today.checked_sub_days(Days::new(30)).unwrap())
                .build()
                .unwrap(),
        );

        let recent = gallery.get_recent_art();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.into_iter().next().unwrap().name(), "29 days");
    }

    fn price_gallery() -> (Gallery, [Art; 6]) {
        let gallery = Gallery::new();
        let pieces = [
            priced("Bust of Nefertiti", "Thutmose", 1_500_000),
            priced("Bust of Nefertiti Version 2", "Thutmose", 15_000),
            mona_lisa(),
            priced("Faux Bust of Nefertiti", "Elton John", 1_000),
            priced("Faux Bust of Nefertiti Version 2", "Elton John", 10_000),
            priced("Bust of Nefertiti Version 3", "Thutmose", 20_000),
        ];
        for piece in &pieces {
            gallery.add_art(piece.clone());
        }
        (gallery, pieces)
    }

    #[test]
    fn test_get_art_by_price_no_min() {
        let (gallery, p) = price_gallery();

        let found = gallery.get_art_by_price(None, Some(dec(15_000))).unwrap();
        assert_eq!(found, HashSet::from([p[1].clone(), p[3].clone(), p[4].clone()]));
    }

    #[test]
    fn test_get_art_by_price_no_max() {
        let (gallery, p) = price_gallery();

        let found = gallery.get_art_by_price(Some(dec(15_000)), None).unwrap();
        assert_eq!(found, HashSet::from([p[0].clone(), p[1].clone(), p[5].clone()]));
    }

    #[test]
    fn test_get_art_by_price_bounds_inclusive() {
        let (gallery, p) = price_gallery();

        let found = gallery
            .get_art_by_price(Some(dec(10_000)), Some(dec(20_000)))
            .unwrap();
        assert_eq!(found, HashSet::from([p[1].clone(), p[4].clone(), p[5].clone()]));
    }

    #[test]
    fn test_get_art_by_price_no_bounds_returns_all_priced() {
        let (gallery, p) = price_gallery();

        let found = gallery.get_art_by_price(None, None).unwrap();
        assert_eq!(found.len(), 5);
        assert!(!found.contains(&p[2]));
    }

    #[test]
    fn test_get_art_by_price_equal_bounds() {
        let (gallery, p) = price_gallery();

        let found = gallery
            .get_art_by_price(Some(dec(10_000)), Some(dec(10_000)))
            .unwrap();
        assert_eq!(found, HashSet::from([p[4].clone()]));
    }

    #[test]
    fn test_get_art_by_price_invalid_range() {
        let (gallery, _) = price_gallery();

        let err = gallery
            .get_art_by_price(Some(dec(20_000)), Some(dec(10_000)))
            .unwrap_err();
        assert_eq!(
            err,
            GalleryError::InvalidPriceRange {
                min: dec(20_000),
                max: dec(10_000)
            }
        );
        assert!(err.to_string().contains("given min 20000, max 10000"));
    }

    #[test]
    fn test_get_all_art_keeps_insertion_order_across_deletes() {
        let gallery = Gallery::new();
        let david = art("David", ArtType::Sculpture, "Michelangelo");
        gallery.add_art(mona_lisa());
        gallery.add_art(nefertiti());
        gallery.add_art(david.clone());

        assert!(gallery.delete_art(&nefertiti()));
        gallery.add_art(nefertiti());

        let order: Vec<String> = gallery
            .get_all_art()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(order, vec!["Mona Lisa", "David", "Bust of Nefertiti"]);
    }

    #[test]
    fn test_add_and_delete_many() {
        let gallery = Gallery::new();
        for i in 0..2_000 {
            assert!(gallery.add_art(art(&format!("Study {}", i), ArtType::Drawing, "Workshop")));
        }
        assert!(!gallery.add_art(art("Study 1999", ArtType::Drawing, "Workshop")));
        assert_eq!(gallery.len(), 2_000);

        for i in (0..2_000).step_by(2) {
            assert!(gallery.delete_art(&art(&format!("Study {}", i), ArtType::Drawing, "Workshop")));
        }
        assert_eq!(gallery.len(), 1_000);
        assert_eq!(gallery.get_all_art().iter().next().unwrap().name(), "Study 1");
    }

    #[test]
    fn test_sort_for_display() {
        let mut arts = vec![
            art("Zebra", ArtType::Painting, "bbc"),
            art("Apple", ArtType::Print, "cde"),
            art("Mango", ArtType::Sculpture, "Abc"),
            art("Apple", ArtType::Painting, "bbc"),
            art("Apple", ArtType::Drawing, "bbc"),
        ];

        sort_for_display(&mut arts);

        let listed: Vec<(&str, &str, ArtType)> = arts
            .iter()
            .map(|a| (a.artist_name(), a.name(), a.art_type()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("Abc", "Mango", ArtType::Sculpture),
                ("bbc", "Apple", ArtType::Painting),
                ("bbc", "Apple", ArtType::Drawing),
                ("bbc", "Zebra", ArtType::Painting),
                ("cde", "Apple", ArtType::Print),
            ]
        );
    }

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange::new(Some(dec(5)), Some(dec(10))).unwrap();
        assert!(range.contains(dec(5)));
        assert!(range.contains(dec(10)));
        assert!(!range.contains(dec(4)));
        assert!(!range.contains(dec(11)));

        let open = PriceRange::default();
        assert!(open.contains(dec(-1)));
    }
}
