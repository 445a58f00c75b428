// 🏛️ Catalog Store - read-only venue listings
// Venues are seeded once (embedded JSON or a file) and never mutated afterwards.

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Seed catalog shipped with the binary
const SEED_VENUES: &str = include_str!("../data/venues.json");

// ============================================================================
// VENUE TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    Palace,
    Banquet,
    Outdoor,
    Marquee,
    Destination,
}

impl VenueType {
    /// Order used by the home page category buttons
    pub const ALL: [VenueType; 5] = [
        VenueType::Banquet,
        VenueType::Marquee,
        VenueType::Outdoor,
        VenueType::Palace,
        VenueType::Destination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueType::Palace => "Palace",
            VenueType::Banquet => "Banquet",
            VenueType::Outdoor => "Outdoor",
            VenueType::Marquee => "Marquee",
            VenueType::Destination => "Destination",
        }
    }
}

// ============================================================================
// VENUE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,

    /// 0.0 - 5.0
    pub rating: f64,

    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A bookable wedding hall listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub area: String,
    pub city: String,
    pub venue_type: VenueType,
    pub capacity: Capacity,

    /// Flat price for one event, in rupees
    pub price_per_event: u64,

    /// Aggregate rating (0.0 - 5.0)
    pub rating: f64,

    #[serde(default)]
    pub reviews: Vec<Review>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub facilities: Vec<String>,

    pub location: GeoPoint,
}

impl Venue {
    pub fn has_facility(&self, facility: &str) -> bool {
        self.facilities.iter().any(|f| f == facility)
    }

    /// Case-insensitive substring match over name, city and area
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.city.to_lowercase().contains(&term)
            || self.area.to_lowercase().contains(&term)
    }

    pub fn fits_guests(&self, guests: u32) -> bool {
        guests >= self.capacity.min && guests <= self.capacity.max
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    venues: Vec<Venue>,
}

impl Catalog {
    /// Load the embedded seed catalog
    pub fn seed() -> Result<Self> {
        Catalog::from_json(SEED_VENUES).context("Failed to parse embedded seed catalog")
    }

    /// Load a catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;

        Catalog::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let venues: Vec<Venue> =
            serde_json::from_str(content).context("Failed to parse catalog JSON")?;

        Catalog::from_venues(venues)
    }

    /// Build a catalog, rejecting malformed records
    pub fn from_venues(venues: Vec<Venue>) -> Result<Self> {
        let mut seen = HashSet::new();

        for venue in &venues {
            if !seen.insert(venue.id) {
                bail!("Duplicate venue id: {}", venue.id);
            }
            if venue.capacity.min > venue.capacity.max {
                bail!(
                    "Venue {} has capacity min {} above max {}",
                    venue.id,
                    venue.capacity.min,
                    venue.capacity.max
                );
            }
            if !(0.0..=5.0).contains(&venue.rating) {
                bail!("Venue {} has rating {} outside 0-5", venue.id, venue.rating);
            }
        }

        Ok(Catalog { venues })
    }

    pub fn all(&self) -> Vec<&Venue> {
        self.venues.iter().collect()
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    /// Venues whose name, city or area contain `term` (case-insensitive)
    pub fn search(&self, term: &str) -> Vec<&Venue> {
        self.venues.iter().filter(|v| v.matches_term(term)).collect()
    }

    pub fn by_type(&self, venue_type: VenueType) -> Vec<&Venue> {
        self.venues
            .iter()
            .filter(|v| v.venue_type == venue_type)
            .collect()
    }

    /// Venues in a city (case-insensitive exact match)
    pub fn by_city(&self, city: &str) -> Vec<&Venue> {
        let city = city.to_lowercase();
        self.venues
            .iter()
            .filter(|v| v.city.to_lowercase() == city)
            .collect()
    }

    /// First `count` venues, shown on the home page
    pub fn featured(&self, count: usize) -> Vec<&Venue> {
        self.venues.iter().take(count).collect()
    }

    /// Resolve ids to venues in catalog order, skipping unknown ids
    pub fn resolve<I>(&self, ids: I) -> Vec<&Venue>
    where
        I: IntoIterator<Item = u32>,
    {
        let wanted: HashSet<u32> = ids.into_iter().collect();
        self.venues.iter().filter(|v| wanted.contains(&v.id)).collect()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Minimal venue for tests elsewhere in the crate
    pub(crate) fn venue(id: u32, city: &str, venue_type: VenueType, price: u64, rating: f64) -> Venue {
        Venue {
            id,
            name: format!("Hall {}", id),
            address: "1 Test Road".to_string(),
            area: "Centre".to_string(),
            city: city.to_string(),
            venue_type,
            capacity: Capacity { min: 100, max: 500 },
            price_per_event: price,
            rating,
            reviews: Vec::new(),
            images: Vec::new(),
            facilities: Vec::new(),
            location: GeoPoint { lat: 0.0, lng: 0.0 },
        }
    }

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = Catalog::seed().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.find_by_id(1).is_some());
        assert!(catalog.find_by_id(3).is_some());
    }

    #[test]
    fn test_search_matches_name_city_and_area() {
        let catalog = Catalog::seed().unwrap();

        let by_city = catalog.search("karachi");
        assert!(!by_city.is_empty());
        assert!(by_city.iter().all(|v| v.city == "Karachi"));

        let by_area = catalog.search("GULBERG");
        assert_eq!(by_area.len(), 1);
        assert_eq!(by_area[0].id, 1);

        let by_name = catalog.search("falet");
        assert_eq!(by_name[0].name, "Faletti's Grand Ballroom");
    }

    #[test]
    fn test_by_city_is_case_insensitive() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.by_city("lahore").len(), catalog.by_city("LAHORE").len());
        assert!(catalog.by_city("Quetta").is_empty());
    }

    #[test]
    fn test_by_type() {
        let catalog = Catalog::seed().unwrap();
        let marquees = catalog.by_type(VenueType::Marquee);
        assert!(marquees.iter().all(|v| v.venue_type == VenueType::Marquee));
        assert!(!marquees.is_empty());
    }

    #[test]
    fn test_featured_takes_first_venues() {
        let catalog = Catalog::seed().unwrap();
        let ids: Vec<u32> = catalog.featured(3).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_resolve_keeps_catalog_order() {
        let catalog = Catalog::seed().unwrap();
        let resolved: Vec<u32> = catalog
            .resolve([3, 99, 1]).iter().map(|v| v.id).collect();
        assert_eq!(resolved, vec![1, 3]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let venues = vec![
            venue(1, "Lahore", VenueType::Banquet, 100, 3.0),
            venue(1, "Karachi", VenueType::Palace, 200, 4.0),
        ];
        assert!(Catalog::from_venues(venues).is_err());
    }

    #[test]
    fn test_rejects_inverted_capacity() {
        let mut bad = venue(1, "Lahore", VenueType::Banquet, 100, 3.0);
        bad.capacity = Capacity { min: 500, max: 100 };
        assert!(Catalog::from_venues(vec![bad]).is_err());
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let bad = venue(1, "Lahore", VenueType::Banquet, 100, 5.5);
        assert!(Catalog::from_venues(vec![bad]).is_err());
    }

    #[test]
    fn test_from_file() {
        let venues = vec![venue(7, "Multan", VenueType::Outdoor, 150000, 4.1)];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&venues).unwrap().as_bytes())
            .unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_id(7).unwrap().city, "Multan");
    }

    #[test]
    fn test_from_file_missing() {
        assert!(Catalog::from_file("/nonexistent/venues.json").is_err());
    }

    #[test]
    fn test_fits_guests() {
        let v = venue(1, "Lahore", VenueType::Banquet, 100, 3.0);
        assert!(v.fits_guests(100));
        assert!(v.fits_guests(500));
        assert!(!v.fits_guests(99));
        assert!(!v.fits_guests(501));
    }
}
