// 🔎 Listing Filter/Sort Engine
// Derives the displayed subset and order of venues from criteria + sort key.
// Filter options are derived from whatever collection is in scope, so the
// choices offered narrow to what is actually present.

use crate::catalog::{Venue, VenueType};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ============================================================================
// SORT ORDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    /// No popularity metric exists yet; ranks exactly like `RatingDesc`
    #[default]
    Popularity,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Popularity,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::RatingDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
            SortOrder::RatingDesc => "Rating",
            SortOrder::Popularity => "Popularity",
        }
    }

    /// Cycle to the next sort key (used by the terminal front end)
    pub fn next(&self) -> Self {
        match self {
            SortOrder::Popularity => SortOrder::PriceAsc,
            SortOrder::PriceAsc => SortOrder::PriceDesc,
            SortOrder::PriceDesc => SortOrder::RatingDesc,
            SortOrder::RatingDesc => SortOrder::Popularity,
        }
    }

    fn compare(&self, a: &Venue, b: &Venue) -> Ordering {
        match self {
            SortOrder::PriceAsc => a.price_per_event.cmp(&b.price_per_event),
            SortOrder::PriceDesc => b.price_per_event.cmp(&a.price_per_event),
            SortOrder::RatingDesc | SortOrder::Popularity => b.rating.total_cmp(&a.rating),
        }
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// Choices the filter panel offers for the venues currently in scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub venue_types: Vec<VenueType>,
    pub facilities: Vec<String>,
    pub price_range: PriceRange,
    pub max_capacity: u32,
}

impl FilterOptions {
    pub fn derive(venues: &[&Venue]) -> Self {
        let cities: BTreeSet<&str> = venues.iter().map(|v| v.city.as_str()).collect();
        let facilities: BTreeSet<&str> = venues
            .iter()
            .flat_map(|v| v.facilities.iter().map(String::as_str))
            .collect();

        let mut venue_types: Vec<VenueType> = Vec::new();
        for venue in venues {
            if !venue_types.contains(&venue.venue_type) {
                venue_types.push(venue.venue_type);
            }
        }
        venue_types.sort_by_key(|t| t.as_str());

        let price_range = PriceRange {
            min: venues.iter().map(|v| v.price_per_event).min().unwrap_or(0),
            max: venues.iter().map(|v| v.price_per_event).max().unwrap_or(0),
        };
        let max_capacity = venues.iter().map(|v| v.capacity.max).max().unwrap_or(0);

        FilterOptions {
            cities: cities.into_iter().map(String::from).collect(),
            venue_types,
            facilities: facilities.into_iter().map(String::from).collect(),
            price_range,
            max_capacity,
        }
    }
}

// ============================================================================
// CRITERIA
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ListingCriteria {
    /// Exact city match; `None` means all cities
    pub city: Option<String>,

    /// Exact category match; `None` means all types
    pub venue_type: Option<VenueType>,

    /// Inclusive price ceiling
    pub max_price: u64,

    /// Inclusive floor on a venue's maximum capacity
    pub min_capacity: Option<u32>,

    /// Rating band, 0 = unfiltered (see `rating_in_band`)
    pub min_rating: u8,

    /// Every listed facility must be present
    pub facilities: Vec<String>,

    pub sort: SortOrder,
}

impl ListingCriteria {
    /// Defaults for a scope: nothing filtered, price ceiling at the scope max
    pub fn for_options(options: &FilterOptions) -> Self {
        ListingCriteria {
            city: None,
            venue_type: None,
            max_price: options.price_range.max,
            min_capacity: None,
            min_rating: 0,
            facilities: Vec::new(),
            sort: SortOrder::default(),
        }
    }

    pub fn matches(&self, venue: &Venue) -> bool {
        if let Some(city) = &self.city {
            if &venue.city != city {
                return false;
            }
        }
        if let Some(venue_type) = self.venue_type {
            if venue.venue_type != venue_type {
                return false;
            }
        }
        if venue.price_per_event > self.max_price {
            return false;
        }
        if let Some(min_capacity) = self.min_capacity {
            if venue.capacity.max < min_capacity {
                return false;
            }
        }
        if !rating_in_band(venue.rating, self.min_rating) {
            return false;
        }
        self.facilities.iter().all(|f| venue.has_facility(f))
    }

    pub fn toggle_facility(&mut self, facility: &str) {
        if let Some(pos) = self.facilities.iter().position(|f| f == facility) {
            self.facilities.remove(pos);
        } else {
            self.facilities.push(facility.to_string());
        }
    }

    /// Select a star rating; picking the active one clears it
    pub fn select_rating(&mut self, stars: u8) {
        let stars = stars.min(5);
        self.min_rating = if self.min_rating == stars { 0 } else { stars };
    }

    /// Parse the min-capacity text field. Blank clears the filter.
    pub fn set_min_capacity_input(&mut self, input: &str) -> Result<(), ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.min_capacity = None;
            return Ok(());
        }

        match trimmed.parse::<u32>() {
            Ok(value) => {
                self.min_capacity = Some(value);
                Ok(())
            }
            Err(_) => Err(ValidationError::new(
                "min_capacity",
                "Minimum guests must be a whole number.",
            )),
        }
    }
}

/// Rating band check.
///
/// Band 0 keeps everything. Bands 1-4 keep ratings in `[band, band + 1)`,
/// so band 3 keeps 3.9 but not 4.0 or 5.0. Band 5 keeps ratings of 5 and up.
pub fn rating_in_band(rating: f64, band: u8) -> bool {
    if band == 0 {
        return true;
    }
    let floor = f64::from(band);
    if rating < floor {
        return false;
    }
    band >= 5 || rating < floor + 1.0
}

/// Filter then sort. Sorting is stable, so ties keep scope order.
pub fn apply<'a>(venues: &[&'a Venue], criteria: &ListingCriteria) -> Vec<&'a Venue> {
    let mut shown: Vec<&'a Venue> = venues
        .iter()
        .copied()
        .filter(|v| criteria.matches(v))
        .collect();

    shown.sort_by(|a, b| criteria.sort.compare(a, b));
    shown
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::venue;
    use crate::catalog::Capacity;

    fn ids(venues: &[&Venue]) -> Vec<u32> {
        venues.iter().map(|v| v.id).collect()
    }

    fn open_criteria() -> ListingCriteria {
        ListingCriteria {
            city: None,
            venue_type: None,
            max_price: u64::MAX,
            min_capacity: None,
            min_rating: 0,
            facilities: Vec::new(),
            sort: SortOrder::PriceAsc,
        }
    }

    #[test]
    fn test_rating_band_three_keeps_only_three_point_something() {
        let a = venue(1, "Lahore", VenueType::Banquet, 100, 2.5);
        let b = venue(2, "Lahore", VenueType::Banquet, 100, 3.9);
        let c = venue(3, "Lahore", VenueType::Banquet, 100, 5.0);
        let all = vec![&a, &b, &c];

        let mut criteria = open_criteria();
        criteria.min_rating = 3;
        assert_eq!(ids(&apply(&all, &criteria)), vec![2]);
    }

    #[test]
    fn test_rating_band_edges() {
        assert!(rating_in_band(0.0, 0));
        assert!(rating_in_band(4.0, 4));
        assert!(!rating_in_band(5.0, 4));
        assert!(rating_in_band(5.0, 5));
        assert!(!rating_in_band(4.99, 5));
        assert!(!rating_in_band(0.5, 1));
    }

    #[test]
    fn test_max_price_is_inclusive_and_keeps_order() {
        let a = venue(1, "Lahore", VenueType::Banquet, 100_000, 4.0);
        let b = venue(2, "Lahore", VenueType::Banquet, 250_000, 4.0);
        let c = venue(3, "Lahore", VenueType::Banquet, 500_000, 4.0);
        let all = vec![&a, &b, &c];

        let mut criteria = open_criteria();
        criteria.max_price = 250_000;
        // Equal ratings, so a stable rating sort keeps scope order
        criteria.sort = SortOrder::RatingDesc;
        assert_eq!(ids(&apply(&all, &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_sort_price_ascending_and_descending() {
        let a = venue(1, "Lahore", VenueType::Banquet, 500_000, 4.0);
        let b = venue(2, "Lahore", VenueType::Banquet, 100_000, 3.0);
        let c = venue(3, "Lahore", VenueType::Banquet, 250_000, 5.0);
        let all = vec![&a, &b, &c];

        let mut criteria = open_criteria();
        let prices: Vec<u64> = apply(&all, &criteria)
            .iter()
            .map(|v| v.price_per_event)
            .collect();
        assert_eq!(prices, vec![100_000, 250_000, 500_000]);

        criteria.sort = SortOrder::PriceDesc;
        assert_eq!(ids(&apply(&all, &criteria)), vec![1, 3, 2]);
    }

    #[test]
    fn test_popularity_matches_rating_desc() {
        let a = venue(1, "Lahore", VenueType::Banquet, 500_000, 4.2);
        let b = venue(2, "Lahore", VenueType::Banquet, 100_000, 4.8);
        let c = venue(3, "Lahore", VenueType::Banquet, 250_000, 4.2);
        let d = venue(4, "Lahore", VenueType::Banquet, 250_000, 1.0);
        let all = vec![&a, &b, &c, &d];

        let mut criteria = open_criteria();
        criteria.sort = SortOrder::Popularity;
        let popular = ids(&apply(&all, &criteria));
        criteria.sort = SortOrder::RatingDesc;
        let rated = ids(&apply(&all, &criteria));

        assert_eq!(popular, rated);
        assert_eq!(rated, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_city_type_capacity_and_facilities() {
        let mut a = venue(1, "Lahore", VenueType::Marquee, 100, 4.0);
        a.facilities = vec!["Parking".to_string(), "Valet".to_string()];
        a.capacity = Capacity { min: 100, max: 1000 };
        let mut b = venue(2, "Lahore", VenueType::Banquet, 100, 4.0);
        b.facilities = vec!["Parking".to_string()];
        let c = venue(3, "Karachi", VenueType::Marquee, 100, 4.0);
        let all = vec![&a, &b, &c];

        let mut criteria = open_criteria();
        criteria.city = Some("Lahore".to_string());
        assert_eq!(ids(&apply(&all, &criteria)), vec![1, 2]);

        criteria.venue_type = Some(VenueType::Marquee);
        assert_eq!(ids(&apply(&all, &criteria)), vec![1]);

        let mut criteria = open_criteria();
        criteria.min_capacity = Some(600);
        assert_eq!(ids(&apply(&all, &criteria)), vec![1]);

        let mut criteria = open_criteria();
        criteria.toggle_facility("Parking");
        assert_eq!(ids(&apply(&all, &criteria)), vec![1, 2]);
        criteria.toggle_facility("Valet");
        assert_eq!(ids(&apply(&all, &criteria)), vec![1]);
        criteria.toggle_facility("Valet");
        assert_eq!(criteria.facilities, vec!["Parking".to_string()]);
    }

    #[test]
    fn test_options_derived_from_scope() {
        let mut a = venue(1, "Lahore", VenueType::Palace, 900, 4.0);
        a.facilities = vec!["Valet".to_string(), "Catering".to_string()];
        let mut b = venue(2, "Karachi", VenueType::Banquet, 300, 4.0);
        b.facilities = vec!["Catering".to_string()];
        b.capacity = Capacity { min: 10, max: 1200 };
        let c = venue(3, "Lahore", VenueType::Palace, 600, 4.0);

        let options = FilterOptions::derive(&[&a, &b, &c]);
        assert_eq!(options.cities, vec!["Karachi", "Lahore"]);
        assert_eq!(options.venue_types, vec![VenueType::Banquet, VenueType::Palace]);
        assert_eq!(options.facilities, vec!["Catering", "Valet"]);
        assert_eq!(options.price_range, PriceRange { min: 300, max: 900 });
        assert_eq!(options.max_capacity, 1200);

        let narrowed = FilterOptions::derive(&[&c]);
        assert_eq!(narrowed.cities, vec!["Lahore"]);
        assert!(narrowed.facilities.is_empty());
    }

    #[test]
    fn test_options_for_empty_scope() {
        let options = FilterOptions::derive(&[]);
        assert_eq!(options.price_range, PriceRange { min: 0, max: 0 });
        assert_eq!(options.max_capacity, 0);
        assert!(options.cities.is_empty());
    }

    #[test]
    fn test_default_criteria_show_everything() {
        let a = venue(1, "Lahore", VenueType::Palace, 900, 1.2);
        let b = venue(2, "Karachi", VenueType::Banquet, 300, 4.0);
        let all = vec![&a, &b];

        let criteria = ListingCriteria::for_options(&FilterOptions::derive(&all));
        assert_eq!(criteria.max_price, 900);
        assert_eq!(criteria.sort, SortOrder::Popularity);
        assert_eq!(ids(&apply(&all, &criteria)), vec![2, 1]);
    }

    #[test]
    fn test_select_rating_toggles() {
        let mut criteria = open_criteria();
        criteria.select_rating(4);
        assert_eq!(criteria.min_rating, 4);
        criteria.select_rating(4);
        assert_eq!(criteria.min_rating, 0);
        criteria.select_rating(9);
        assert_eq!(criteria.min_rating, 5);
    }

    #[test]
    fn test_min_capacity_input() {
        let mut criteria = open_criteria();
        criteria.set_min_capacity_input(" 250 ").unwrap();
        assert_eq!(criteria.min_capacity, Some(250));

        let err = criteria.set_min_capacity_input("lots").unwrap_err();
        assert_eq!(err.field, "min_capacity");
        assert_eq!(criteria.min_capacity, Some(250));

        criteria.set_min_capacity_input("").unwrap();
        assert_eq!(criteria.min_capacity, None);
    }

    #[test]
    fn test_sort_order_cycles() {
        let mut order = SortOrder::default();
        for _ in 0..SortOrder::ALL.len() {
            order = order.next();
        }
        assert_eq!(order, SortOrder::default());
    }
}
