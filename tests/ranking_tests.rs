//! Ranking scenarios against the bundled listings

use std::collections::HashSet;

use nearby_finder::listings::{BundledListings, parse_listing_document};
use nearby_finder::{Coordinates, Listing, ListingRanker, Ranking};

const CENTER: Coordinates = Coordinates {
    lat: 1.3048,
    lng: 103.8318,
};

const YI_SPA_LOCATION: Coordinates = Coordinates {
    lat: 1.305,
    lng: 103.856,
};

fn all_listings() -> Vec<Listing> {
    BundledListings::listings().expect("bundled listings decode")
}

fn names(ranking: &Ranking) -> Vec<&str> {
    ranking
        .results
        .iter()
        .map(|r| r.listing.name.as_str())
        .collect()
}

#[test]
fn test_empty_query_returns_approved_nearest_first() {
    let ranking = ListingRanker::rank(&all_listings(), &CENTER, "", None).unwrap();
    assert_eq!(names(&ranking), vec!["Yi Spa", "Moonlight"]);
    assert!(ranking.skipped.is_empty());
}

#[test]
fn test_query_matches_services() {
    let ranking = ListingRanker::rank(&all_listings(), &CENTER, "aromatherapy", None).unwrap();
    assert_eq!(names(&ranking), vec!["Yi Spa"]);
}

#[test]
fn test_query_is_case_insensitive() {
    let ranking = ListingRanker::rank(&all_listings(), &CENTER, "AROMATHERAPY", None).unwrap();
    assert_eq!(names(&ranking), vec!["Yi Spa"]);
}

#[test]
fn test_radius_around_yi_spa() {
    let ranking = ListingRanker::rank(&all_listings(), &YI_SPA_LOCATION, "", Some(0.5)).unwrap();
    assert_eq!(names(&ranking), vec!["Yi Spa"]);
    assert_eq!(ranking.results[0].distance_km, 0.0);
}

#[test]
fn test_unknown_term_returns_nothing() {
    let ranking =
        ListingRanker::rank(&all_listings(), &CENTER, "nonexistent-term", None).unwrap();
    assert!(ranking.results.is_empty());
}

#[test]
fn test_no_listings_returns_nothing() {
    let ranking = ListingRanker::rank(&[], &CENTER, "", None).unwrap();
    assert!(ranking.results.is_empty());
    assert!(ranking.skipped.is_empty());
}

#[test]
fn test_unapproved_listing_never_visible() {
    let listings = all_listings();
    // Nice Wellness is the closest listing to its own location and matches every query below
    let nice_wellness = Coordinates::new(1.299, 103.850);

    for query in ["", "nice", "wellness", "aromatherapy", "rowell"] {
        for radius in [None, Some(0.1), Some(50.0)] {
            let ranking = ListingRanker::rank(&listings, &nice_wellness, query, radius).unwrap();
            assert!(
                ranking.results.iter().all(|r| r.listing.name != "Nice Wellness"),
                "unapproved listing leaked for query {query:?} radius {radius:?}"
            );
        }
    }
}

#[test]
fn test_results_are_subset_without_duplicates() {
    let listings = all_listings();
    let input_ids: HashSet<&str> = listings.iter().map(|l| l.id.as_str()).collect();

    let ranking = ListingRanker::rank(&listings, &CENTER, "", Some(50.0)).unwrap();
    let output_ids: Vec<&str> = ranking
        .results
        .iter()
        .map(|r| r.listing.id.as_str())
        .collect();
    let unique: HashSet<&str> = output_ids.iter().copied().collect();

    assert_eq!(unique.len(), output_ids.len());
    assert!(unique.is_subset(&input_ids));
}

#[test]
fn test_results_are_ordered_by_distance() {
    let ranking = ListingRanker::rank(&all_listings(), &CENTER, "", None).unwrap();
    for pair in ranking.results.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
        let listing_location = pair[0]
            .listing
            .coordinates()
            .expect("ranked listings have locations");
        assert_eq!(pair[0].distance_km, listing_location.distance_km(&CENTER));
    }
}

#[test]
fn test_radius_boundary_inclusive() {
    let listings = all_listings();
    let moonlight = listings
        .iter()
        .find(|l| l.name == "Moonlight")
        .and_then(Listing::coordinates)
        .expect("moonlight has a location");
    let exact = moonlight.distance_km(&CENTER);

    let at_boundary = ListingRanker::rank(&listings, &CENTER, "moonlight", Some(exact)).unwrap();
    assert_eq!(names(&at_boundary), vec!["Moonlight"]);

    let just_short =
        ListingRanker::rank(&listings, &CENTER, "moonlight", Some(exact - 1e-9)).unwrap();
    assert!(just_short.results.is_empty());
}

#[test]
fn test_listing_without_location_is_reported() {
    let mut listings = all_listings();
    listings.push(
        serde_json::from_str(
            r#"{"id": "ghost", "name": "Ghost Spa", "approved": true, "services": ["Aromatherapy"]}"#,
        )
        .unwrap(),
    );

    let ranking = ListingRanker::rank(&listings, &CENTER, "aromatherapy", None).unwrap();
    assert_eq!(names(&ranking), vec!["Yi Spa"]);
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].id, "ghost");
}

#[test]
fn test_incomplete_location_does_not_hide_other_listings() {
    let listings = parse_listing_document(
        r#"[
            {"id": "whole", "name": "Whole Spa", "approved": true,
             "loc": {"lat": 1.305, "lng": 103.856}},
            {"id": "half", "name": "Half Spa", "approved": true,
             "loc": {"lat": 1.31}}
        ]"#,
    )
    .expect("document with an incomplete location still parses");

    let ranking = ListingRanker::rank(&listings, &CENTER, "spa", None).unwrap();
    assert_eq!(names(&ranking), vec!["Whole Spa"]);
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].id, "half");
}

#[test]
fn test_location_key_is_accepted() {
    let listings = parse_listing_document(
        r#"[{"id": "a", "name": "A", "approved": true,
             "location": {"lat": 1.305, "lng": 103.856}}]"#,
    )
    .unwrap();

    let ranking = ListingRanker::rank(&listings, &CENTER, "", None).unwrap();
    assert_eq!(names(&ranking), vec!["A"]);
    assert!(ranking.skipped.is_empty());
}
