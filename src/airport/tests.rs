use super::{AIRPORTS, airport, closest_runway, runway_heading, runway_length, runway_location};
use crate::flight_control::common::geodetic::{LatLon, heading_diff};

#[test]
fn test_runway_location() {
    let loc = runway_location("KSEA", "16L").unwrap();
    assert!((loc.alt() - 433.0).abs() < 1e-9);
    assert!((loc.lat_lon().lat() - 47.463_797_33).abs() < 1e-9);
    assert!((loc.lat_lon().lon() + 122.307_752_22).abs() < 1e-9);
    assert!(runway_location("KSEA", "17").is_none());
    assert!(runway_location("EDDF", "07L").is_none());
}

#[test]
fn test_runway_heading_and_reciprocal() {
    let south = runway_heading("KSEA", "16L").unwrap();
    let north = runway_heading("KSEA", "34R").unwrap();
    assert!(south > 175.0 && south < 185.0, "16L heads {south}");
    assert!((heading_diff(south, north).abs() - 180.0).abs() < 0.1);
    for apt in AIRPORTS.iter() {
        for rw in apt.runways() {
            let hdg = apt.runway_heading(rw.name()).unwrap();
            let rev = apt.runway_heading(rw.reciprocal()).unwrap();
            assert!((heading_diff(hdg, rev).abs() - 180.0).abs() < 0.5, "{} {}", apt.code(), rw.name());
        }
    }
}

#[test]
fn test_runway_length() {
    let length = runway_length("KSEA", "16L").unwrap();
    assert!(length > 11_000.0 && length < 12_500.0, "16L is {length} ft");
    let reverse = runway_length("KSEA", "34R").unwrap();
    assert!((length - reverse).abs() < 1e-6);
    assert!(runway_length("KBFI", "16").is_none());
}

#[test]
fn test_closest_runway() {
    assert_eq!(closest_runway(&LatLon::new(47.4637, -122.3077)), Some(("KSEA", "16L")));
    assert_eq!(closest_runway(&LatLon::new(47.4855, -122.2146)), Some(("KRNT", "34")));
    assert_eq!(closest_runway(&LatLon::new(47.16, -122.48)), Some(("KTCM", "16")));
    for apt in AIRPORTS.iter() {
        for rw in apt.runways() {
            assert_eq!(closest_runway(rw.threshold().lat_lon()), Some((apt.code(), rw.name())));
        }
    }
}

#[test]
fn test_airport_lookup() {
    assert_eq!(airport("S50").map(|apt| apt.runways().len()), Some(2));
    assert_eq!(airport("KSEA").map(|apt| apt.runways().len()), Some(6));
    assert!(airport("ksea").is_none());
}
