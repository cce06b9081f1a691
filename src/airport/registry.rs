use crate::flight_control::common::geodetic::{LatLon, Location};
use std::sync::LazyLock;

/// One end of a runway. The threshold of `reciprocal` is the other end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Runway {
    name: &'static str,
    reciprocal: &'static str,
    threshold: Location,
}

impl Runway {
    const fn new(name: &'static str, reciprocal: &'static str, alt: f64, lat: f64, lon: f64) -> Self {
        Self { name, reciprocal, threshold: Location::new(alt, LatLon::new(lat, lon)) }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str { self.name }
    #[allow(dead_code)]
    pub fn reciprocal(&self) -> &'static str { self.reciprocal }
    #[allow(dead_code)]
    pub fn threshold(&self) -> &Location { &self.threshold }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    code: &'static str,
    runways: Vec<Runway>,
}

impl Airport {
    #[allow(dead_code)]
    pub fn code(&self) -> &'static str { self.code }
    #[allow(dead_code)]
    pub fn runways(&self) -> &[Runway] { &self.runways }

    pub fn runway(&self, name: &str) -> Option<&Runway> { self.runways.iter().find(|rw| rw.name == name) }

    /// Threshold of `name` and of its reciprocal.
    fn ends(&self, name: &str) -> Option<(&LatLon, &LatLon)> {
        let runway = self.runway(name)?;
        let opposite = self.runway(runway.reciprocal)?;
        Some((runway.threshold.lat_lon(), opposite.threshold.lat_lon()))
    }

    /// True course from the threshold of `name` towards the opposite threshold.
    pub fn runway_heading(&self, name: &str) -> Option<f64> {
        self.ends(name).map(|(from, to)| from.bearing(to))
    }

    /// Distance between both thresholds in feet.
    pub fn runway_length(&self, name: &str) -> Option<f64> {
        self.ends(name).map(|(from, to)| from.distance(to))
    }
}

/// Airports around Seattle the autopilot can take off from or land at, with threshold
/// elevations in feet.
pub static AIRPORTS: LazyLock<Vec<Airport>> = LazyLock::new(|| {
    vec![
        // Seattle Tacoma International
        Airport {
            code: "KSEA",
            runways: vec![
                Runway::new("16L", "34R", 433.0, 47.463_797_33, -122.307_752_22),
                Runway::new("34R", "16L", 347.0, 47.431_175_33, -122.308_041_22),
                Runway::new("16C", "34C", 430.0, 47.463_811_33, -122.310_988_22),
                Runway::new("34C", "16C", 363.0, 47.437_972_33, -122.311_213_22),
                Runway::new("16R", "34L", 415.0, 47.463_837_63, -122.317_862_63),
                Runway::new("34L", "16R", 356.0, 47.440_536_95, -122.318_064_63),
            ],
        },
        // Boeing Field King County International
        Airport {
            code: "KBFI",
            runways: vec![
                Runway::new("13L", "31R", 18.0, 47.537_992_92, -122.307_461_00),
                Runway::new("31R", "13L", 17.0, 47.529_167_92, -122.300_000_00),
                Runway::new("13R", "31L", 17.0, 47.540_517_92, -122.311_356_00),
                Runway::new("31L", "13R", 21.0, 47.516_725_92, -122.291_242_00),
            ],
        },
        // Renton Municipal
        Airport {
            code: "KRNT",
            runways: vec![
                Runway::new("16", "34", 24.0, 47.500_472_00, -122.216_853_00),
                Runway::new("34", "16", 32.0, 47.485_794_00, -122.214_633_00),
            ],
        },
        // McChord Air Force Base
        Airport {
            code: "KTCM",
            runways: vec![
                Runway::new("16", "34", 286.0, 47.151_506_00, -122.476_550_00),
                Runway::new("34", "16", 322.0, 47.123_814_00, -122.476_381_00),
            ],
        },
        // Crest Airpark
        Airport {
            code: "S36",
            runways: vec![
                Runway::new("15", "33", 472.0, 47.341_547_00, -122.104_575_00),
                Runway::new("33", "15", 472.0, 47.332_644_00, -122.102_497_00),
            ],
        },
        // Auburn Municipal
        Airport {
            code: "S50",
            runways: vec![
                Runway::new("16", "34", 63.0, 47.332_342_00, -122.226_703_00),
                Runway::new("34", "16", 63.0, 47.323_028_00, -122.226_606_00),
            ],
        },
    ]
});

pub fn airport(code: &str) -> Option<&'static Airport> { AIRPORTS.iter().find(|apt| apt.code == code) }

pub fn runway_location(airport_code: &str, runway: &str) -> Option<Location> {
    airport(airport_code)?.runway(runway).map(|rw| rw.threshold)
}

pub fn runway_heading(airport_code: &str, runway: &str) -> Option<f64> {
    airport(airport_code)?.runway_heading(runway)
}

#[allow(dead_code)]
pub fn runway_length(airport_code: &str, runway: &str) -> Option<f64> {
    airport(airport_code)?.runway_length(runway)
}

/// Airport and runway whose threshold is nearest to `pos`. On equal distance the runway listed
/// first wins.
pub fn closest_runway(pos: &LatLon) -> Option<(&'static str, &'static str)> {
    let mut closest: Option<(f64, &'static str, &'static str)> = None;
    for apt in AIRPORTS.iter() {
        for rw in &apt.runways {
            let dist = rw.threshold.lat_lon().distance(pos);
            if closest.is_none_or(|(min_dist, _, _)| dist < min_dist) {
                closest = Some((dist, apt.code, rw.name));
            }
        }
    }
    closest.map(|(_, apt, rw)| (apt, rw))
}
