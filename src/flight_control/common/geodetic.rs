use std::fmt::{Display, Formatter};

/// Mean Earth radius in feet. Every distance in the autopilot is expressed in feet.
pub const EARTH_RADIUS_FT: f64 = 20_925_524.9;

/// A point on the Earth's surface, latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    #[allow(dead_code)]
    pub fn lat(&self) -> f64 { self.lat }
    pub fn lon(&self) -> f64 { self.lon }

    /// Great-circle distance to `other` in feet using the Haversine formula.
    ///
    /// # Arguments
    /// - `other`: The point to measure the distance to.
    ///
    /// # Returns
    /// - The distance in feet, symmetric in both points and zero iff they coincide.
    pub fn distance(&self, other: &LatLon) -> f64 {
        let phi_1 = self.lat.to_radians();
        let phi_2 = other.lat.to_radians();
        let d_phi = phi_2 - phi_1;
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi_1.cos() * phi_2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_FT * c
    }

    /// Initial bearing of the great circle from `self` to `other`.
    ///
    /// # Returns
    /// - The bearing in degrees within `[0, 360)`.
    pub fn bearing(&self, other: &LatLon) -> f64 {
        let phi_1 = self.lat.to_radians();
        let phi_2 = other.lat.to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let y = d_lambda.sin() * phi_2.cos();
        let x = phi_1.cos() * phi_2.sin() - phi_1.sin() * phi_2.cos() * d_lambda.cos();
        wrap_360(y.atan2(x).to_degrees())
    }

    /// Projects the point reached when travelling `distance` feet along the great circle
    /// leaving `self` with the initial bearing `bearing`.
    ///
    /// # Arguments
    /// - `bearing`: Initial bearing in degrees.
    /// - `distance`: Distance to travel in feet.
    ///
    /// # Returns
    /// - The destination with its longitude normalized to `[-180, 180)`.
    #[allow(dead_code)]
    pub fn destination(&self, bearing: f64, distance: f64) -> LatLon {
        let theta = bearing.to_radians();
        let delta = distance / EARTH_RADIUS_FT;
        let phi_1 = self.lat.to_radians();
        let lambda_1 = self.lon.to_radians();

        let phi_2 = (phi_1.sin() * delta.cos() + phi_1.cos() * delta.sin() * theta.cos()).asin();
        let lambda_2 = lambda_1
            + (theta.sin() * delta.sin() * phi_1.cos())
                .atan2(delta.cos() - phi_1.sin() * phi_2.sin());
        let lambda_2 = (lambda_2 + 3.0 * std::f64::consts::PI).rem_euclid(std::f64::consts::TAU)
            - std::f64::consts::PI;
        LatLon::new(phi_2.to_degrees(), lambda_2.to_degrees())
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lat, self.lon)
    }
}

/// Altitude in feet above mean sea level paired with a surface position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    alt: f64,
    lat_lon: LatLon,
}

impl Location {
    pub const fn new(alt: f64, lat_lon: LatLon) -> Self { Self { alt, lat_lon } }
    #[allow(dead_code)]
    pub fn alt(&self) -> f64 { self.alt }
    pub fn lat_lon(&self) -> &LatLon { &self.lat_lon }
}

/// Signed shortest angular difference `h1 - h2` in degrees.
///
/// Computed as `((h1 - h2 + 180) mod 360) - 180` with a Euclidean modulo, so wraparound at
/// north is handled (`heading_diff(5.0, 355.0) == 10.0`). The result lies in `(-180, 180]`:
/// an exact half turn is reported as `+180`.
pub fn heading_diff(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2 + 180.0).rem_euclid(360.0) - 180.0;
    if diff <= -180.0 { diff + 360.0 } else { diff }
}

/// The opposite heading, within `[0, 360)`.
pub fn reciprocal(heading: f64) -> f64 { wrap_360(heading + 180.0) }

pub fn wrap_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
