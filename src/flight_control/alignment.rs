/// One proportional gain of the longitude schedule, active while `|error| >= min_error`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainBand {
    pub min_error: f64,
    pub gain: f64,
}

/// Result of comparing the current longitude against the alignment target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignmentStatus {
    Correcting,
    Aligned,
    /// Too far off to be corrected by rudder alone.
    OutOfCapture,
}

/// Gain-scheduled rudder law steering the aircraft onto a target longitude, e.g. the extended
/// centerline of a north/south runway.
///
/// The schedule has three bands: a low gain while the error is coarse, a medium gain in between
/// and a high gain close to the target. There is no integral or derivative term, so a small
/// steady-state offset can remain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentSchedule {
    target_lon: f64,
    /// Ordered coarse, medium, fine. `min_error` must be descending.
    bands: [GainBand; 3],
    tolerance: f64,
    capture_limit: f64,
}

impl AlignmentSchedule {
    pub const fn new(target_lon: f64, bands: [GainBand; 3], tolerance: f64, capture_limit: f64) -> Self {
        Self { target_lon, bands, tolerance, capture_limit }
    }

    pub fn target_lon(&self) -> f64 { self.target_lon }
    #[allow(dead_code)]
    pub fn bands(&self) -> &[GainBand; 3] { &self.bands }

    /// Signed longitude error, positive when east of the target.
    pub fn error(&self, lon: f64) -> f64 { lon - self.target_lon }

    /// Index into `bands` of the band responsible for `error`.
    pub fn band_index(&self, error: f64) -> usize {
        let abs_err = error.abs();
        self.bands.iter().position(|b| abs_err >= b.min_error).unwrap_or(self.bands.len() - 1)
    }

    pub fn status(&self, lon: f64) -> AlignmentStatus {
        let abs_err = self.error(lon).abs();
        if abs_err >= self.capture_limit {
            AlignmentStatus::OutOfCapture
        } else if abs_err <= self.tolerance {
            AlignmentStatus::Aligned
        } else {
            AlignmentStatus::Correcting
        }
    }

    /// Rudder command for the current longitude while flying `course` (degrees true).
    ///
    /// The command is scaled with the cosine of the course, so it reverses for southbound legs
    /// and fades out on east/west legs where longitude cannot be corrected laterally. Its
    /// magnitude never exceeds `gain * |error|` of the active band and is clamped to `[-1, 1]`.
    pub fn rudder_command(&self, lon: f64, course: f64) -> f64 {
        let error = self.error(lon);
        let gain = self.bands[self.band_index(error)].gain;
        (-gain * error * course.to_radians().cos()).clamp(-1.0, 1.0)
    }
}
