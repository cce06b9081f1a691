use super::common::geodetic::LatLon;

/// Snapshot of everything the simulator reports about the aircraft during one tick.
///
/// A new snapshot is produced per received datagram. Groups missing from a datagram keep the
/// values of the previous snapshot, groups present in it overwrite their fields in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstrumentState {
    // airspeed group
    kias: f64,
    keas: f64,
    ktas: f64,
    ground_speed_kt: f64,
    mph: f64,
    true_mph: f64,
    ground_speed_mph: f64,
    // trim / flap / speed brake group
    trim_elevator: f64,
    trim_aileron: f64,
    trim_rudder: f64,
    flap_handle: f64,
    flap_position: f64,
    slat_ratio: f64,
    speed_brake_handle: f64,
    speed_brake_position: f64,
    // attitude group
    pitch: f64,
    roll: f64,
    true_heading: f64,
    magnetic_heading: f64,
    // position group
    latitude: f64,
    longitude: f64,
    altitude_msl: f64,
    altitude_agl: f64,
    on_runway: f64,
    altitude_indicated: f64,
}

impl InstrumentState {
    /// Applies an airspeed record (group 3). Slot 4 carries no value.
    pub fn apply_speeds(&mut self, v: &[f64; 8]) {
        self.kias = v[0];
        self.keas = v[1];
        self.ktas = v[2];
        self.ground_speed_kt = v[3];
        self.mph = v[5];
        self.true_mph = v[6];
        self.ground_speed_mph = v[7];
    }

    /// Applies a trim, flap and speed brake record (group 13).
    pub fn apply_high_lift(&mut self, v: &[f64; 8]) {
        self.trim_elevator = v[0];
        self.trim_aileron = v[1];
        self.trim_rudder = v[2];
        self.flap_handle = v[3];
        self.flap_position = v[4];
        self.slat_ratio = v[5];
        self.speed_brake_handle = v[6];
        self.speed_brake_position = v[7];
    }

    /// Applies a pitch, roll and heading record (group 17).
    pub fn apply_attitude(&mut self, v: &[f64; 8]) {
        self.pitch = v[0];
        self.roll = v[1];
        self.true_heading = v[2];
        self.magnetic_heading = v[3];
    }

    /// Applies a latitude, longitude and altitude record (group 20).
    pub fn apply_position(&mut self, v: &[f64; 8]) {
        self.latitude = v[0];
        self.longitude = v[1];
        self.altitude_msl = v[2];
        self.altitude_agl = v[3];
        self.on_runway = v[4];
        self.altitude_indicated = v[5];
    }

    pub fn kias(&self) -> f64 { self.kias }
    pub fn mph(&self) -> f64 { self.mph }
    pub fn pitch(&self) -> f64 { self.pitch }
    pub fn roll(&self) -> f64 { self.roll }
    pub fn true_heading(&self) -> f64 { self.true_heading }
    pub fn latitude(&self) -> f64 { self.latitude }
    pub fn longitude(&self) -> f64 { self.longitude }
    pub fn altitude_agl(&self) -> f64 { self.altitude_agl }
    pub fn is_on_runway(&self) -> bool { self.on_runway >= 0.5 }

    pub fn lat_lon(&self) -> LatLon { LatLon::new(self.latitude, self.longitude) }

    /// The simulator parks a freshly (re)spawned aircraft standing still at the runway.
    pub fn looks_like_respawn(&self, max_ground_speed_mph: f64, max_agl: f64) -> bool {
        self.ground_speed_mph < max_ground_speed_mph && self.altitude_agl < max_agl
    }
}

/// Readings of the telemetry groups that no flight plan reacts to.
#[allow(dead_code)]
impl InstrumentState {
    pub fn keas(&self) -> f64 { self.keas }
    pub fn ktas(&self) -> f64 { self.ktas }
    pub fn ground_speed_kt(&self) -> f64 { self.ground_speed_kt }
    pub fn true_mph(&self) -> f64 { self.true_mph }
    pub fn ground_speed_mph(&self) -> f64 { self.ground_speed_mph }
    pub fn trim_elevator(&self) -> f64 { self.trim_elevator }
    pub fn trim_aileron(&self) -> f64 { self.trim_aileron }
    pub fn trim_rudder(&self) -> f64 { self.trim_rudder }
    pub fn flap_handle(&self) -> f64 { self.flap_handle }
    pub fn flap_position(&self) -> f64 { self.flap_position }
    pub fn slat_ratio(&self) -> f64 { self.slat_ratio }
    pub fn speed_brake_handle(&self) -> f64 { self.speed_brake_handle }
    pub fn speed_brake_position(&self) -> f64 { self.speed_brake_position }
    pub fn magnetic_heading(&self) -> f64 { self.magnetic_heading }
    pub fn altitude_msl(&self) -> f64 { self.altitude_msl }
    pub fn altitude_indicated(&self) -> f64 { self.altitude_indicated }
}
