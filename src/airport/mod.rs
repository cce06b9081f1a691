mod registry;

#[cfg(test)]
mod tests;

pub use registry::{
    AIRPORTS, Airport, Runway, airport, closest_runway, runway_heading, runway_length, runway_location,
};
