mod autopilot_config;

#[cfg(test)]
mod tests;

pub use autopilot_config::AutopilotConfig;
