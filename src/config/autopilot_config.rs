use crate::flight_control::ProfileKind;
use crate::sim_link::LinkConfig;
use crate::warn;
use std::str::FromStr;

/// Runtime settings, read from the environment at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutopilotConfig {
    pub link: LinkConfig,
    pub profile: ProfileKind,
    /// Port of the dashboard feed, `None` disables it.
    pub display_port: Option<u16>,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self { link: LinkConfig::default(), profile: ProfileKind::Circuit, display_port: None }
    }
}

impl AutopilotConfig {
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Builds the configuration from an arbitrary key lookup. Unparsable values are reported
    /// and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let link = LinkConfig {
            bind_ip: parse_or(&lookup, "AUTOPILOT_IP", defaults.link.bind_ip),
            receive_port: parse_or(&lookup, "AUTOPILOT_PORT", defaults.link.receive_port),
            command_port: parse_or(&lookup, "XPLANE_PORT", defaults.link.command_port),
        };
        let profile = lookup("AUTOPILOT_PROFILE").map_or(defaults.profile, |v| ProfileKind::from(v.as_str()));
        let display_port = lookup("AUTOPILOT_DISPLAY_PORT").and_then(|v| match v.trim().parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!("AUTOPILOT_DISPLAY_PORT '{v}' is not a port, display feed disabled");
                None
            }
        });
        Self { link, profile, display_port }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key} '{raw}' cannot be parsed, using {default}");
            default
        }),
    }
}
