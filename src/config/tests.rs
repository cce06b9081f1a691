use super::AutopilotConfig;
use crate::flight_control::ProfileKind;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

fn config_from(vars: &[(&str, &str)]) -> AutopilotConfig {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    AutopilotConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);
    assert_eq!(config, AutopilotConfig::default());
    assert_eq!(config.link.bind_ip, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.link.receive_port, 50000);
    assert_eq!(config.link.command_port, 49000);
    assert_eq!(config.profile, ProfileKind::Circuit);
    assert_eq!(config.display_port, None);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("AUTOPILOT_IP", "127.0.0.1"),
        ("AUTOPILOT_PORT", "50100"),
        ("XPLANE_PORT", " 49010 "),
        ("AUTOPILOT_PROFILE", "straight-out"),
        ("AUTOPILOT_DISPLAY_PORT", "1337"),
    ]);
    assert_eq!(config.link.bind_ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.link.receive_port, 50100);
    assert_eq!(config.link.command_port, 49010);
    assert_eq!(config.profile, ProfileKind::StraightOut);
    assert_eq!(config.display_port, Some(1337));
}

#[test]
fn test_invalid_values_fall_back() {
    let config = config_from(&[
        ("AUTOPILOT_IP", "localhost"),
        ("AUTOPILOT_PORT", "70000"),
        ("AUTOPILOT_PROFILE", "loop"),
        ("AUTOPILOT_DISPLAY_PORT", "off"),
    ]);
    assert_eq!(config, AutopilotConfig::default());
}
