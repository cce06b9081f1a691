pub(crate) mod geodetic;
