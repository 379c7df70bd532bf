//! Stable, hierarchy-encoded identifiers (spec §3 "Identifiers").
//!
//! Each identifier round-trips through a flat string attribute map
//! (`to_attributes` / `from_attributes`), so the round-trip property in
//! spec §8 ("Identifier -> attributes -> parse-attributes back yields the
//! same identifier") is directly testable.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

fn get(attrs: &BTreeMap<String, String>, key: &str) -> Result<String> {
    attrs.get(key).cloned().ok_or_else(|| Error::InvalidAttributes(format!("missing key {key}")))
}

fn parse<T: std::str::FromStr>(attrs: &BTreeMap<String, String>, key: &str) -> Result<T> {
    get(attrs, key)?.parse().map_err(|_| Error::InvalidAttributes(format!("malformed key {key}")))
}

/// Identifies a road within a [`crate::RoadspacesModel`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RoadId(pub u64);

impl RoadId {
    /// Flattens to `{ "road": "<id>" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("road".to_string(), self.0.to_string())])
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> { Ok(RoadId(parse(attrs, "road")?)) }
}

/// Identifies a lane section by its index within a road's ordered section list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LaneSectionId {
    pub road: RoadId,
    pub index: usize,
}

impl LaneSectionId {
    /// Flattens to `{ "road", "section" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = self.road.to_attributes();
        attrs.insert("section".to_string(), self.index.to_string());
        attrs
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> {
        Ok(LaneSectionId { road: RoadId::from_attributes(attrs)?, index: parse(attrs, "section")? })
    }
}

/// Identifies a lane by its signed ID within a lane section.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LaneId {
    pub section: LaneSectionId,
    pub id: i32,
}

impl LaneId {
    /// Flattens to `{ "road", "section", "lane" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = self.section.to_attributes();
        attrs.insert("lane".to_string(), self.id.to_string());
        attrs
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> {
        Ok(LaneId { section: LaneSectionId::from_attributes(attrs)?, id: parse(attrs, "lane")? })
    }
}

/// Identifies a roadspace object within a road.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RoadObjectId(pub u64);

impl RoadObjectId {
    /// Flattens to `{ "object": "<id>" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("object".to_string(), self.0.to_string())])
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> { Ok(RoadObjectId(parse(attrs, "object")?)) }
}

/// Identifies a junction within a [`crate::RoadspacesModel`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JunctionId(pub u64);

impl JunctionId {
    /// Flattens to `{ "junction": "<id>" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("junction".to_string(), self.0.to_string())])
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> { Ok(JunctionId(parse(attrs, "junction")?)) }
}

/// Identifies a connection by its index within a junction's connection list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ConnectionId {
    pub junction: JunctionId,
    pub index: usize,
}

impl ConnectionId {
    /// Flattens to `{ "junction", "connection" }`.
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = self.junction.to_attributes();
        attrs.insert("connection".to_string(), self.index.to_string());
        attrs
    }

    /// Inverse of [`Self::to_attributes`].
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self> {
        Ok(ConnectionId { junction: JunctionId::from_attributes(attrs)?, index: parse(attrs, "connection")? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_id_round_trips_through_attributes() {
        let id = LaneId { section: LaneSectionId { road: RoadId(7), index: 2 }, id: -3 };
        let attrs = id.to_attributes();
        assert_eq!(LaneId::from_attributes(&attrs).unwrap(), id);
    }

    #[test]
    fn connection_id_round_trips_through_attributes() {
        let id = ConnectionId { junction: JunctionId(4), index: 1 };
        let attrs = id.to_attributes();
        assert_eq!(ConnectionId::from_attributes(&attrs).unwrap(), id);
    }

    #[test]
    fn missing_key_fails_to_parse() {
        let attrs = BTreeMap::from([("section".to_string(), "0".to_string())]);
        assert!(RoadId::from_attributes(&attrs).is_err());
    }
}
