//! Junctions and connections linking lanes across roads (spec §3
//! "Junction", §4.4 "Lane-topology resolution").

use crate::identifier::{ConnectionId, JunctionId, RoadId};
use crate::road::ContactPoint;
use std::collections::BTreeMap;

/// Links incoming-road lanes to connecting-road lanes inside a junction.
#[derive(Clone, Debug)]
pub struct Connection {
    id: ConnectionId,
    incoming_road: RoadId,
    connecting_road: RoadId,
    contact_point: ContactPoint,
    lane_links: BTreeMap<i32, i32>,
}

impl Connection {
    /// Builds a connection. `lane_links` maps an incoming-road lane ID to
    /// the connecting-road lane ID it continues as.
    pub fn new(
        id: ConnectionId,
        incoming_road: RoadId,
        connecting_road: RoadId,
        contact_point: ContactPoint,
        lane_links: BTreeMap<i32, i32>,
    ) -> Self {
        Connection { id, incoming_road, connecting_road, contact_point, lane_links }
    }

    pub fn id(&self) -> ConnectionId { self.id }
    pub fn incoming_road(&self) -> RoadId { self.incoming_road }
    pub fn connecting_road(&self) -> RoadId { self.connecting_road }
    pub fn contact_point(&self) -> ContactPoint { self.contact_point }
    pub fn lane_links(&self) -> &BTreeMap<i32, i32> { &self.lane_links }

    /// The connecting-road lane that incoming lane `lane` continues as, if
    /// the link table contains an entry for it (spec §8 testable property:
    /// `c.getSuccessorLane(L) = Some(L')`, `None` for any other lane).
    pub fn get_successor_lane(&self, lane: i32) -> Option<i32> { self.lane_links.get(&lane).copied() }

    /// The incoming-road lane that continues as connecting-road lane
    /// `lane`, i.e. the reverse of [`Self::get_successor_lane`]. `lane_links`
    /// is one-to-one in practice, so the first matching key is returned.
    pub fn get_predecessor_lane(&self, lane: i32) -> Option<i32> {
        self.lane_links.iter().find(|(_, &v)| v == lane).map(|(&k, _)| k)
    }
}

/// A junction: a set of [`Connection`]s between an incoming road and one or
/// more connecting roads.
#[derive(Clone, Debug, Default)]
pub struct Junction {
    id_seed: Option<JunctionId>,
    connections: Vec<Connection>,
}

impl Junction {
    /// Builds an empty junction with the given ID.
    pub fn new(id: JunctionId) -> Self { Junction { id_seed: Some(id), connections: Vec::new() } }

    pub fn id(&self) -> JunctionId { self.id_seed.expect("constructed via Junction::new") }

    /// Appends a connection built from this junction's ID and the next
    /// connection index.
    pub fn push_connection(
        &mut self,
        incoming_road: RoadId,
        connecting_road: RoadId,
        contact_point: ContactPoint,
        lane_links: BTreeMap<i32, i32>,
    ) -> ConnectionId {
        let id = ConnectionId { junction: self.id(), index: self.connections.len() };
        self.connections.push(Connection::new(id, incoming_road, connecting_road, contact_point, lane_links));
        id
    }

    /// All connections, in the order they were added (spec §4.4: this
    /// order is the tie-break for multi-successor merges).
    pub fn connections(&self) -> &[Connection] { &self.connections }

    /// Connections whose incoming road is `road`, in connection-list order.
    pub fn connections_from(&self, road: RoadId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.incoming_road() == road)
    }

    /// Connections whose connecting road is `road`, in connection-list
    /// order — the counterpart to [`Self::connections_from`] used when
    /// walking a junction backward from the connecting side.
    pub fn connections_to(&self, road: RoadId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.connecting_road() == road)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_lane_lookup_matches_link_table_exactly() {
        let mut junction = Junction::new(JunctionId(0));
        let links = BTreeMap::from([(-1, -2)]);
        junction.push_connection(RoadId(1), RoadId(2), ContactPoint::Start, links);
        let connection = &junction.connections()[0];
        assert_eq!(connection.get_successor_lane(-1), Some(-2));
        assert_eq!(connection.get_successor_lane(1), None);
        assert_eq!(connection.get_predecessor_lane(-2), Some(-1));
        assert_eq!(connection.get_predecessor_lane(1), None);
    }

    #[test]
    fn connections_to_filters_by_connecting_road() {
        let mut junction = Junction::new(JunctionId(0));
        junction.push_connection(RoadId(1), RoadId(2), ContactPoint::Start, BTreeMap::from([(-1, -2)]));
        junction.push_connection(RoadId(3), RoadId(4), ContactPoint::Start, BTreeMap::from([(-1, -3)]));
        let found: Vec<_> = junction.connections_to(RoadId(2)).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].incoming_road(), RoadId(1));
    }
}
