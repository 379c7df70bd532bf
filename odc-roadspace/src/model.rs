//! The central model owning arenas of [`Road`], [`Junction`] and
//! [`RoadspaceObject`], addressed only by key (spec Design Notes §9: "Model
//! identifiers are opaque keys; component lookups go through a central
//! `RoadspacesModel`... Cross-references are stored as keys, never as
//! direct owning links").

use crate::error::{Error, Result};
use crate::identifier::{JunctionId, RoadId, RoadObjectId};
use crate::junction::Junction;
use crate::road::Road;
use crate::roadspace_object::RoadspaceObject;
use rustc_hash::FxHashMap;

/// Owns every [`Road`], [`Junction`] and [`RoadspaceObject`] in one
/// OpenDRIVE dataset. Entities are built once and never mutated (spec §3
/// "Lifecycle"); cross-references between them are [`RoadId`]/
/// [`JunctionId`]/[`RoadObjectId`] keys resolved back through this model.
#[derive(Clone, Debug, Default)]
pub struct RoadspacesModel {
    roads: FxHashMap<RoadId, Road>,
    junctions: FxHashMap<JunctionId, Junction>,
    objects: FxHashMap<RoadObjectId, RoadspaceObject>,
    next_road: u64,
    next_junction: u64,
    next_object: u64,
}

impl RoadspacesModel {
    /// An empty model.
    pub fn new() -> Self { RoadspacesModel::default() }

    /// Allocates the next [`RoadId`] and inserts `build(id)`'s result.
    pub fn insert_road(&mut self, build: impl FnOnce(RoadId) -> Road) -> RoadId {
        let id = RoadId(self.next_road);
        self.next_road += 1;
        self.roads.insert(id, build(id));
        id
    }

    /// Allocates the next [`JunctionId`] and inserts `build(id)`'s result.
    pub fn insert_junction(&mut self, build: impl FnOnce(JunctionId) -> Junction) -> JunctionId {
        let id = JunctionId(self.next_junction);
        self.next_junction += 1;
        self.junctions.insert(id, build(id));
        id
    }

    /// Allocates the next [`RoadObjectId`] and inserts `build(id)`'s result.
    pub fn insert_object(&mut self, build: impl FnOnce(RoadObjectId) -> RoadspaceObject) -> RoadObjectId {
        let id = RoadObjectId(self.next_object);
        self.next_object += 1;
        self.objects.insert(id, build(id));
        id
    }

    pub fn road(&self, id: RoadId) -> Result<&Road> { self.roads.get(&id).ok_or(Error::UnknownRoad(id)) }
    pub fn junction(&self, id: JunctionId) -> Result<&Junction> { self.junctions.get(&id).ok_or(Error::UnknownJunction(id)) }
    pub fn object(&self, id: RoadObjectId) -> Result<&RoadspaceObject> {
        self.objects.get(&id).ok_or(Error::UnknownRoadObject(id))
    }

    /// All roads, in arbitrary (hash-map) order; callers that need a
    /// deterministic order should sort by [`RoadId`].
    pub fn roads(&self) -> impl Iterator<Item = &Road> { self.roads.values() }
    /// All junctions, in arbitrary order.
    pub fn junctions(&self) -> impl Iterator<Item = &Junction> { self.junctions.values() }
    /// All roadspace objects, in arbitrary order.
    pub fn objects(&self) -> impl Iterator<Item = &RoadspaceObject> { self.objects.values() }
}
