//! Scene graph standing in for the host engine.
//!
//! Nodes are named, optionally parented, and carry a single collision shape.
//! Gameplay code only talks to the world through ray picks, collision-aware
//! moves and overlap queries on this type.

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use log::debug;

use crate::game::constants::*;
use crate::game::physics::collision::{self, Aabb, Ray};

/// Gap left between a moving body and the solid it was clipped against.
const COLLISION_SKIN: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Upward facing plane patch. Its collision volume extends one unit below.
    Ground { width: f32, depth: f32 },
    Box { half_extents: Vec3 },
    /// Vertical capsule centred on the node position.
    Capsule { radius: f32, height: f32 },
    Sphere { radius: f32 },
}

impl Shape {
    fn local_bounds(&self) -> Aabb {
        match *self {
            Shape::Ground { width, depth } => Aabb {
                min: Vec3::new(-width * 0.5, -1.0, -depth * 0.5),
                max: Vec3::new(width * 0.5, 0.0, depth * 0.5),
            },
            Shape::Box { half_extents } => Aabb::from_center_half_extents(Vec3::ZERO, half_extents),
            Shape::Capsule { radius, height } => {
                Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(radius, height * 0.5, radius))
            }
            Shape::Sphere { radius } => Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(radius)),
        }
    }

    fn intersect_ray(&self, ray: &Ray, position: Vec3) -> Option<f32> {
        match *self {
            Shape::Ground { width, depth } => collision::ray_ground(ray, position, width, depth),
            Shape::Box { half_extents } => {
                collision::ray_aabb(ray, &Aabb::from_center_half_extents(position, half_extents))
            }
            Shape::Capsule { radius, height } => collision::ray_capsule(ray, position, radius, height),
            Shape::Sphere { radius } => collision::ray_sphere(ray, position, radius),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    /// Relative to the parent, or to the world for root nodes.
    pub position: Vec3,
    pub shape: Shape,
    pub pickable: bool,
    pub check_collisions: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, position: Vec3, shape: Shape) -> Self {
        Self {
            name: name.into(),
            parent: None,
            position,
            shape,
            pickable: true,
            check_collisions: true,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.name.starts_with(WALL_PREFIX)
    }

    pub fn is_ground(&self) -> bool {
        self.name == GROUND_NAME
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickInfo {
    pub hit: bool,
    pub distance: f32,
    pub picked_point: Option<Vec3>,
    pub picked_node: Option<NodeId>,
}

impl PickInfo {
    fn miss() -> Self {
        Self {
            hit: false,
            distance: 0.0,
            picked_point: None,
            picked_node: None,
        }
    }
}

#[derive(Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walled arena: ground patch, four boundary walls and four cover pillars.
    pub fn arena() -> Self {
        let mut scene = Self::new();
        let half = ARENA_SIZE * 0.5;
        let wall_y = WALL_HEIGHT * 0.5;
        let t = WALL_THICKNESS * 0.5;

        scene.add(Node::new(
            GROUND_NAME,
            Vec3::ZERO,
            Shape::Ground {
                width: ARENA_SIZE,
                depth: ARENA_SIZE,
            },
        ));

        let walls = [
            ("wall_north", Vec3::new(0.0, wall_y, half + t), Vec3::new(half + 2.0 * t, wall_y, t)),
            ("wall_south", Vec3::new(0.0, wall_y, -half - t), Vec3::new(half + 2.0 * t, wall_y, t)),
            ("wall_east", Vec3::new(half + t, wall_y, 0.0), Vec3::new(t, wall_y, half)),
            ("wall_west", Vec3::new(-half - t, wall_y, 0.0), Vec3::new(t, wall_y, half)),
        ];
        for (name, center, half_extents) in walls {
            scene.add(Node::new(name, center, Shape::Box { half_extents }));
        }

        let pillar_half = Vec3::new(1.5, 2.0, 1.5);
        for (i, (x, z)) in [(20.0, 20.0), (-20.0, 20.0), (20.0, -20.0), (-20.0, -20.0)].into_iter().enumerate() {
            scene.add(Node::new(
                format!("wall_pillar_{i}"),
                Vec3::new(x, pillar_half.y, z),
                Shape::Box {
                    half_extents: pillar_half,
                },
            ));
        }

        debug!("arena scene built with {} nodes", scene.len());
        scene
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes the node and every descendant. Unknown ids are ignored.
    pub fn dispose(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            return;
        }

        let doomed: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|&candidate| self.is_descendant_or_self(candidate, id))
            .collect();

        for node in doomed {
            self.nodes.remove(&node);
        }
    }

    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) {
            current = parent;
        }
        current
    }

    pub fn is_descendant_or_self(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.nodes.get(&node_id).and_then(|n| n.parent);
        }
        false
    }

    pub fn absolute_position(&self, id: NodeId) -> Option<Vec3> {
        let mut node = self.nodes.get(&id)?;
        let mut position = node.position;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            position += node.position;
        }
        Some(position)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    pub fn bounds(&self, id: NodeId) -> Option<Aabb> {
        let position = self.absolute_position(id)?;
        let node = self.nodes.get(&id)?;
        Some(node.shape.local_bounds().translated(position))
    }

    /// Nearest node accepted by `predicate` along the ray.
    pub fn pick_with_ray<F>(&self, ray: &Ray, predicate: F) -> PickInfo
    where
        F: Fn(NodeId, &Node) -> bool,
    {
        let mut closest: Option<(NodeId, f32)> = None;

        for (&id, node) in &self.nodes {
            if !predicate(id, node) {
                continue;
            }
            let Some(position) = self.absolute_position(id) else {
                continue;
            };
            if let Some(distance) = node.shape.intersect_ray(ray, position) {
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((id, distance));
                }
            }
        }

        match closest {
            Some((id, distance)) => PickInfo {
                hit: true,
                distance,
                picked_point: Some(ray.at(distance)),
                picked_node: Some(id),
            },
            None => PickInfo::miss(),
        }
    }

    /// Moves a root node by `delta`, sliding along solids one axis at a time.
    /// Returns the new position.
    pub fn move_with_collisions(&mut self, id: NodeId, delta: Vec3) -> Vec3 {
        let Some(mut body) = self.bounds(id) else {
            return Vec3::ZERO;
        };
        let solids = self.solids_around(id);

        let mut applied = Vec3::ZERO;
        for axis in [1, 0, 2] {
            let mut step = delta[axis];
            if step == 0.0 {
                continue;
            }
            for solid in &solids {
                step = collision::clip_axis(&body, solid, axis, step, COLLISION_SKIN);
            }
            let mut offset = Vec3::ZERO;
            offset[axis] = step;
            body = body.translated(offset);
            applied[axis] = step;
        }

        let Some(node) = self.nodes.get_mut(&id) else {
            return applied;
        };
        node.position += applied;
        node.position
    }

    /// Pushes a root node out of every solid it overlaps, each time along the
    /// shallowest axis. Returns the new position.
    pub fn resolve_overlaps(&mut self, id: NodeId) -> Vec3 {
        let Some(mut body) = self.bounds(id) else {
            return Vec3::ZERO;
        };

        let mut offset = Vec3::ZERO;
        for solid in self.solids_around(id) {
            if body.intersects(&solid) {
                let push = collision::separation(&body, &solid, COLLISION_SKIN);
                body = body.translated(push);
                offset += push;
            }
        }

        let Some(node) = self.nodes.get_mut(&id) else {
            return offset;
        };
        if offset != Vec3::ZERO {
            debug!("node {id} pushed out of solids by {offset}");
        }
        node.position += offset;
        node.position
    }

    /// Bounds of every colliding node other than `id` and its descendants.
    fn solids_around(&self, id: NodeId) -> Vec<Aabb> {
        self.nodes
            .iter()
            .filter(|&(&other, node)| node.check_collisions && !self.is_descendant_or_self(other, id))
            .filter_map(|(&other, _)| self.bounds(other))
            .collect()
    }

    /// First node accepted by `predicate` whose bounds touch the sphere.
    pub fn first_intersecting_sphere<F>(&self, center: Vec3, radius: f32, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.nodes
            .iter()
            .filter(|&(_, node)| predicate(node))
            .map(|(&id, _)| id)
            .find(|&id| self.bounds(id).map_or(false, |b| b.intersects_sphere(center, radius)))
    }
}
