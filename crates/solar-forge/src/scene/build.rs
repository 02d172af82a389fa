//! One-shot construction of the solar scene graph.
//!
//! Tree layout (insertion order, which the wire protocol relies on):
//!
//! ```text
//! solar (group)
//! ├── core, bloom, corona
//! ├── ribbons (group) ── ribbon × 3
//! ├── rings (group)   ── ring × 3
//! ├── belt
//! └── shards
//! stars (root)
//! ```

use std::f32::consts::PI;

use glam::Vec3;

use crate::api::config::Populations;

use super::belt::ParticleBelt;
use super::graph::{NodeId, NodeKind, SceneGraph, Transform};
use super::rng::Rng;
use super::shards::ShardField;
use super::stars::StarField;

pub const RIBBON_COUNT: usize = 3;
pub const RING_COUNT: usize = 3;

pub const CORE_RADIUS: f32 = 0.9;
pub const BLOOM_RADIUS: f32 = 1.02;
pub const CORONA_SIZE: f32 = 4.5;

const RING_TILTS: [Vec3; RING_COUNT] = [
    Vec3::new(PI * 0.15, 0.0, 0.0),
    Vec3::new(PI * 0.2, PI * 0.3, PI * 0.1),
    Vec3::new(PI * 0.1, PI * 0.5, PI * 0.15),
];

/// Torus-knot ribbon with a fixed spin assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    pub radius: f32,
    pub tube: f32,
    pub p: u32,
    pub q: u32,
    /// Orientation at t = 0.
    pub base_rotation: Vec3,
    /// Signed spin in radians per second about Y; X spins at half this rate.
    pub spin: f32,
}

impl Ribbon {
    /// Rotation after `elapsed` seconds.
    pub fn rotation_at(&self, elapsed: f32) -> Vec3 {
        self.base_rotation + Vec3::new(self.spin * 0.5, self.spin, 0.0) * elapsed
    }
}

/// Thin torus ring held at a static tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub tube: f32,
    pub tilt: Vec3,
}

/// Values the frame loop drives on the scene's materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Materials {
    pub core_emissive: f32,
    pub bloom_opacity: f32,
    pub corona_opacity: f32,
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            core_emissive: 1.2,
            bloom_opacity: 0.45,
            corona_opacity: 0.55,
        }
    }
}

/// Handles to the nodes the frame loop touches.
#[derive(Debug, Clone)]
pub struct SceneNodes {
    pub solar: NodeId,
    pub core: NodeId,
    pub bloom: NodeId,
    pub corona: NodeId,
    pub ribbon_group: NodeId,
    pub ribbons: Vec<NodeId>,
    pub ring_group: NodeId,
    pub rings: Vec<NodeId>,
    pub belt: NodeId,
    pub shards: NodeId,
    pub stars: NodeId,
}

/// The whole solar scene: graph, per-node parameters and point/instance data.
#[derive(Debug, Clone)]
pub struct SolarScene {
    pub graph: SceneGraph,
    pub nodes: SceneNodes,
    pub ribbons: Vec<Ribbon>,
    pub rings: Vec<Ring>,
    pub belt: ParticleBelt,
    pub shards: ShardField,
    pub stars: StarField,
    pub materials: Materials,
}

impl SolarScene {
    pub fn build(populations: &Populations, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut graph = SceneGraph::new();

        let solar = graph.add(NodeKind::Group, None, Transform::IDENTITY);
        let core = graph.add(NodeKind::Core, Some(solar), Transform::IDENTITY);
        let bloom = graph.add(NodeKind::Bloom, Some(solar), Transform::IDENTITY);
        let corona = graph.add(
            NodeKind::Corona,
            Some(solar),
            Transform::IDENTITY.with_scale(Vec3::new(CORONA_SIZE, CORONA_SIZE, 1.0)),
        );

        let ribbon_group = graph.add(NodeKind::Group, Some(solar), Transform::IDENTITY);
        let ribbons: Vec<Ribbon> = (0..RIBBON_COUNT)
            .map(|i| {
                let base_rotation = Vec3::new(
                    rng.next_f32() * PI * 0.3,
                    rng.next_f32() * PI,
                    rng.next_f32() * PI * 0.3,
                );
                let spin = (rng.next_f32() * 0.35 + 0.15) * rng.sign();
                Ribbon {
                    radius: 1.8 + i as f32 * 0.25,
                    tube: 0.055 + i as f32 * 0.01,
                    p: 2 + i as u32,
                    q: 3,
                    base_rotation,
                    spin,
                }
            })
            .collect();
        let ribbon_ids = ribbons
            .iter()
            .map(|r| {
                graph.add(
                    NodeKind::Ribbon,
                    Some(ribbon_group),
                    Transform::IDENTITY.with_rotation(r.base_rotation),
                )
            })
            .collect();

        let ring_group = graph.add(NodeKind::Group, Some(solar), Transform::IDENTITY);
        let rings: Vec<Ring> = RING_TILTS
            .iter()
            .enumerate()
            .map(|(i, tilt)| Ring {
                radius: 1.9 + i as f32 * 0.25,
                tube: 0.02 + i as f32 * 0.01,
                tilt: *tilt,
            })
            .collect();
        let ring_ids = rings
            .iter()
            .map(|r| {
                graph.add(
                    NodeKind::Ring,
                    Some(ring_group),
                    Transform::IDENTITY.with_rotation(r.tilt),
                )
            })
            .collect();

        let belt_data = ParticleBelt::generate(populations.particles, &mut rng);
        let belt = graph.add(NodeKind::Belt, Some(solar), Transform::IDENTITY);

        let shard_field = ShardField::generate(populations.shards, &mut rng);
        let shards = graph.add(NodeKind::Shards, Some(solar), Transform::IDENTITY);

        let star_field = StarField::generate(populations.stars, &mut rng);
        let stars = graph.add(NodeKind::Stars, None, Transform::IDENTITY);

        graph.propagate();

        log::info!(
            "solar scene built: {} particles, {} shards, {} stars, {} nodes",
            belt_data.len(),
            shard_field.len(),
            star_field.len(),
            graph.len()
        );

        Self {
            graph,
            nodes: SceneNodes {
                solar,
                core,
                bloom,
                corona,
                ribbon_group,
                ribbons: ribbon_ids,
                ring_group,
                rings: ring_ids,
                belt,
                shards,
                stars,
            },
            ribbons,
            rings,
            belt: belt_data,
            shards: shard_field,
            stars: star_field,
            materials: Materials::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populations() -> Populations {
        Populations {
            particles: 120,
            shards: 30,
            stars: 80,
        }
    }

    #[test]
    fn builds_expected_tree() {
        let scene = SolarScene::build(&populations(), 42);
        let g = &scene.graph;
        let n = &scene.nodes;

        assert_eq!(g.len(), 4 + 1 + RIBBON_COUNT + 1 + RING_COUNT + 3);
        assert_eq!(g.parent(n.solar), None);
        assert_eq!(g.parent(n.stars), None);
        assert_eq!(g.children(n.ribbon_group).len(), RIBBON_COUNT);
        assert_eq!(g.children(n.ring_group).len(), RING_COUNT);
        assert_eq!(g.parent(n.shards), Some(n.solar));
        assert_eq!(g.kind(n.corona), NodeKind::Corona);
    }

    #[test]
    fn populations_respected() {
        let scene = SolarScene::build(&populations(), 42);
        assert_eq!(scene.belt.len(), 120);
        assert_eq!(scene.shards.len(), 30);
        assert_eq!(scene.stars.len(), 80);
    }

    #[test]
    fn same_seed_same_scene() {
        let a = SolarScene::build(&populations(), 9);
        let b = SolarScene::build(&populations(), 9);
        assert_eq!(a.ribbons, b.ribbons);
        assert_eq!(a.belt.positions, b.belt.positions);
        assert_eq!(a.shards.matrices(), b.shards.matrices());
    }

    #[test]
    fn ribbon_spin_is_bounded_and_signed() {
        let scene = SolarScene::build(&populations(), 1234);
        for r in &scene.ribbons {
            assert!(r.spin.abs() >= 0.15 && r.spin.abs() <= 0.5, "spin {}", r.spin);
        }
    }

    #[test]
    fn rings_keep_static_tilt() {
        let scene = SolarScene::build(&populations(), 1);
        for (id, ring) in scene.nodes.rings.iter().zip(&scene.rings) {
            assert_eq!(scene.graph.local(*id).rotation, ring.tilt);
        }
    }
}
