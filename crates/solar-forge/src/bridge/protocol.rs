/// Flat f32 buffers handed to the JS renderer.
/// Must stay in sync with the page-side sink that reads them.
///
/// Scene buffer, uploaded once after construction:
/// ```text
/// [Header: 8 floats]
/// [Nodes: node_count × 6 floats]   kind, parent (-1 = root), p0..p3
/// [Belt positions: particles × 3]
/// [Belt colours: particles × 3]    sRGB-encoded, decode before use
/// [Star positions: stars × 3]
/// ```
///
/// Frame buffer, rewritten every frame:
/// ```text
/// [Header: 16 floats]
/// [Node world matrices: node_count × 16 floats]
/// [Shard instance matrices: shard_count × 16 floats]
/// ```
///
/// Matrices are column-major, matching `Matrix4.fromArray`.

use glam::Mat4;

use crate::renderer::camera::PerspectiveCamera;
use crate::scene::{belt, shards, stars, NodeKind, SolarScene};
use crate::scene::build::{BLOOM_RADIUS, CORE_RADIUS};

/// Protocol version written into both headers.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Number of floats in the scene header.
pub const SCENE_HEADER_FLOATS: usize = 8;

/// Scene header field indices.
pub const SCENE_VERSION: usize = 0;
pub const SCENE_NODE_COUNT: usize = 1;
pub const SCENE_PARTICLE_COUNT: usize = 2;
pub const SCENE_SHARD_COUNT: usize = 3;
pub const SCENE_STAR_COUNT: usize = 4;
pub const SCENE_EXPOSURE: usize = 5;

/// Floats per node descriptor: kind, parent, four geometry parameters.
pub const NODE_FLOATS: usize = 6;

/// Number of floats in the frame header.
pub const FRAME_HEADER_FLOATS: usize = 16;

/// Frame header field indices.
pub const FRAME_VERSION: usize = 0;
pub const FRAME_COUNTER: usize = 1;
pub const FRAME_ELAPSED: usize = 2;
pub const FRAME_HOVER: usize = 3;
pub const FRAME_CORE_EMISSIVE: usize = 4;
pub const FRAME_BLOOM_OPACITY: usize = 5;
pub const FRAME_CORONA_OPACITY: usize = 6;
pub const FRAME_FOV: usize = 7;
pub const FRAME_ASPECT: usize = 8;
pub const FRAME_NEAR: usize = 9;
pub const FRAME_FAR: usize = 10;
pub const FRAME_CAMERA_Z: usize = 11;
pub const FRAME_EXPANDED: usize = 12;
pub const FRAME_NODE_COUNT: usize = 13;
pub const FRAME_SHARD_COUNT: usize = 14;

/// Floats per matrix.
pub const MATRIX_FLOATS: usize = 16;

/// Buffer layout for a given scene population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtocolLayout {
    pub node_count: usize,
    pub particle_count: usize,
    pub shard_count: usize,
    pub star_count: usize,

    /// Offset (in floats) of the node descriptors in the scene buffer.
    pub nodes_offset: usize,
    /// Offset (in floats) of the belt positions in the scene buffer.
    pub belt_positions_offset: usize,
    /// Offset (in floats) of the belt colours in the scene buffer.
    pub belt_colors_offset: usize,
    /// Offset (in floats) of the star positions in the scene buffer.
    pub stars_offset: usize,
    pub scene_total_floats: usize,

    /// Offset (in floats) of the node matrices in the frame buffer.
    pub matrices_offset: usize,
    /// Offset (in floats) of the shard instance matrices in the frame buffer.
    pub shards_offset: usize,
    pub frame_total_floats: usize,
}

impl ProtocolLayout {
    pub fn new(
        node_count: usize,
        particle_count: usize,
        shard_count: usize,
        star_count: usize,
    ) -> Self {
        let nodes_offset = SCENE_HEADER_FLOATS;
        let belt_positions_offset = nodes_offset + node_count * NODE_FLOATS;
        let belt_colors_offset = belt_positions_offset + particle_count * 3;
        let stars_offset = belt_colors_offset + particle_count * 3;
        let scene_total_floats = stars_offset + star_count * 3;

        let matrices_offset = FRAME_HEADER_FLOATS;
        let shards_offset = matrices_offset + node_count * MATRIX_FLOATS;
        let frame_total_floats = shards_offset + shard_count * MATRIX_FLOATS;

        Self {
            node_count,
            particle_count,
            shard_count,
            star_count,
            nodes_offset,
            belt_positions_offset,
            belt_colors_offset,
            stars_offset,
            scene_total_floats,
            matrices_offset,
            shards_offset,
            frame_total_floats,
        }
    }

    pub fn for_scene(scene: &SolarScene) -> Self {
        Self::new(
            scene.graph.len(),
            scene.belt.len(),
            scene.shards.len(),
            scene.stars.len(),
        )
    }
}

/// Per-frame values that don't live in the scene itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub counter: u32,
    pub elapsed: f32,
    pub hover: f32,
    pub expanded: bool,
}

/// Geometry parameters for one node, by kind.
fn node_params(scene: &SolarScene, kind: NodeKind, ribbon_ix: &mut usize, ring_ix: &mut usize) -> [f32; 4] {
    match kind {
        NodeKind::Group => [0.0; 4],
        NodeKind::Core => [CORE_RADIUS, 0.0, 0.0, 0.0],
        NodeKind::Bloom => [BLOOM_RADIUS, 0.0, 0.0, 0.0],
        // Unit sprite; the node scale carries its size.
        NodeKind::Corona => [1.0, 0.0, 0.0, 0.0],
        NodeKind::Ribbon => {
            let r = scene.ribbons.get(*ribbon_ix);
            *ribbon_ix += 1;
            r.map_or([0.0; 4], |r| [r.radius, r.tube, r.p as f32, r.q as f32])
        }
        NodeKind::Ring => {
            let r = scene.rings.get(*ring_ix);
            *ring_ix += 1;
            r.map_or([0.0; 4], |r| [r.radius, r.tube, 0.0, 0.0])
        }
        NodeKind::Belt => [belt::POINT_SIZE, belt::OPACITY, 0.0, 0.0],
        NodeKind::Shards => [shards::GEOMETRY_RADIUS, 0.0, 0.0, 0.0],
        NodeKind::Stars => [stars::POINT_SIZE, stars::OPACITY, 0.0, 0.0],
    }
}

/// Serialize the static scene description. Clears and refills `out`.
pub fn pack_scene(scene: &SolarScene, exposure: f32, out: &mut Vec<f32>) -> ProtocolLayout {
    let layout = ProtocolLayout::for_scene(scene);
    out.clear();
    out.resize(layout.scene_total_floats, 0.0);

    out[SCENE_VERSION] = PROTOCOL_VERSION;
    out[SCENE_NODE_COUNT] = layout.node_count as f32;
    out[SCENE_PARTICLE_COUNT] = layout.particle_count as f32;
    out[SCENE_SHARD_COUNT] = layout.shard_count as f32;
    out[SCENE_STAR_COUNT] = layout.star_count as f32;
    out[SCENE_EXPOSURE] = exposure;

    let (mut ribbon_ix, mut ring_ix) = (0, 0);
    for (i, id) in scene.graph.ids().enumerate() {
        let kind = scene.graph.kind(id);
        let base = layout.nodes_offset + i * NODE_FLOATS;
        out[base] = kind.code();
        out[base + 1] = scene.graph.parent(id).map_or(-1.0, |p| p.0 as f32);
        let params = node_params(scene, kind, &mut ribbon_ix, &mut ring_ix);
        out[base + 2..base + NODE_FLOATS].copy_from_slice(&params);
    }

    let positions: &[f32] = bytemuck::cast_slice(&scene.belt.positions);
    out[layout.belt_positions_offset..layout.belt_colors_offset].copy_from_slice(positions);
    let colors: &[f32] = bytemuck::cast_slice(&scene.belt.colors);
    out[layout.belt_colors_offset..layout.stars_offset].copy_from_slice(colors);
    let star_positions: &[f32] = bytemuck::cast_slice(&scene.stars.positions);
    out[layout.stars_offset..].copy_from_slice(star_positions);

    layout
}

/// Serialize the current frame. Reuses `out`'s allocation.
pub fn pack_frame(
    scene: &SolarScene,
    camera: &PerspectiveCamera,
    header: FrameHeader,
    out: &mut Vec<f32>,
) -> ProtocolLayout {
    let layout = ProtocolLayout::for_scene(scene);
    out.clear();
    out.resize(layout.frame_total_floats, 0.0);

    out[FRAME_VERSION] = PROTOCOL_VERSION;
    out[FRAME_COUNTER] = header.counter as f32;
    out[FRAME_ELAPSED] = header.elapsed;
    out[FRAME_HOVER] = header.hover;
    out[FRAME_CORE_EMISSIVE] = scene.materials.core_emissive;
    out[FRAME_BLOOM_OPACITY] = scene.materials.bloom_opacity;
    out[FRAME_CORONA_OPACITY] = scene.materials.corona_opacity;
    out[FRAME_FOV] = camera.fov_deg;
    out[FRAME_ASPECT] = camera.aspect;
    out[FRAME_NEAR] = camera.near;
    out[FRAME_FAR] = camera.far;
    out[FRAME_CAMERA_Z] = camera.distance();
    out[FRAME_EXPANDED] = if header.expanded { 1.0 } else { 0.0 };
    out[FRAME_NODE_COUNT] = layout.node_count as f32;
    out[FRAME_SHARD_COUNT] = layout.shard_count as f32;

    for (i, id) in scene.graph.ids().enumerate() {
        let base = layout.matrices_offset + i * MATRIX_FLOATS;
        out[base..base + MATRIX_FLOATS].copy_from_slice(&scene.graph.world(id).to_cols_array());
    }

    let instances: &[f32] = bytemuck::cast_slice::<Mat4, f32>(scene.shards.matrices());
    out[layout.shards_offset..].copy_from_slice(instances);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{Populations, SceneConfig};
    use crate::scene::NodeId;

    fn small_scene() -> SolarScene {
        SolarScene::build(&Populations { particles: 12, shards: 5, stars: 7 }, 42)
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(15, 100, 20, 50);

        assert_eq!(layout.nodes_offset, SCENE_HEADER_FLOATS);
        assert_eq!(layout.belt_positions_offset, SCENE_HEADER_FLOATS + 15 * NODE_FLOATS);
        assert_eq!(layout.belt_colors_offset, layout.belt_positions_offset + 300);
        assert_eq!(layout.stars_offset, layout.belt_colors_offset + 300);
        assert_eq!(layout.scene_total_floats, layout.stars_offset + 150);

        assert_eq!(layout.matrices_offset, FRAME_HEADER_FLOATS);
        assert_eq!(layout.shards_offset, FRAME_HEADER_FLOATS + 15 * 16);
        assert_eq!(layout.frame_total_floats, layout.shards_offset + 20 * 16);
    }

    #[test]
    fn scene_buffer_describes_every_node() {
        let scene = small_scene();
        let mut buf = Vec::new();
        let layout = pack_scene(&scene, 1.1, &mut buf);

        assert_eq!(buf.len(), layout.scene_total_floats);
        assert_eq!(buf[SCENE_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[SCENE_NODE_COUNT] as usize, scene.graph.len());
        assert_eq!(buf[SCENE_PARTICLE_COUNT], 12.0);
        assert_eq!(buf[SCENE_SHARD_COUNT], 5.0);
        assert_eq!(buf[SCENE_STAR_COUNT], 7.0);
        assert!((buf[SCENE_EXPOSURE] - 1.1).abs() < 1e-6);

        // First node is the solar group root.
        assert_eq!(buf[layout.nodes_offset], NodeKind::Group.code());
        assert_eq!(buf[layout.nodes_offset + 1], -1.0);

        let core = scene.nodes.core;
        let base = layout.nodes_offset + core.0 as usize * NODE_FLOATS;
        assert_eq!(buf[base], NodeKind::Core.code());
        assert_eq!(buf[base + 2], CORE_RADIUS);
    }

    #[test]
    fn ribbon_params_follow_ribbon_order() {
        let scene = small_scene();
        let mut buf = Vec::new();
        let layout = pack_scene(&scene, 1.0, &mut buf);

        for (id, ribbon) in scene.nodes.ribbons.iter().zip(&scene.ribbons) {
            let base = layout.nodes_offset + id.0 as usize * NODE_FLOATS;
            assert_eq!(buf[base], NodeKind::Ribbon.code());
            assert_eq!(buf[base + 2], ribbon.radius);
            assert_eq!(buf[base + 4], ribbon.p as f32);
            assert_eq!(buf[base + 5], ribbon.q as f32);
        }
    }

    #[test]
    fn scene_buffer_carries_point_clouds() {
        let scene = small_scene();
        let mut buf = Vec::new();
        let layout = pack_scene(&scene, 1.0, &mut buf);

        let p0 = scene.belt.positions[0];
        let o = layout.belt_positions_offset;
        assert_eq!(&buf[o..o + 3], &[p0.x, p0.y, p0.z]);

        let c_last = scene.belt.colors[11];
        let o = layout.belt_colors_offset + 11 * 3;
        assert_eq!(&buf[o..o + 3], &[c_last.x, c_last.y, c_last.z]);

        let s = scene.stars.positions[6];
        let o = layout.stars_offset + 6 * 3;
        assert_eq!(&buf[o..o + 3], &[s.x, s.y, s.z]);
    }

    #[test]
    fn frame_buffer_carries_world_matrices_and_shards() {
        let mut scene = small_scene();
        scene.shards.update(1.5);
        scene.graph.propagate();
        let config = SceneConfig::default();
        let camera = PerspectiveCamera::new(
            config.camera.fov_deg,
            config.camera.near,
            config.camera.far,
            config.camera.base_distance,
        );

        let mut buf = Vec::new();
        let header = FrameHeader { counter: 9, elapsed: 1.5, hover: 0.25, expanded: true };
        let layout = pack_frame(&scene, &camera, header, &mut buf);

        assert_eq!(buf.len(), layout.frame_total_floats);
        assert_eq!(buf[FRAME_COUNTER], 9.0);
        assert_eq!(buf[FRAME_HOVER], 0.25);
        assert_eq!(buf[FRAME_EXPANDED], 1.0);
        assert_eq!(buf[FRAME_CAMERA_Z], config.camera.base_distance);
        assert_eq!(buf[FRAME_NODE_COUNT] as usize, scene.graph.len());

        let id = NodeId(2);
        let base = layout.matrices_offset + 2 * MATRIX_FLOATS;
        assert_eq!(&buf[base..base + 16], &scene.graph.world(id).to_cols_array());

        let last = scene.shards.len() - 1;
        let base = layout.shards_offset + last * MATRIX_FLOATS;
        assert_eq!(&buf[base..base + 16], &scene.shards.matrices()[last].to_cols_array());
    }

    #[test]
    fn frame_buffer_reuses_allocation() {
        let scene = small_scene();
        let camera = PerspectiveCamera::new(40.0, 0.1, 1000.0, 4.6);
        let header = FrameHeader { counter: 0, elapsed: 0.0, hover: 0.0, expanded: false };
        let mut buf = Vec::new();
        pack_frame(&scene, &camera, header, &mut buf);
        let cap = buf.capacity();
        pack_frame(&scene, &camera, FrameHeader { counter: 1, ..header }, &mut buf);
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf[FRAME_EXPANDED], 0.0);
    }
}
