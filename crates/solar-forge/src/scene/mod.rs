pub mod belt;
pub mod build;
pub mod graph;
pub mod rng;
pub mod shards;
pub mod stars;

pub use belt::ParticleBelt;
pub use build::{Materials, Ribbon, Ring, SceneNodes, SolarScene};
pub use graph::{NodeId, NodeKind, SceneGraph, Transform};
pub use rng::Rng;
pub use shards::{ShardField, ShardOrbit};
pub use stars::StarField;
