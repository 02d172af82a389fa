pub mod protocol;

pub use protocol::{pack_frame, pack_scene, FrameHeader, ProtocolLayout, PROTOCOL_VERSION};
