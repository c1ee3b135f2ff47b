//! Scene-facing surface of the vitrine viewer: the camera, the narrow
//! capability trait the quality controller sees models through, and a
//! simple concrete scene for hosts and tests.
//!
//! The controller deliberately does not know the scene graph's node
//! hierarchy; it only consumes [`QualityTarget`] and [`Scene`].

mod camera;
mod node;

pub use camera::Camera;
pub use node::{ModelNode, QualityTarget, Scene, SimpleScene};
