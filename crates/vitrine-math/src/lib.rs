//! Math support for the vitrine viewer: f32 bounding boxes, transform-chain
//! composition, and normalized-device-coordinate projection helpers.

mod aabb;
mod ndc;

pub use aabb::{Aabb, compose_chain};
pub use ndc::{NdcRect, project_point};
