//! Capability traits the quality controller sees the scene through, plus a
//! concrete model node for hosts and tests.

use glam::Mat4;
use vitrine_assets::{DerivativeSet, QualityTier};
use vitrine_math::Aabb;

use crate::Camera;

/// The narrow surface of one visible model instance.
///
/// The quality controller reads geometry and streaming state through this
/// trait and mutates exactly one thing: the committed quality tier.
/// Everything else (entity lifecycle, transform authority, asset fetch)
/// belongs to the scene graph and loader.
pub trait QualityTarget {
    /// Local-space bounding box of the model's geometry.
    fn local_bounds(&self) -> Aabb;

    /// Transform chain from the root ancestor down to the model itself.
    ///
    /// Returned fresh on every call; callers must not cache the composed
    /// world matrix across ticks, since ancestors may still be settling
    /// while the model loads.
    fn transform_path(&self) -> &[Mat4];

    /// Which quality tiers actually have a backing asset.
    fn derivatives(&self) -> &DerivativeSet;

    /// The currently committed quality tier.
    fn current_tier(&self) -> QualityTier;

    /// Commit a new quality tier, triggering an asset fetch in the host.
    fn set_tier(&mut self, tier: QualityTier);

    /// Whether an asset fetch for this model is still in flight.
    fn is_loading(&self) -> bool;
}

/// Scene-graph query surface consumed once per gated tick.
///
/// Implementations must hand back a stable snapshot: the target slice may
/// not change identity or order for the duration of one evaluation.
pub trait Scene {
    type Target: QualityTarget;

    /// The camera the scene is currently rendered through, if any.
    fn active_camera(&self) -> Option<Camera>;

    /// All model instances visible this tick, in stable discovery order.
    fn visible_targets_mut(&mut self) -> &mut [Self::Target];
}

/// A plain model node: geometry bounds, an ancestor transform chain, and
/// streaming state. The reference [`QualityTarget`] implementation.
#[derive(Debug, Clone)]
pub struct ModelNode {
    bounds: Aabb,
    transform_path: Vec<Mat4>,
    derivatives: DerivativeSet,
    tier: QualityTier,
    loading: bool,
}

impl ModelNode {
    /// Create a node with the given local bounds and a single transform.
    pub fn new(bounds: Aabb, transform: Mat4) -> Self {
        Self {
            bounds,
            transform_path: vec![transform],
            derivatives: DerivativeSet::full(),
            tier: QualityTier::Thumb,
            loading: false,
        }
    }

    /// Replace the ancestor transform chain (root first).
    pub fn with_transform_path(mut self, path: Vec<Mat4>) -> Self {
        self.transform_path = path;
        self
    }

    /// Restrict which tiers this node's derivative registry offers.
    pub fn with_derivatives(mut self, derivatives: DerivativeSet) -> Self {
        self.derivatives = derivatives;
        self
    }

    /// Set the committed tier without going through the controller.
    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = tier;
        self
    }

    /// Mark an asset fetch as in flight (normally done by the loader).
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

impl QualityTarget for ModelNode {
    fn local_bounds(&self) -> Aabb {
        self.bounds
    }

    fn transform_path(&self) -> &[Mat4] {
        &self.transform_path
    }

    fn derivatives(&self) -> &DerivativeSet {
        &self.derivatives
    }

    fn current_tier(&self) -> QualityTier {
        self.tier
    }

    fn set_tier(&mut self, tier: QualityTier) {
        self.tier = tier;
    }

    fn is_loading(&self) -> bool {
        self.loading
    }
}

/// A flat scene: one optional camera and a list of model nodes.
#[derive(Debug, Clone, Default)]
pub struct SimpleScene {
    /// Active camera, if the scene is currently viewable.
    pub camera: Option<Camera>,
    /// Visible models in discovery order.
    pub nodes: Vec<ModelNode>,
}

impl SimpleScene {
    /// Create a scene with a camera and no models.
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera: Some(camera),
            nodes: Vec::new(),
        }
    }
}

impl Scene for SimpleScene {
    type Target = ModelNode;

    fn active_camera(&self) -> Option<Camera> {
        self.camera.clone()
    }

    fn visible_targets_mut(&mut self) -> &mut [ModelNode] {
        &mut self.nodes
    }
}
