//! Platform-free logic behind the hotspot overlay and the promo banner.
//!
//! Nothing in here touches the DOM or a rendering context. The web front-end
//! supplies the camera, the occluding mesh and the marker elements through the
//! traits in [`scene`], and applies the [`OverlayCommand`]s the controller
//! emits.

pub mod anchor;
pub mod banner;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod label;
pub mod mesh;
pub mod occlusion;
pub mod pose;
pub mod scene;

pub use anchor::*;
pub use banner::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use label::*;
pub use mesh::{MeshSide, TriangleMesh};
pub use occlusion::*;
pub use pose::*;
pub use scene::*;
