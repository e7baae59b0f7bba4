pub mod config;
pub mod error;
pub mod import;
pub mod math;
pub mod pick;
pub mod scene;
pub mod selection;
pub mod tessellation;
pub mod topology;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{FacepickError, Result};
pub use selection::{FaceId, SelectionMode, SelectionState, VolumeFaceMap, VolumeId};
pub use viewer::Viewer;
