mod acquisition;
mod detection;
mod rect;
mod template;
mod track_state;

pub use acquisition::{Acquisition, AcquisitionConfig, Decision, SkipReason, StopReason, Target};
pub use detection::{Detection, TrackUpdate};
pub use rect::Rect;
pub use template::{TemplateConfig, TemplateError, TemplateTracker};
pub use track_state::AcquisitionState;
