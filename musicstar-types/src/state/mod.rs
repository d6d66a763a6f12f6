pub mod lane;
pub mod pattern;
pub mod playhead;
pub mod sequencer;

pub use lane::*;
pub use pattern::Pattern;
pub use playhead::{Playhead, Traversal};
pub use sequencer::*;
