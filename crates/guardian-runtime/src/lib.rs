//! Guardian Runtime - Monitoring session and per-frame loop
//!
//! One call to [`MonitorSession::tick`] runs the whole pipeline for a frame:
//! 1. Update playback position (monotonic)
//! 2. On whole-second boundaries: sitting monitor + display update
//! 3. Smooth landmarks (absent person resets the smoother)
//! 4. Classify raw posture
//! 5. Stabilize (jitter filter, fast fall path)
//! 6. Emit an event on confirmed transitions
//!
//! The scheduler is the caller's: a frame callback, a timer, or a test loop.

pub mod analysis;
pub mod config;
pub mod emitter;
pub mod session;
pub mod sitting;
pub mod stabilizer;
pub mod telemetry;

pub use analysis::*;
pub use config::*;
pub use emitter::*;
pub use session::*;
pub use sitting::*;
pub use stabilizer::*;
pub use telemetry::*;
