//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod dashboard;
pub mod lcd;
pub mod notifier;

pub use control::control_task;
pub use dashboard::dashboard_task;
pub use lcd::lcd_task;
pub use notifier::notifier_task;
