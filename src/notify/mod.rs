//! Notification subsystem.
//!
//! - [`bus`]: the publish/subscribe registry with auto-expiry
//! - [`tray`]: the display-side subscriber that mirrors the live set

pub mod bus;
pub mod tray;

pub use bus::{BusEvent, NotificationBus, NotificationDurations, Subscription};
pub use tray::NotificationTray;
