//! Out-of-band notification delivery.

mod queue;

pub use queue::{DispatchStats, NotificationQueue, NotificationQueueConfig};
