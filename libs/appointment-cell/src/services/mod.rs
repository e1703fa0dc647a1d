pub mod booking;
pub mod notification;
pub mod validation;

pub use booking::{BookingService, STANDARD_TIME_SLOTS};
pub use notification::{
    dispatch_in_background, Channel, Notification, NotificationDispatcher, TracingNotifier,
};
