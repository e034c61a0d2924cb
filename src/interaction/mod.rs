pub mod displacement;
pub mod events;
pub mod gesture;
pub mod parallax;
pub mod throttle;
