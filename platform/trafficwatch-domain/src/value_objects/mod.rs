pub mod aligned;
pub mod period;
pub mod series;
pub mod vehicle_share;
pub mod window;
