pub mod controller;
pub mod process_checker;
pub mod signals;

pub use controller::LifecycleController;
pub use signals::parse_signal;
