pub mod controller;
pub mod locale;
pub mod metrics;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod storage;

pub use crate::controller::{PageController, PageControllerBuilder};
