pub mod types;
pub mod traits;
pub mod factory;
pub mod standard;
pub mod yandex;
mod http;


pub use types::*;
pub use traits::*;
pub use factory::{LocatorFactory, UnifiedLocator};
