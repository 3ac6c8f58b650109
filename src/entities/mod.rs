pub mod fare;

mod coordinates;
mod driver;
mod ride;
mod rider;

pub use coordinates::Coordinates;
pub use driver::Driver;
pub use fare::{PricingFactors, Quote};
pub use ride::Ride;
pub use rider::Rider;
