mod page;
mod ride;

pub use page::Page;
pub use ride::{NewRide, Ride, RideSubmission};
