pub mod aggregate;

pub use aggregate::{Mandate, MandateDto, MandateId};
