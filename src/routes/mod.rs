mod fetch_studies;
mod health_check;

pub use fetch_studies::*;
pub use health_check::*;
