pub mod reports;
pub mod util;
