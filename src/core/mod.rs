pub use error::OError;
pub use individual::{Individual, IndividualExport, Individuals, Solution};

mod error;
mod individual;
pub(crate) mod test_utils;
pub(crate) mod utils;
