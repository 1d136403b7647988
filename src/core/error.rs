use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("The population to select from is not set")]
    NullInput,
    #[error("The population to select from is empty")]
    EmptyInput,
    #[error("The population size ({0}) is smaller than the number of solutions to select ({1})")]
    InsufficientPopulation(usize, usize),
    #[error("The population is not valid: {0}")]
    InvalidInput(String),
    #[error("NaN detected when adding {0} '{1}'. This may be an error in the user-defined evaluation function")]
    NaN(String, String),
    #[error("The {0} index {1} does not exist")]
    NonExistingIndex(String, usize),
    #[error("An error occurred in the comparison operator '{0}': {1}")]
    ComparisonOperator(String, String),
    #[error("An error occurred in the selector operator '{0}': {1}")]
    SelectorOperator(String, String),
    #[error("An error occurred when exporting the selection data: {0}")]
    SelectionExport(String),
}
