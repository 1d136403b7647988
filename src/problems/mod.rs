use rand::Rng;

use crate::core::utils::get_rng;
use crate::core::{Individual, OError};
pub use srinivas::SrinivasProblem;
pub use water::WaterProblem;

mod srinivas;
mod water;

/// A problem with real decision variables, used to generate evaluated populations for the
/// selection operators.
pub trait BenchmarkProblem {
    /// The problem name.
    ///
    /// returns: `String`
    fn name(&self) -> String;

    /// The lower and upper bounds of each variable.
    ///
    /// returns: `Vec<(f64, f64)>`
    fn variable_bounds(&self) -> Vec<(f64, f64)>;

    /// The number of objectives.
    ///
    /// returns: `usize`
    fn number_of_objectives(&self) -> usize;

    /// Calculate the objectives and the constraint violation of a solution. This returns an error
    /// if the number of variables is wrong or an objective is NaN.
    ///
    /// # Arguments
    ///
    /// * `variables`: The variable values.
    ///
    /// returns: `Result<Individual, OError>`
    fn evaluate(&self, variables: &[f64]) -> Result<Individual, OError>;

    /// The number of variables.
    ///
    /// returns: `usize`
    fn number_of_variables(&self) -> usize {
        self.variable_bounds().len()
    }
}

/// Check that the number of variables matches the problem.
pub(crate) fn check_variables(
    problem: &dyn BenchmarkProblem,
    variables: &[f64],
) -> Result<(), OError> {
    if variables.len() != problem.number_of_variables() {
        return Err(OError::Generic(format!(
            "The {} problem needs {} variables, but {} were given",
            problem.name(),
            problem.number_of_variables(),
            variables.len()
        )));
    }
    Ok(())
}

/// The overall violation of a set of constraints, where a constraint is met when its value is
/// larger or equal to zero. The violation is the sum of the absolute values of the violated
/// constraints (`0` for a feasible solution).
///
/// # Arguments
///
/// * `constraints`: The constraint values.
///
/// returns: `f64`
pub(crate) fn constraint_violation(constraints: &[f64]) -> f64 {
    constraints
        .iter()
        .filter(|g| **g < 0.0)
        .fold(0.0, |total, g| total + g.abs())
}

/// Create a population of evaluated individuals whose variables are drawn uniformly within the
/// problem bounds.
///
/// # Arguments
///
/// * `problem`: The problem to evaluate.
/// * `size`: The number of individuals.
/// * `seed`: The seed of the random number generator. The default seed is used when `None`.
///
/// returns: `Result<Vec<Individual>, OError>`
pub fn random_population(
    problem: &dyn BenchmarkProblem,
    size: usize,
    seed: Option<u64>,
) -> Result<Vec<Individual>, OError> {
    let mut rng = get_rng(seed);
    let bounds = problem.variable_bounds();

    let mut population = Vec::with_capacity(size);
    for _ in 0..size {
        let variables: Vec<f64> = bounds
            .iter()
            .map(|(lower, upper)| rng.gen_range(*lower..=*upper))
            .collect();
        population.push(problem.evaluate(&variables)?);
    }
    Ok(population)
}
