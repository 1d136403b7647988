use crate::core::{Individual, OError};
use crate::problems::{check_variables, constraint_violation, BenchmarkProblem};

/// The Srinivas and Deb's constrained problem with two variables in [-20, 20], two objectives
/// and two constraints.
///
/// See: N. Srinivas and K. Deb, "Multiobjective Optimization Using Nondominated Sorting in
/// Genetic Algorithms," in Evolutionary Computation, vol. 2, no. 3, pp. 221-248, Sept. 1994,
/// doi: 10.1162/evco.1994.2.3.221.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrinivasProblem;

impl SrinivasProblem {
    /// The first objective function
    pub fn f1(x1: f64, x2: f64) -> f64 {
        2.0 + (x1 - 2.0).powi(2) + (x2 - 1.0).powi(2)
    }

    /// The second objective function
    pub fn f2(x1: f64, x2: f64) -> f64 {
        9.0 * x1 - (x2 - 1.0).powi(2)
    }
}

impl BenchmarkProblem for SrinivasProblem {
    fn name(&self) -> String {
        "Srinivas".to_string()
    }

    fn variable_bounds(&self) -> Vec<(f64, f64)> {
        vec![(-20.0, 20.0); 2]
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn evaluate(&self, variables: &[f64]) -> Result<Individual, OError> {
        check_variables(self, variables)?;
        let (x1, x2) = (variables[0], variables[1]);

        let constraints = [
            1.0 - (x1.powi(2) + x2.powi(2)) / 225.0,
            (3.0 * x2 - x1) / 10.0 - 1.0,
        ];
        Individual::new(vec![Self::f1(x1, x2), Self::f2(x1, x2)])?
            .with_variables(variables.to_vec())
            .with_constraint_violation(constraint_violation(&constraints))
    }
}
