use crate::core::{Individual, OError};
use crate::problems::{check_variables, constraint_violation, BenchmarkProblem};

/// The water resource planning problem with three variables, five objectives and seven
/// constraints.
///
/// See: T. Ray, K. Tai and K. C. Seow, "Multiobjective design optimization by an evolutionary
/// algorithm," Engineering Optimization, vol. 33, no. 4, pp. 399-424, 2001.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaterProblem;

impl BenchmarkProblem for WaterProblem {
    fn name(&self) -> String {
        "Water".to_string()
    }

    fn variable_bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.01, 0.45), (0.01, 0.10), (0.01, 0.10)]
    }

    fn number_of_objectives(&self) -> usize {
        5
    }

    fn evaluate(&self, variables: &[f64]) -> Result<Individual, OError> {
        check_variables(self, variables)?;
        let x = variables;
        let x01 = x[0] * x[1];

        let objectives = vec![
            106780.37 * (x[1] + x[2]) + 61704.67,
            3000.0 * x[0],
            305700.0 * 2289.0 * x[1] / (0.06 * 2289.0_f64).powf(0.65),
            250.0 * 2289.0 * (-39.75 * x[1] + 9.9 * x[2] + 2.74).exp(),
            25.0 * (1.39 / x01 + 4940.0 * x[2] - 80.0),
        ];
        let constraints = [
            1.0 - (0.00139 / x01 + 4.94 * x[2] - 0.08),
            1.0 - (0.000306 / x01 + 1.082 * x[2] - 0.0986),
            50000.0 - (12.307 / x01 + 49408.24 * x[2] + 4051.02),
            16000.0 - (2.098 / x01 + 8046.33 * x[2] - 696.71),
            10000.0 - (2.138 / x01 + 7883.39 * x[2] - 705.04),
            2000.0 - (0.417 * x01 + 1721.26 * x[2] - 136.54),
            550.0 - (0.164 / x01 + 631.13 * x[2] - 54.48),
        ];

        Individual::new(objectives)?
            .with_variables(variables.to_vec())
            .with_constraint_violation(constraint_violation(&constraints))
    }
}
