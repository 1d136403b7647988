#[cfg(test)]
use float_cmp::{approx_eq, F64Margin};

#[cfg(test)]
use crate::core::Individual;

/// Create the individuals for a `N`-objective problem, where `N` is the number of items in
/// the arrays of `objective_values`.
///
/// # Arguments
///
/// * `objective_values`: The objective values to set on the individuals. A number of individuals
/// equal to this vector size will be created.
///
/// returns: `Vec<Individual>`
#[cfg(test)]
pub(crate) fn individuals_from_obj_values_dummy<const N: usize>(
    objective_values: &[[f64; N]],
) -> Vec<Individual> {
    objective_values
        .iter()
        .map(|values| Individual::new(values.to_vec()).unwrap())
        .collect()
}

/// Same as [`individuals_from_obj_values_dummy`] but each individual also carries a constraint
/// violation.
///
/// # Arguments
///
/// * `objective_values`: The objective values.
/// * `violations`: The violation of each individual.
///
/// returns: `Vec<Individual>`
#[cfg(test)]
pub(crate) fn constrained_individuals_dummy<const N: usize>(
    objective_values: &[[f64; N]],
    violations: &[f64],
) -> Vec<Individual> {
    objective_values
        .iter()
        .zip(violations)
        .map(|(values, cv)| {
            Individual::new(values.to_vec())
                .unwrap()
                .with_constraint_violation(*cv)
                .unwrap()
        })
        .collect()
}

#[cfg(test)]
/// Compare two arrays of f64. Infinite values must match exactly.
pub(crate) fn assert_approx_array_eq(calculated_values: &[f64], expected_values: &[f64]) {
    assert_eq!(calculated_values.len(), expected_values.len());
    let margins = F64Margin {
        epsilon: 0.001,
        ulps: 4,
    };
    for (i, (calculated, expected)) in calculated_values.iter().zip(expected_values).enumerate() {
        let equal = if expected.is_infinite() {
            calculated == expected
        } else {
            approx_eq!(f64, *calculated, *expected, margins)
        };
        if !equal {
            panic!(
                r#"assertion failed on item #{i:?}
                    actual: `{calculated:?}`,
                    expected: `{expected:?}`"#,
            )
        }
    }
}
