use log::debug;

use crate::core::{Individuals, OError, Solution};
use crate::utils::{argsort, Sort};

/// Calculate the crowding distance (with complexity $O(M * N * log(N))$, where `M` is the number
/// of objectives and `N` the number of individuals). This sets the distance on each individual
/// with [`Solution::set_crowding_distance`] and overwrites any previous value.
/// > NOTE: the individuals must be a non-dominated front.
///
/// For each objective, the individuals are sorted by ascending value (ties keep their order in
/// `individuals`). The two boundary solutions get an infinite distance; each interior solution
/// adds the normalised distance between its two neighbours. When all individuals have the same
/// value for an objective, only the boundary solutions are updated for that objective. Fronts
/// with less than 3 individuals are all boundary solutions.
///
/// Implemented based on paragraph 3B in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Arguments
///
/// * `individuals`: The individuals in a non-dominated front.
///
/// returns: `Result<(), OError>`
pub fn set_crowding_distance<S: Solution>(individuals: &mut [S]) -> Result<(), OError> {
    let total_individuals = individuals.len();

    // if there are not enough points set distance to + infinite
    if total_individuals < 3 {
        for individual in individuals.iter_mut() {
            individual.set_crowding_distance(f64::INFINITY);
        }
        return Ok(());
    }

    let mut distances = vec![0.0; total_individuals];
    let number_of_objectives = individuals.individual(0)?.number_of_objectives();
    for obj_idx in 0..number_of_objectives {
        let obj_values = individuals.objective_values(obj_idx)?;

        // sort objectives and get indexes to map individuals to sorted objectives
        let sorted_idx = argsort(&obj_values, Sort::Ascending);
        let min = obj_values[sorted_idx[0]];
        let max = obj_values[sorted_idx[total_individuals - 1]];
        // halve the values when the range of finite values overflows
        let scale = if (max - min).is_infinite() && min.is_finite() && max.is_finite() {
            0.5
        } else {
            1.0
        };
        let delta_range = max * scale - min * scale;

        // assign infinite distance to the boundary points
        distances[sorted_idx[0]] = f64::INFINITY;
        distances[sorted_idx[total_individuals - 1]] = f64::INFINITY;

        if delta_range == 0.0 {
            debug!("All individuals have the same value for objective #{obj_idx}");
            continue;
        }

        for obj_i in 1..(total_individuals - 1) {
            // get corresponding individual to sorted objective
            let ind_i = sorted_idx[obj_i];
            let numerator = obj_values[sorted_idx[obj_i + 1]] * scale
                - obj_values[sorted_idx[obj_i - 1]] * scale;
            let delta = numerator / delta_range;
            if delta.is_nan() {
                return Err(OError::Generic(
                    format!("The calculated crowding distance increment was NaN likely due to wrong objective values. Numerator: {}, denominator: {}",
                            numerator, delta_range)
                ));
            }
            distances[ind_i] += delta;
        }
    }

    for (individual, distance) in individuals.iter_mut().zip(distances) {
        individual.set_crowding_distance(distance);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use crate::core::test_utils::{assert_approx_array_eq, individuals_from_obj_values_dummy};
    use crate::core::{Individual, Individuals, Solution};
    use crate::utils::set_crowding_distance;

    fn distances(individuals: &[Individual]) -> Vec<f64> {
        individuals
            .crowding_distances()
            .into_iter()
            .map(|d| d.unwrap())
            .collect()
    }

    #[test]
    /// Test the crowding distance algorithm (not enough points).
    fn test_crowding_distance_empty() {
        let mut individuals = individuals_from_obj_values_dummy(&[[0.0, 0.0], [50.0, 50.0]]);
        set_crowding_distance(&mut individuals).unwrap();
        assert_eq!(distances(&individuals), vec![f64::INFINITY; 2]);

        let mut individuals = individuals_from_obj_values_dummy(&[[3.0, 1.0]]);
        set_crowding_distance(&mut individuals).unwrap();
        assert_eq!(distances(&individuals), vec![f64::INFINITY]);

        let mut individuals: Vec<Individual> = Vec::new();
        assert!(set_crowding_distance(&mut individuals).is_ok());
    }

    #[test]
    /// Test the crowding distance algorithm (3 points).
    fn test_crowding_distance_3_points() {
        let scenarios = vec![
            [[0.0, 0.0], [-100.0, 100.0], [200.0, -200.0]],
            [[25.0, 25.0], [-100.0, 100.0], [200.0, -200.0]],
        ];
        for objectives in scenarios {
            let mut individuals = individuals_from_obj_values_dummy(&objectives);
            set_crowding_distance(&mut individuals).unwrap();
            assert_approx_array_eq(
                &distances(&individuals),
                &[2.0, f64::INFINITY, f64::INFINITY],
            );
        }
    }

    #[test]
    /// Test the crowding distance algorithm (3 objectives).
    fn test_crowding_distance_3_obj() {
        let objectives = [[0.0, 0.0, 0.0], [-1.0, 1.0, 2.0], [2.0, -2.0, -2.0]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[3.0, f64::INFINITY, f64::INFINITY],
        );
    }

    #[test]
    /// Test the crowding distance algorithm (4 points).
    fn test_crowding_distance_4points() {
        let objectives = [
            [0.0, 0.0],
            [100.0, -100.0],
            [200.0, -200.0],
            [400.0, -400.0],
        ];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[f64::INFINITY, 1.0, 1.5, f64::INFINITY],
        );
    }

    #[test]
    /// Test the crowding distance algorithm (6 points).
    fn test_crowding_distance_6points() {
        let objectives = [
            [1.1, 8.1],
            [2.1, 6.1],
            [3.1, 4.1],
            [5.1, 3.1],
            [8.1, 2.1],
            [11.1, 1.1],
        ];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();

        let expected = [
            f64::INFINITY,
            0.7714285714285714,
            0.728571429,
            0.785714286,
            0.885714286,
            f64::INFINITY,
        ];
        assert_approx_array_eq(&distances(&individuals), &expected);
    }

    #[test]
    /// The individuals are not sorted by the first objective
    fn test_crowding_distance_unsorted() {
        let objectives = [[200.0, -200.0], [0.0, 0.0], [400.0, -400.0], [100.0, -100.0]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[1.5, f64::INFINITY, f64::INFINITY, 1.0],
        );
    }

    #[test]
    /// When all values are identical only the first and last individuals are boundaries
    fn test_crowding_distance_same_values() {
        let mut individuals = individuals_from_obj_values_dummy(&[[10.0, 20.0]; 4]);
        set_crowding_distance(&mut individuals).unwrap();
        assert_eq!(
            distances(&individuals),
            vec![f64::INFINITY, 0.0, 0.0, f64::INFINITY]
        );

        // one objective is degenerate, the other one still contributes
        let objectives = [[1.0, 5.0], [2.0, 5.0], [3.0, 5.0], [5.0, 5.0]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[f64::INFINITY, 0.5, 0.75, f64::INFINITY],
        );
    }

    #[test]
    /// Old distances are replaced
    fn test_stale_distance_is_overwritten() {
        let objectives = [[0.0, 0.0], [100.0, -100.0], [200.0, -200.0], [400.0, -400.0]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        for individual in individuals.iter_mut() {
            individual.set_crowding_distance(99.0);
        }
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[f64::INFINITY, 1.0, 1.5, f64::INFINITY],
        );
    }

    #[test]
    /// Finite values whose range overflows still get a distance
    fn test_crowding_distance_large_values() {
        let objectives = [[-1e308, 1e308], [0.0, 0.0], [1e308, -1e308]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[f64::INFINITY, 2.0, f64::INFINITY],
        );

        let objectives = [[f64::MAX], [f64::MAX / 2.0], [-f64::MAX], [0.0]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        set_crowding_distance(&mut individuals).unwrap();
        assert_approx_array_eq(
            &distances(&individuals),
            &[f64::INFINITY, 0.5, f64::INFINITY, 0.75],
        );
    }

    #[test]
    /// Infinite objective values make the increment NaN
    fn test_nan_increment() {
        let objectives = [[0.0], [1.0], [f64::INFINITY]];
        let mut individuals = individuals_from_obj_values_dummy(&objectives);
        assert!(set_crowding_distance(&mut individuals).is_err());
    }

    proptest! {
        #[test]
        /// The distances are never negative and the extremes of each objective are infinite.
        fn prop_boundaries_are_infinite(
            objectives in prop::collection::vec(
                prop::collection::vec(-100.0f64..100.0, 3),
                3..30,
            )
        ) {
            let mut individuals: Vec<Individual> = objectives
                .iter()
                .map(|o| Individual::new(o.clone()).unwrap())
                .collect();
            set_crowding_distance(&mut individuals).unwrap();
            let d = distances(&individuals);

            prop_assert!(d.iter().all(|v| *v >= 0.0));
            for obj_idx in 0..3 {
                let values = individuals.objective_values(obj_idx).unwrap();
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let first_min = values.iter().position(|v| *v == min).unwrap();
                let last_max = values.iter().rposition(|v| *v == max).unwrap();
                prop_assert!(d[first_min].is_infinite());
                prop_assert!(d[last_max].is_infinite());
            }
        }
    }
}
