use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::core::{OError, Solution};

/// The preferred solution with the `DominanceComparator`.
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy)]
pub enum PreferredSolution {
    /// The first solution is preferred.
    First,
    /// The second solution is preferred.
    Second,
    /// The two solutions are mutually preferred.
    MutuallyPreferred,
}

impl PreferredSolution {
    /// Get the relation as a signed integer: `-1` when the first solution dominates, `1` when the
    /// second one dominates and `0` when neither does.
    ///
    /// returns: `i8`
    pub fn as_sign(&self) -> i8 {
        match self {
            PreferredSolution::First => -1,
            PreferredSolution::MutuallyPreferred => 0,
            PreferredSolution::Second => 1,
        }
    }
}

/// A trait to implement the dominance relation between two solutions. Implementations must be
/// stateless and deterministic, because the relation is evaluated for every pair of solutions,
/// possibly from multiple threads.
pub trait DominanceComparator: Debug + Send + Sync {
    /// The comparator name used in logs and errors.
    ///
    /// returns: `String`
    fn name(&self) -> String;

    /// Compare two solutions and find out which one dominates.
    ///
    /// # Arguments
    ///
    /// * `first_solution`: The first solution to compare.
    /// * `second_solution`: The second solution to compare.
    ///
    /// returns: `Result<PreferredSolution, OError>` The preferred solution.
    fn compare(
        &self,
        first_solution: &dyn Solution,
        second_solution: &dyn Solution,
    ) -> Result<PreferredSolution, OError>;
}

/// Check that the two solutions can be compared.
fn check_objective_count(
    operator: &str,
    first_solution: &dyn Solution,
    second_solution: &dyn Solution,
) -> Result<(), OError> {
    let n1 = first_solution.number_of_objectives();
    let n2 = second_solution.number_of_objectives();
    if n1 != n2 {
        return Err(OError::ComparisonOperator(
            operator.to_string(),
            format!("The solutions have a different number of objectives ({n1} and {n2})"),
        ));
    }
    Ok(())
}

/// Pareto dominance on two objective vectors of the same size (all objectives minimised).
fn pareto_relation(first_objectives: &[f64], second_objectives: &[f64]) -> PreferredSolution {
    let mut relation = PreferredSolution::MutuallyPreferred;
    for (obj_sol1, obj_sol2) in first_objectives.iter().zip(second_objectives) {
        if obj_sol1 < obj_sol2 {
            if relation == PreferredSolution::Second {
                // mutually dominated
                return PreferredSolution::MutuallyPreferred;
            }
            relation = PreferredSolution::First;
        } else if obj_sol1 > obj_sol2 {
            if relation == PreferredSolution::First {
                // mutually dominated
                return PreferredSolution::MutuallyPreferred;
            }
            relation = PreferredSolution::Second;
        }
    }
    relation
}

/// This assesses the Pareto dominance between two solutions $S_1$ and $S_2$, where all objectives
/// are minimised. $S_1$ dominates $S_2$ when $S_1$ is not worse than $S_2$ in any objective and
/// strictly better in at least one. The constraint violation is ignored.
///
/// # Example
/// ```
/// use nsga_survival::core::Individual;
/// use nsga_survival::operators::{DominanceComparator, ParetoDominance, PreferredSolution};
///
/// let a = Individual::new(vec![1.0, 2.0]).unwrap();
/// let b = Individual::new(vec![1.0, 3.0]).unwrap();
/// assert_eq!(ParetoDominance.compare(&a, &b).unwrap(), PreferredSolution::First);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ParetoDominance;

impl DominanceComparator for ParetoDominance {
    fn name(&self) -> String {
        "Pareto dominance".to_string()
    }

    fn compare(
        &self,
        first_solution: &dyn Solution,
        second_solution: &dyn Solution,
    ) -> Result<PreferredSolution, OError> {
        check_objective_count(&self.name(), first_solution, second_solution)?;
        Ok(pareto_relation(
            first_solution.objectives(),
            second_solution.objectives(),
        ))
    }
}

/// This assesses the Pareto dominance between two solutions $S_1$ and $S_2$ and their constraint
/// violations in constrained multi-objective optimization problems. A solution $S_1$
/// constraint-dominates $S_2$ if:
/// 1) $CV(S_1) < CV(S_2)$, where $CV$ is the constraint violation clamped to zero (a feasible or
/// unconstrained solution has $CV = 0$); or
/// 2) $CV(S_1) = CV(S_2)$ and $S_1$ Pareto-dominates $S_2$ ($ S_1 \prec S_2 $).
///
/// See:
///  - Kalyanmoy Deb & Samir Agrawal. (2002). <https://doi.org/10.1007/978-3-7091-6384-9_40>.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct ParetoConstrainedDominance;

impl DominanceComparator for ParetoConstrainedDominance {
    fn name(&self) -> String {
        "Pareto constrained dominance".to_string()
    }

    fn compare(
        &self,
        first_solution: &dyn Solution,
        second_solution: &dyn Solution,
    ) -> Result<PreferredSolution, OError> {
        check_objective_count(&self.name(), first_solution, second_solution)?;
        let cv1 = first_solution.constraint_violation().unwrap_or(0.0).max(0.0);
        let cv2 = second_solution.constraint_violation().unwrap_or(0.0).max(0.0);

        // the least infeasible solution dominates regardless of the objectives
        if cv1 < cv2 {
            return Ok(PreferredSolution::First);
        } else if cv1 > cv2 {
            return Ok(PreferredSolution::Second);
        }

        Ok(pareto_relation(
            first_solution.objectives(),
            second_solution.objectives(),
        ))
    }
}

/// The built-in dominance relations that can be picked from the selection options. The default
/// constrained dominance behaves like the Pareto dominance when no solution has a constraint
/// violation.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DominanceType {
    /// Use [`ParetoDominance`]. Constraint violations are ignored.
    Pareto,
    #[default]
    /// Use [`ParetoConstrainedDominance`].
    ParetoConstrained,
}

impl DominanceType {
    /// Create the comparator.
    ///
    /// returns: `Box<dyn DominanceComparator>`
    pub fn comparator(&self) -> Box<dyn DominanceComparator> {
        match self {
            DominanceType::Pareto => Box::new(ParetoDominance),
            DominanceType::ParetoConstrained => Box::new(ParetoConstrainedDominance),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::core::test_utils::{
        constrained_individuals_dummy, individuals_from_obj_values_dummy,
    };
    use crate::core::Individual;
    use crate::operators::{
        DominanceComparator, DominanceType, ParetoConstrainedDominance, ParetoDominance,
        PreferredSolution,
    };

    #[test]
    /// Test unconstrained solutions with two objectives
    fn test_unconstrained_solutions_2_objectives() {
        let scenarios = [
            // Sol 1 dominates
            ([5.0, 1.0], [15.0, 25.0], PreferredSolution::First),
            // Sol 2 dominates
            ([5.0, 1.0], [-15.0, -25.0], PreferredSolution::Second),
            // Obj1 of Sol 1 dominates and Obj2 of Sol 2 dominates
            ([5.0, 100.0], [15.0, 25.0], PreferredSolution::MutuallyPreferred),
            // equal in obj1, better in obj2
            ([0.0, 0.0], [0.0, 1.0], PreferredSolution::First),
            // identical
            ([1.0, 1.0], [1.0, 1.0], PreferredSolution::MutuallyPreferred),
        ];
        for (obj1, obj2, expected) in scenarios {
            let individuals = individuals_from_obj_values_dummy(&[obj1, obj2]);
            assert_eq!(
                ParetoDominance
                    .compare(&individuals[0], &individuals[1])
                    .unwrap(),
                expected
            );
        }
    }

    #[test]
    /// The relation is antisymmetric
    fn test_swap_solutions() {
        let individuals = individuals_from_obj_values_dummy(&[[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        for (a, b) in [(0, 1), (0, 2), (2, 1)] {
            let direct = ParetoDominance
                .compare(&individuals[a], &individuals[b])
                .unwrap();
            let swapped = ParetoDominance
                .compare(&individuals[b], &individuals[a])
                .unwrap();
            assert_eq!(direct, PreferredSolution::First);
            assert_eq!(swapped, PreferredSolution::Second);
            assert_eq!(direct.as_sign(), -swapped.as_sign());
        }
    }

    #[test]
    /// The unconstrained rule ignores the violation
    fn test_pareto_ignores_violation() {
        let individuals = constrained_individuals_dummy(&[[5.0, 5.0], [1.0, 1.0]], &[0.0, 10.0]);
        assert_eq!(
            ParetoDominance
                .compare(&individuals[0], &individuals[1])
                .unwrap(),
            PreferredSolution::Second
        );
    }

    #[test]
    /// Test constrained solutions. The constraint violation determines the dominance relation.
    fn test_constrained_solutions() {
        // Sol 2 dominates because is feasible
        let individuals = constrained_individuals_dummy(&[[5.0, 5.0], [15.0, 15.0]], &[1.0, 0.0]);
        assert_eq!(
            ParetoConstrainedDominance
                .compare(&individuals[0], &individuals[1])
                .unwrap(),
            PreferredSolution::Second
        );

        // Solution 1 dominates due to the smaller violation
        let individuals =
            constrained_individuals_dummy(&[[100.0, 100.0], [15.0, 15.0]], &[0.5, 3.0]);
        assert_eq!(
            ParetoConstrainedDominance
                .compare(&individuals[0], &individuals[1])
                .unwrap(),
            PreferredSolution::First
        );

        // Same violation: fall back to the objectives
        let individuals = constrained_individuals_dummy(&[[5.0, 5.0], [15.0, 15.0]], &[0.5, 0.5]);
        assert_eq!(
            ParetoConstrainedDominance
                .compare(&individuals[0], &individuals[1])
                .unwrap(),
            PreferredSolution::First
        );

        // negative violations are all feasible
        let individuals = constrained_individuals_dummy(&[[5.0, 1.0], [1.0, 5.0]], &[-3.0, -0.1]);
        assert_eq!(
            ParetoConstrainedDominance
                .compare(&individuals[0], &individuals[1])
                .unwrap(),
            PreferredSolution::MutuallyPreferred
        );
    }

    #[test]
    /// A missing violation counts as feasible
    fn test_missing_violation() {
        let unconstrained = Individual::new(vec![10.0, 10.0]).unwrap();
        let infeasible = Individual::new(vec![1.0, 1.0])
            .unwrap()
            .with_constraint_violation(0.2)
            .unwrap();
        assert_eq!(
            ParetoConstrainedDominance
                .compare(&unconstrained, &infeasible)
                .unwrap(),
            PreferredSolution::First
        );
    }

    #[test]
    /// Solutions with a different number of objectives cannot be compared
    fn test_objective_mismatch() {
        let a = Individual::new(vec![1.0, 2.0]).unwrap();
        let b = Individual::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(ParetoDominance.compare(&a, &b).is_err());
        assert!(ParetoConstrainedDominance.compare(&a, &b).is_err());
    }

    #[test]
    fn test_dominance_type() {
        assert_eq!(DominanceType::default(), DominanceType::ParetoConstrained);
        assert_eq!(DominanceType::Pareto.comparator().name(), "Pareto dominance");
        assert_eq!(
            DominanceType::ParetoConstrained.comparator().name(),
            "Pareto constrained dominance"
        );
    }
}
