use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::OError;

/// The capabilities the selection operators need from a solution. The objective and constraint
/// data are only read; the rank and crowding distance are written by the ranking and density
/// estimation steps.
///
/// All objectives are minimised. To maximise an objective, store its value with the opposite sign.
pub trait Solution: Send + Sync {
    /// The objective values. Each item is the value of the objective with the same index.
    ///
    /// returns: `&[f64]`
    fn objectives(&self) -> &[f64];

    /// The aggregated constraint violation, if the solution is constrained. Values smaller or
    /// equal to zero mean that the solution is feasible; larger values mean that the solution is
    /// further away from meeting its constraints.
    ///
    /// returns: `Option<f64>`
    fn constraint_violation(&self) -> Option<f64>;

    /// The rank of the front the solution belongs to (`0` for the non-dominated front). This is
    /// `None` if the solution was never ranked.
    ///
    /// returns: `Option<usize>`
    fn rank(&self) -> Option<usize>;

    /// Store the rank of the front the solution belongs to.
    ///
    /// # Arguments
    ///
    /// * `rank`: The front rank.
    ///
    /// returns: `()`
    fn set_rank(&mut self, rank: usize);

    /// The crowding distance of the solution within its front. This is `None` if the distance was
    /// never calculated.
    ///
    /// returns: `Option<f64>`
    fn crowding_distance(&self) -> Option<f64>;

    /// Store the crowding distance. This may be `f64::INFINITY` for boundary solutions.
    ///
    /// # Arguments
    ///
    /// * `distance`: The crowding distance.
    ///
    /// returns: `()`
    fn set_crowding_distance(&mut self, distance: f64);

    /// The number of objectives.
    ///
    /// returns: `usize`
    fn number_of_objectives(&self) -> usize {
        self.objectives().len()
    }
}

/// An individual in the population containing the decision variables, and the objective and
/// constraint values of an evaluated solution.
///
/// # Example
/// ```
/// use std::error::Error;
/// use nsga_survival::core::{Individual, Solution};
///
/// fn main() -> Result<(), Box<dyn Error>> {
///     let individual = Individual::new(vec![1.0, 5.0])?
///         .with_variables(vec![0.2, 0.4])
///         .with_constraint_violation(0.0)?;
///
///     assert_eq!(individual.objectives(), &[1.0, 5.0]);
///     assert!(individual.is_feasible());
///     assert_eq!(individual.rank(), None);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// The value of the decision variables. These are not used by the selection.
    variables: Vec<f64>,
    /// The values of the objectives.
    objectives: Vec<f64>,
    /// The overall amount of violation of the solution constraints. `None` for unconstrained
    /// problems.
    constraint_violation: Option<f64>,
    /// The front rank.
    rank: Option<usize>,
    /// The crowding distance within the front.
    crowding_distance: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct IndividualExport {
    /// The value of the decision variables.
    pub variables: Vec<f64>,
    /// The values of the objectives.
    pub objective_values: Vec<f64>,
    /// The overall amount of violation of the solution constraints.
    pub constraint_violation: Option<f64>,
    /// Whether the solution meets all the problem constraints.
    pub is_feasible: bool,
    /// The front rank.
    pub rank: Option<usize>,
    /// The crowding distance. Infinite distances are exported as `f64::MAX`.
    pub crowding_distance: Option<f64>,
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Individual(variables={:?}, objectives={:?}, constraint_violation={:?}, rank={:?}, crowding_distance={:?})",
            self.variables, self.objectives, self.constraint_violation, self.rank, self.crowding_distance
        )
    }
}

impl Individual {
    /// Create a new evaluated individual. This returns an error if one of the objective values is
    /// NaN.
    ///
    /// # Arguments
    ///
    /// * `objectives`: The objective values.
    ///
    /// returns: `Result<Individual, OError>`
    pub fn new(objectives: Vec<f64>) -> Result<Self, OError> {
        if let Some(index) = objectives.iter().position(|v| v.is_nan()) {
            return Err(OError::NaN("objective".to_string(), format!("#{index}")));
        }

        Ok(Self {
            variables: Vec::new(),
            objectives,
            constraint_violation: None,
            rank: None,
            crowding_distance: None,
        })
    }

    /// Attach the decision variables that generated the objective values.
    ///
    /// # Arguments
    ///
    /// * `variables`: The variable values.
    ///
    /// returns: `Individual`
    pub fn with_variables(mut self, variables: Vec<f64>) -> Self {
        self.variables = variables;
        self
    }

    /// Set the aggregated constraint violation. This returns an error if the value is NaN.
    ///
    /// # Arguments
    ///
    /// * `violation`: The overall constraint violation (`<= 0` when the solution is feasible).
    ///
    /// returns: `Result<Individual, OError>`
    pub fn with_constraint_violation(mut self, violation: f64) -> Result<Self, OError> {
        if violation.is_nan() {
            return Err(OError::NaN(
                "constraint".to_string(),
                "violation".to_string(),
            ));
        }
        self.constraint_violation = Some(violation);
        Ok(self)
    }

    /// Get the decision variables.
    ///
    /// returns: `&[f64]`
    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    /// Return whether the solution meets all the problem constraints. Unconstrained individuals
    /// are always feasible.
    ///
    /// return: `bool`
    pub fn is_feasible(&self) -> bool {
        self.constraint_violation.map_or(true, |v| v <= 0.0)
    }

    /// Export all the solution data.
    ///
    /// return: `IndividualExport`
    pub fn serialise(&self) -> IndividualExport {
        // do not use INF because is not supported by serde
        let crowding_distance = self.crowding_distance.map(|d| {
            if d.is_infinite() {
                f64::MAX
            } else {
                d
            }
        });

        IndividualExport {
            variables: self.variables.clone(),
            objective_values: self.objectives.clone(),
            constraint_violation: self.constraint_violation,
            is_feasible: self.is_feasible(),
            rank: self.rank,
            crowding_distance,
        }
    }
}

impl Solution for Individual {
    fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    fn constraint_violation(&self) -> Option<f64> {
        self.constraint_violation
    }

    fn rank(&self) -> Option<usize> {
        self.rank
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }

    fn crowding_distance(&self) -> Option<f64> {
        self.crowding_distance
    }

    fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = Some(distance);
    }
}

/// Read-only helpers over a group of solutions.
pub trait Individuals<S: Solution> {
    /// Get an individual by its index.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the individual.
    ///
    /// return: `Result<&S, OError>`
    fn individual(&self, index: usize) -> Result<&S, OError>;
    /// Get the values of one objective for all individuals. This returns an error if an
    /// individual does not have the objective.
    ///
    /// # Arguments
    ///
    /// * `objective_index`: The objective index.
    ///
    /// returns: `Result<Vec<f64>, OError>`
    fn objective_values(&self, objective_index: usize) -> Result<Vec<f64>, OError>;
    /// Get the rank of all individuals. An item is `None` if the individual was never ranked.
    ///
    /// returns: `Vec<Option<usize>>`
    fn ranks(&self) -> Vec<Option<usize>>;
    /// Get the crowding distance of all individuals. An item is `None` if the distance was never
    /// calculated.
    ///
    /// returns: `Vec<Option<f64>>`
    fn crowding_distances(&self) -> Vec<Option<f64>>;
}

impl<S: Solution> Individuals<S> for [S] {
    fn individual(&self, index: usize) -> Result<&S, OError> {
        self.get(index)
            .ok_or(OError::NonExistingIndex("individual".to_string(), index))
    }

    fn objective_values(&self, objective_index: usize) -> Result<Vec<f64>, OError> {
        self.iter()
            .map(|i| {
                i.objectives()
                    .get(objective_index)
                    .copied()
                    .ok_or(OError::NonExistingIndex(
                        "objective".to_string(),
                        objective_index,
                    ))
            })
            .collect()
    }

    fn ranks(&self) -> Vec<Option<usize>> {
        self.iter().map(|i| i.rank()).collect()
    }

    fn crowding_distances(&self) -> Vec<Option<f64>> {
        self.iter().map(|i| i.crowding_distance()).collect()
    }
}
