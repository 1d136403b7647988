use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{Individual, IndividualExport, OError, Solution};
use crate::operators::{DominanceComparator, DominanceType};
use crate::utils::{fast_non_dominated_sort, set_crowding_distance, split_into_fronts};

/// Input arguments for the [`RankingAndCrowdingSelection`] operator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelectionArgs {
    /// The number of solutions the operator keeps from the population. This must be larger than
    /// zero.
    pub solutions_to_select: usize,
    /// The dominance relation used to rank the solutions. This defaults to
    /// [`DominanceType::ParetoConstrained`].
    pub dominance: Option<DominanceType>,
    /// Compare the solutions using multiple threads. This defaults to `false`.
    pub parallel: Option<bool>,
}

impl SelectionArgs {
    /// Load the arguments from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `file`: The path to the JSON file.
    ///
    /// returns: `Result<SelectionArgs, OError>`
    pub fn from_file(file: &Path) -> Result<Self, OError> {
        if !file.exists() {
            return Err(OError::Generic(format!(
                "The file {:?} does not exist",
                file
            )));
        }
        let data = fs::read_to_string(file)
            .map_err(|e| OError::Generic(format!("Cannot read the JSON file because: {e}")))?;
        serde_json::from_str(&data)
            .map_err(|e| OError::Generic(format!("Cannot parse the JSON file because: {e}")))
    }
}

/// The options of the operator saved in the JSON export.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SelectionOptions {
    /// The number of selected solutions.
    pub solutions_to_select: usize,
    /// The name of the dominance relation.
    pub comparator: String,
    /// Whether the sort was run in parallel.
    pub parallel: bool,
}

/// The data exported to a JSON file after a selection.
#[derive(Serialize, Deserialize, Debug)]
pub struct SelectionExport {
    /// The operator options.
    pub options: SelectionOptions,
    /// The selected individuals.
    pub individuals: Vec<IndividualExport>,
    /// The date and time when the file was created.
    pub exported_on: DateTime<Utc>,
}

/// The environmental selection of NSGA2. The population is sorted into non-dominated fronts
/// that are added to the selection by increasing rank, as long as the entire front fits. When a
/// front does not fit, its solutions with the largest crowding distance complete the selection
/// (ties keep the order of the front) and the remaining fronts are discarded.
///
/// The rank and crowding distance of each solution in the added fronts are stored on the
/// solutions, so they can be reused by a mating selection operator.
///
/// This implements the algorithm at the bottom of page 186 in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Example
/// ```
/// use std::error::Error;
/// use nsga_survival::core::{Individual, Solution};
/// use nsga_survival::operators::RankingAndCrowdingSelection;
///
/// fn main() -> Result<(), Box<dyn Error>> {
///     let population = vec![
///         Individual::new(vec![1.0, 5.0])?,
///         Individual::new(vec![2.0, 3.0])?,
///         Individual::new(vec![3.0, 3.0])?,
///     ];
///     let selector = RankingAndCrowdingSelection::new(2)?;
///     let selected = selector.select(population)?;
///
///     assert_eq!(selected.len(), 2);
///     assert!(selected.iter().all(|s| s.rank() == Some(0)));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct RankingAndCrowdingSelection {
    /// The number of solutions to select.
    solutions_to_select: usize,
    /// The dominance relation.
    comparator: Box<dyn DominanceComparator>,
    /// Whether to compare the solutions using the rayon thread pool.
    parallel: bool,
}

impl Display for RankingAndCrowdingSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(solutions_to_select={}, comparator={}, parallel={})",
            self.name(),
            self.solutions_to_select,
            self.comparator.name(),
            self.parallel
        )
    }
}

impl RankingAndCrowdingSelection {
    /// Create a new operator that uses the Pareto constrained dominance. Populations without
    /// constraint violations are ranked with the Pareto dominance only. This returns an error if
    /// `solutions_to_select` is zero.
    ///
    /// # Arguments
    ///
    /// * `solutions_to_select`: The number of solutions to select.
    ///
    /// returns: `Result<RankingAndCrowdingSelection, OError>`
    pub fn new(solutions_to_select: usize) -> Result<Self, OError> {
        Self::from_args(SelectionArgs {
            solutions_to_select,
            dominance: None,
            parallel: None,
        })
    }

    /// Create a new operator from its arguments.
    ///
    /// # Arguments
    ///
    /// * `args`: The operator arguments.
    ///
    /// returns: `Result<RankingAndCrowdingSelection, OError>`
    pub fn from_args(args: SelectionArgs) -> Result<Self, OError> {
        let name = "RankingAndCrowdingSelection".to_string();
        if args.solutions_to_select == 0 {
            return Err(OError::SelectorOperator(
                name,
                "The number of solutions to select must be larger than 0".to_string(),
            ));
        }

        let selector = Self {
            solutions_to_select: args.solutions_to_select,
            comparator: args.dominance.unwrap_or_default().comparator(),
            parallel: args.parallel.unwrap_or(false),
        };
        info!("Created {selector}");
        Ok(selector)
    }

    /// Replace the dominance relation used to rank the solutions.
    ///
    /// # Arguments
    ///
    /// * `comparator`: The dominance comparator.
    ///
    /// returns: `RankingAndCrowdingSelection`
    pub fn with_comparator(mut self, comparator: Box<dyn DominanceComparator>) -> Self {
        info!("Using {} in {}", comparator.name(), self.name());
        self.comparator = comparator;
        self
    }

    /// The operator name.
    ///
    /// returns: `String`
    pub fn name(&self) -> String {
        "RankingAndCrowdingSelection".to_string()
    }

    /// The number of solutions the operator selects.
    ///
    /// returns: `usize`
    pub fn solutions_to_select(&self) -> usize {
        self.solutions_to_select
    }

    /// The options of the operator.
    ///
    /// returns: `SelectionOptions`
    pub fn options(&self) -> SelectionOptions {
        SelectionOptions {
            solutions_to_select: self.solutions_to_select,
            comparator: self.comparator.name(),
            parallel: self.parallel,
        }
    }

    /// Same as [`RankingAndCrowdingSelection::select`] but the population may be missing. This
    /// returns [`OError::NullInput`] when `population` is `None`.
    ///
    /// # Arguments
    ///
    /// * `population`: The population to select from.
    ///
    /// returns: `Result<Vec<S>, OError>`
    pub fn select_optional<S: Solution>(
        &self,
        population: Option<Vec<S>>,
    ) -> Result<Vec<S>, OError> {
        match population {
            None => Err(OError::NullInput),
            Some(population) => self.select(population),
        }
    }

    /// Select the best solutions from the population. The population is consumed and the
    /// selected solutions are returned with their rank and crowding distance. The population is
    /// dropped when this returns an error; use [`RankingAndCrowdingSelection::check_population`]
    /// beforehand to keep it and retry with a different size or population.
    ///
    /// # Arguments
    ///
    /// * `population`: The population to select from. Its size must be at least the number of
    /// solutions to select.
    ///
    /// returns: `Result<Vec<S>, OError>`
    pub fn select<S: Solution>(&self, mut population: Vec<S>) -> Result<Vec<S>, OError> {
        self.check_population(&population)?;

        debug!("Calculating fronts and ranks for {} solutions", population.len());
        let sorting_results =
            fast_non_dominated_sort(&mut population, self.comparator.as_ref(), self.parallel)?;
        debug!("Collected {} fronts", sorting_results.number_of_fronts());
        let fronts = split_into_fronts(population, &sorting_results.front_indexes)?;

        let mut selected: Vec<S> = Vec::with_capacity(self.solutions_to_select);
        for (fi, mut front) in fronts.into_iter().enumerate() {
            let remaining = self.solutions_to_select - selected.len();
            set_crowding_distance(&mut front)?;

            if front.len() < remaining {
                debug!("Adding front #{} (size: {})", fi + 1, front.len());
                selected.append(&mut front);
                continue;
            }

            debug!(
                "Selection almost full ({} solutions). Adding {} out of {} solutions from front #{}",
                selected.len(),
                remaining,
                front.len(),
                fi + 1
            );
            // Sort in descending order. Prioritise solutions with the largest distance to
            // prevent crowding. The sort is stable.
            front.sort_by(|i, o| {
                let d_i = i.crowding_distance().unwrap_or(0.0);
                let d_o = o.crowding_distance().unwrap_or(0.0);
                d_o.total_cmp(&d_i)
            });
            front.truncate(remaining);
            selected.append(&mut front);
            break;
        }

        debug!("Selected {} solutions", selected.len());
        Ok(selected)
    }

    /// Check that the solutions can be selected by the operator. This returns the same errors
    /// as [`RankingAndCrowdingSelection::select`] for an invalid population, but the population
    /// is only borrowed.
    ///
    /// # Arguments
    ///
    /// * `population`: The population to check.
    ///
    /// returns: `Result<(), OError>`
    pub fn check_population<S: Solution>(&self, population: &[S]) -> Result<(), OError> {
        if population.is_empty() {
            return Err(OError::EmptyInput);
        }
        if population.len() < self.solutions_to_select {
            return Err(OError::InsufficientPopulation(
                population.len(),
                self.solutions_to_select,
            ));
        }

        let number_of_objectives = population[0].number_of_objectives();
        if number_of_objectives == 0 {
            return Err(OError::InvalidInput(
                "The solutions must have at least one objective".to_string(),
            ));
        }
        for (idx, solution) in population.iter().enumerate() {
            if solution.number_of_objectives() != number_of_objectives {
                return Err(OError::InvalidInput(format!(
                    "The solution #{idx} has {} objectives, but {number_of_objectives} were expected",
                    solution.number_of_objectives()
                )));
            }
            if solution.objectives().iter().any(|v| !v.is_finite()) {
                return Err(OError::InvalidInput(format!(
                    "The solution #{idx} has a NaN or infinite objective"
                )));
            }
        }
        Ok(())
    }

    /// Save the selected individuals and the operator options to a JSON file. This returns an
    /// error if the file cannot be saved.
    ///
    /// # Arguments
    ///
    /// * `individuals`: The selected individuals.
    /// * `destination`: The folder where to save the file.
    /// * `file_prefix`: A prefix to prepend at the beginning of the file name. This is `Selection`
    /// when `None`.
    ///
    /// return `Result<(), OError>`
    pub fn save_to_json(
        &self,
        individuals: &[Individual],
        destination: &Path,
        file_prefix: Option<&str>,
    ) -> Result<(), OError> {
        let file_prefix = file_prefix.unwrap_or("Selection");
        let export = SelectionExport {
            options: self.options(),
            individuals: individuals.iter().map(|i| i.serialise()).collect(),
            exported_on: Utc::now(),
        };
        let data = serde_json::to_string_pretty(&export).map_err(|e| {
            OError::SelectionExport(format!(
                "The following error occurred while converting the selection data: {e}"
            ))
        })?;

        let mut file = destination.to_path_buf();
        file.push(format!(
            "{}_{}_{}.json",
            file_prefix,
            self.name(),
            self.solutions_to_select
        ));

        info!("Saving JSON file {:?}", file);
        fs::write(file, data).map_err(|e| {
            OError::SelectionExport(format!(
                "The following error occurred while exporting the selection JSON file: {e}",
            ))
        })?;
        Ok(())
    }
}
