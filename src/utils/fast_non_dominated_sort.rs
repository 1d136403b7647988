use log::debug;
use rayon::prelude::*;

use crate::core::{OError, Solution};
use crate::operators::{DominanceComparator, PreferredSolution};

/// Outputs of the non-dominated sort algorithm.
#[derive(Debug)]
pub struct NonDominatedSortResults {
    /// A vector containing sub-vectors. Each child vector represents a front (with the first being
    /// the primary non-dominated front with solutions of rank 0); each child vector contains
    /// the indexes of the individuals belonging to that front. Each index refers to the vector of
    /// individuals passed to [`fast_non_dominated_sort`].
    pub front_indexes: Vec<Vec<usize>>,
    /// Number of individuals that dominates a solution at a given vector index. When the counter
    /// is 0, the solution is non-dominated. This is `n_p` in the paper.
    pub domination_counter: Vec<usize>,
}

impl NonDominatedSortResults {
    /// The number of fronts found by the sort.
    ///
    /// returns: `usize`
    pub fn number_of_fronts(&self) -> usize {
        self.front_indexes.len()
    }
}

/// Non-dominated fast sorting from NSGA2 paper (with complexity $O(M * N^2)$, where `M` is the
/// number of objectives and `N` the number of individuals).
///
/// This sorts solutions into fronts and ranks the individuals based on the number of solutions
/// an individual dominates. Solutions that are not dominated by any other individuals will belong
/// to the first front with rank `0`. The method also stores the rank into each individual with
/// [`Solution::set_rank`].
///
/// Front membership only depends on the dominance relation. The first front lists the
/// individuals in the order they are given; the following fronts list them in the order they
/// are released by the individuals of the previous front.
///
/// Implemented based on paragraph 3A in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Arguments
///
/// * `individuals`: The individuals to sort by dominance.
/// * `comparator`: The dominance relation to use.
/// * `parallel`: Compare the individuals using the rayon thread pool. The fronts are the same as
/// with a sequential comparison.
///
/// returns: `Result<NonDominatedSortResults, OError>`.
pub fn fast_non_dominated_sort<S: Solution>(
    individuals: &mut [S],
    comparator: &dyn DominanceComparator,
    parallel: bool,
) -> Result<NonDominatedSortResults, OError> {
    if individuals.is_empty() {
        return Err(OError::InvalidInput(
            "At least 1 individual is needed for sorting, but none was given".to_string(),
        ));
    }

    // this set contains all the individuals being dominated by an individual `p`. This is `S_p`
    // in the paper. `domination_counter` is the number of individuals that dominates `p`. When
    // the counter is 0, `p` is non-dominated. This is `n_p` in the paper
    let (dominated_solutions, domination_counter) = if parallel {
        dominance_relations_parallel(individuals, comparator)?
    } else {
        dominance_relations(individuals, comparator)?
    };

    // the solutions that are non-dominated by any other belong to the first front
    let mut current_front: Vec<usize> = (0..individuals.len())
        .filter(|pi| domination_counter[*pi] == 0)
        .collect();

    // the vector with all fronts of sorted ranks. The first item has rank 0 and subsequent elements
    // have increasing rank
    let mut all_fronts: Vec<Vec<usize>> = Vec::new();
    let mut counter = domination_counter.clone();

    // collect the other fronts
    loop {
        let mut next_front: Vec<usize> = Vec::new();
        // loop individuals in the current non-dominated front
        for pi in current_front.iter() {
            // loop solutions that are dominated by `p` in the current front
            for qi in dominated_solutions[*pi].iter() {
                // decrement the domination count for individual `q`
                counter[*qi] -= 1;

                // if counter is 0 then none of the individuals in the subsequent fronts are
                // dominated by `p` and `q` belongs to the next front
                if counter[*qi] == 0 {
                    next_front.push(*qi);
                }
            }
        }
        all_fronts.push(current_front);

        // stop when all solutions have been ranked
        if next_front.is_empty() {
            break;
        }
        current_front = next_front;
    }

    for (rank, front) in all_fronts.iter().enumerate() {
        for idx in front {
            individuals[*idx].set_rank(rank);
        }
    }
    debug!(
        "Sorted {} individuals into {} fronts",
        individuals.len(),
        all_fronts.len()
    );

    Ok(NonDominatedSortResults {
        front_indexes: all_fronts,
        domination_counter,
    })
}

/// The dominated sets and the domination counters, by comparing each pair once.
fn dominance_relations<S: Solution>(
    individuals: &[S],
    comparator: &dyn DominanceComparator,
) -> Result<(Vec<Vec<usize>>, Vec<usize>), OError> {
    let mut dominated_solutions: Vec<Vec<usize>> = vec![Vec::new(); individuals.len()];
    let mut domination_counter: Vec<usize> = vec![0; individuals.len()];

    for pi in 0..individuals.len() {
        for qi in (pi + 1)..individuals.len() {
            match comparator.compare(&individuals[pi], &individuals[qi])? {
                PreferredSolution::First => {
                    // `p` dominates `q` - add `q` to the set of solutions dominated by `p`
                    dominated_solutions[pi].push(qi);
                    domination_counter[qi] += 1;
                }
                PreferredSolution::Second => {
                    // q dominates p
                    dominated_solutions[qi].push(pi);
                    domination_counter[pi] += 1;
                }
                PreferredSolution::MutuallyPreferred => {}
            }
        }
    }
    Ok((dominated_solutions, domination_counter))
}

/// Same as [`dominance_relations`] but each worker handles one individual `p` and compares it
/// against all the others. Each pair is compared twice, but no state is shared between workers.
/// The dominated sets are sorted by index, as in the sequential version.
fn dominance_relations_parallel<S: Solution>(
    individuals: &[S],
    comparator: &dyn DominanceComparator,
) -> Result<(Vec<Vec<usize>>, Vec<usize>), OError> {
    let relations = (0..individuals.len())
        .into_par_iter()
        .map(|pi| -> Result<(Vec<usize>, usize), OError> {
            let mut dominated: Vec<usize> = Vec::new();
            let mut counter: usize = 0;
            for (qi, other) in individuals.iter().enumerate() {
                if qi == pi {
                    continue;
                }
                match comparator.compare(&individuals[pi], other)? {
                    PreferredSolution::First => dominated.push(qi),
                    PreferredSolution::Second => counter += 1,
                    PreferredSolution::MutuallyPreferred => {}
                }
            }
            Ok((dominated, counter))
        })
        .collect::<Result<Vec<(Vec<usize>, usize)>, OError>>()?;

    Ok(relations.into_iter().unzip())
}

/// Move the individuals into their fronts. This returns an error if the front indexes do not
/// cover each individual exactly once.
///
/// # Arguments
///
/// * `individuals`: The individuals that were sorted.
/// * `front_indexes`: The fronts from [`NonDominatedSortResults::front_indexes`].
///
/// returns: `Result<Vec<Vec<S>>, OError>`
pub fn split_into_fronts<S: Solution>(
    individuals: Vec<S>,
    front_indexes: &[Vec<usize>],
) -> Result<Vec<Vec<S>>, OError> {
    let mut slots: Vec<Option<S>> = individuals.into_iter().map(Some).collect();
    let mut fronts: Vec<Vec<S>> = Vec::with_capacity(front_indexes.len());

    for front in front_indexes {
        let mut sub_front: Vec<S> = Vec::with_capacity(front.len());
        for idx in front {
            let individual = slots
                .get_mut(*idx)
                .and_then(Option::take)
                .ok_or(OError::NonExistingIndex("individual".to_string(), *idx))?;
            sub_front.push(individual);
        }
        fronts.push(sub_front);
    }

    if let Some(idx) = slots.iter().position(Option::is_some) {
        return Err(OError::Generic(format!(
            "The individual #{idx} does not belong to any front"
        )));
    }
    Ok(fronts)
}
