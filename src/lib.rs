//! Environmental selection for multi-objective evolutionary algorithms, as done in NSGA2.
//!
//! A population of evaluated solutions is sorted into non-dominated fronts
//! ([`utils::fast_non_dominated_sort`]), the crowding distance of the solutions in each front is
//! calculated ([`utils::set_crowding_distance`]) and the best solutions are kept by
//! [`operators::RankingAndCrowdingSelection`]. All objectives are minimised.
//!
//! The operators work on any type implementing [`core::Solution`]; [`core::Individual`] is the
//! built-in implementation. The [`problems`] module contains benchmark problems to generate
//! evaluated populations.

pub mod core;
pub mod operators;
pub mod problems;
pub mod utils;
