pub use crowding_distance::set_crowding_distance;
pub use fast_non_dominated_sort::{
    fast_non_dominated_sort, split_into_fronts, NonDominatedSortResults,
};
pub use vectors::{argsort, Sort};

mod crowding_distance;
mod fast_non_dominated_sort;
mod vectors;
