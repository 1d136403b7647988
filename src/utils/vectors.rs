use std::cmp::Reverse;

use ordered_float::OrderedFloat;

/// Define the sort type
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Sort {
    /// Sort values in ascending order
    Ascending,
    /// Sort values in descending order
    Descending,
}

/// Returns the indices that would sort an array. The sort is stable: indices of equal values keep
/// their original order with both sort types.
///
/// # Arguments
///
/// * `data`: The vector to sort.
/// * `sort_type`: Specify whether to sort in ascending or descending order.
///
/// returns: `Vec<usize>`. The vector with the indices.
pub fn argsort(data: &[f64], sort_type: Sort) -> Vec<usize> {
    let mut indices = (0..data.len()).collect::<Vec<_>>();
    match sort_type {
        Sort::Ascending => indices.sort_by_key(|i| OrderedFloat(data[*i])),
        Sort::Descending => indices.sort_by_key(|i| Reverse(OrderedFloat(data[*i]))),
    }
    indices
}
