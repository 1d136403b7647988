pub use comparison::{
    DominanceComparator, DominanceType, ParetoConstrainedDominance, ParetoDominance,
    PreferredSolution,
};
pub use survival::{
    RankingAndCrowdingSelection, SelectionArgs, SelectionExport, SelectionOptions,
};

pub mod comparison;
pub mod survival;
