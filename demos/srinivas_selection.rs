use std::env;
use std::error::Error;

use log::{info, LevelFilter};

use nsga_survival::core::Solution;
use nsga_survival::operators::{DominanceType, RankingAndCrowdingSelection, SelectionArgs};
use nsga_survival::problems::{random_population, SrinivasProblem};

/// Select half of a random population of the Srinivas' problem, where the following 2
/// objectives are minimised:
/// - `f_1(x) = 2 + (x_1 - 2)^2 + (x_2 - 1)^2`
/// - `f_2(x) = 9 x_1 - (x_2 - 1)^2`
/// subject to 2 constraints. Feasible solutions are always preferred to infeasible ones.
///
/// The selected solutions are exported to a JSON file in the temporary folder.
///
/// `cargo run --example srinivas_selection`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    // create 200 random solutions
    let population = random_population(&SrinivasProblem, 200, Some(10))?;
    let feasible = population.iter().filter(|i| i.is_feasible()).count();
    info!("Generated {} solutions ({feasible} feasible)", population.len());

    let args = SelectionArgs {
        solutions_to_select: 100,
        dominance: Some(DominanceType::ParetoConstrained),
        parallel: Some(true),
    };
    let selector = RankingAndCrowdingSelection::from_args(args)?;
    let selected = selector.select(population)?;

    let non_dominated = selected.iter().filter(|i| i.rank() == Some(0)).count();
    info!("Selected {} solutions, {non_dominated} in the first front", selected.len());

    selector.save_to_json(&selected, &env::temp_dir(), Some("Srinivas"))?;
    Ok(())
}
