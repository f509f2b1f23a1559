mod aggregator;
mod engine;
mod monthly;
mod owner;
mod rates;
mod renter;
mod report;
mod setup;
mod solver;
mod types;

pub use engine::simulate;
pub use rates::{monthly_geometric_rate, monthly_payment};
pub use report::render_report;
pub use solver::{
    BreakEvenConfig, BreakEvenIteration, BreakEvenResult, BreakEvenTarget, SolverError,
    solve_break_even,
};
pub use types::{
    AnnualFlows, AnnualSnapshot, Crossover, MonthlyCashFlow, OwnerMonthlyState,
    RenterMonthlyState, SimulationParams, SimulationResult, SimulationSummary,
};
