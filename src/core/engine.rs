use tracing::debug;

use super::aggregator::{MonthlyComponents, accumulate, start_year};
use super::monthly::{MonthInput, evaluate_month};
use super::rates::discount_factor;
use super::setup::setup_simulation;
use super::types::{
    AnnualFlows, AnnualSnapshot, Crossover, MonthlyCashFlow, Portfolios, SimulationParams,
    SimulationResult, SimulationSummary,
};

/// The renter's portfolio split by funding source. Both halves compound at
/// the same rate as the unified portfolio, which stays authoritative.
#[derive(Debug, Clone, Copy)]
struct RenterDecomposition {
    initial: f64,
    continuous: f64,
    continuous_contributed: f64,
}

impl RenterDecomposition {
    fn new(down_payment: f64) -> Self {
        Self {
            initial: down_payment,
            continuous: 0.0,
            continuous_contributed: 0.0,
        }
    }

    fn advance(&mut self, contribution: f64, monthly_return: f64, discount_factor: f64) {
        self.initial *= 1.0 + monthly_return;
        self.continuous = (self.continuous + contribution) * (1.0 + monthly_return);
        self.continuous_contributed += contribution * discount_factor;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CrossoverTracker {
    net_worth: Option<Crossover>,
    monthly_payment: Option<Crossover>,
}

impl CrossoverTracker {
    fn observe(&mut self, row: &MonthlyCashFlow) {
        let at = Crossover {
            year: row.year,
            total_months: row.month,
        };
        if self.net_worth.is_none() && row.owner_net_worth > row.renter_net_worth {
            self.net_worth = Some(at);
        }
        if self.monthly_payment.is_none() && row.total_owner_outflow <= row.total_renter_outflow {
            self.monthly_payment = Some(at);
        }
    }
}

/// Inputs are not range-checked here; callers validate.
pub fn simulate(params: &SimulationParams) -> SimulationResult {
    let ctx = setup_simulation(params);
    let total_months = params.total_months();
    debug!(
        months = total_months,
        loan_principal = ctx.loan_principal,
        monthly_payment = ctx.monthly_mortgage_payment,
        "starting rent-vs-buy simulation"
    );

    let mut portfolios = Portfolios {
        owner: 0.0,
        renter: ctx.down_payment,
    };
    let mut gross_income = params.gross_income;
    let mut annual_401k = params.contribution_401k;
    let mut decomposition = RenterDecomposition::new(ctx.down_payment);
    let mut crossovers = CrossoverTracker::default();
    let mut total_interest_paid = 0.0;
    let mut final_discount_factor = 1.0;

    let mut monthly_data = Vec::with_capacity(total_months as usize);
    let mut annual_flows: Vec<AnnualFlows> = Vec::with_capacity(params.simulation_years as usize);
    let mut year_flows = start_year(1, ctx.down_payment);

    for (idx, (owner, renter)) in ctx
        .owner_schedule
        .iter()
        .zip(&ctx.renter_schedule)
        .enumerate()
    {
        let month = idx as u32 + 1;
        let year = month.div_ceil(12);
        if year > year_flows.year {
            annual_flows.push(year_flows);
            year_flows = start_year(year, ctx.down_payment);
        }

        let outcome = evaluate_month(MonthInput {
            params,
            month,
            owner,
            renter,
            portfolios,
            gross_income,
            annual_401k,
            monthly_investment_return: ctx.monthly_investment_return,
            discount_factor: discount_factor(ctx.monthly_discount_rate, month),
        });

        total_interest_paid += owner.interest_payment * outcome.discount_factor;
        year_flows = accumulate(
            year_flows,
            &MonthlyComponents::discounted(owner, renter, &outcome),
        );
        decomposition.advance(
            outcome.renter_contribution,
            ctx.monthly_investment_return,
            outcome.discount_factor,
        );

        gross_income *= 1.0 + ctx.monthly_income_growth;
        annual_401k *= 1.0 + ctx.monthly_income_growth;

        crossovers.observe(&outcome.row);
        portfolios = outcome.portfolios;
        final_discount_factor = outcome.discount_factor;
        monthly_data.push(outcome.row);
    }

    if !monthly_data.is_empty() {
        annual_flows.push(year_flows);
    }

    let annual_data = annual_snapshots(&monthly_data, params.simulation_years);
    let summary = build_summary(
        &monthly_data,
        ctx.down_payment,
        total_interest_paid,
        &decomposition,
        final_discount_factor,
    );

    debug!(
        final_owner_net_worth = summary.final_owner_net_worth,
        final_renter_net_worth = summary.final_renter_net_worth,
        crossover_month = crossovers.net_worth.map(|c| c.total_months),
        "rent-vs-buy simulation finished"
    );

    SimulationResult {
        monthly_data,
        annual_data,
        annual_flows,
        crossover_date: crossovers.net_worth,
        monthly_payment_crossover_date: crossovers.monthly_payment,
        summary,
    }
}

fn annual_snapshots(monthly_data: &[MonthlyCashFlow], years: u32) -> Vec<AnnualSnapshot> {
    (1..=years)
        .filter_map(|year| monthly_data.get((year * 12 - 1) as usize))
        .map(|row| AnnualSnapshot {
            year: row.year,
            owner_net_worth: row.owner_net_worth,
            renter_net_worth: row.renter_net_worth,
            crossover: row.owner_net_worth > row.renter_net_worth,
        })
        .collect()
}

fn build_summary(
    monthly_data: &[MonthlyCashFlow],
    down_payment: f64,
    total_interest_paid: f64,
    decomposition: &RenterDecomposition,
    final_discount_factor: f64,
) -> SimulationSummary {
    let (final_owner_net_worth, final_renter_net_worth) = monthly_data
        .last()
        .map(|row| (row.owner_net_worth, row.renter_net_worth))
        .unwrap_or((0.0, 0.0));

    let initial_value = decomposition.initial * final_discount_factor;
    let continuous_value = decomposition.continuous * final_discount_factor;

    SimulationSummary {
        total_interest_paid,
        final_owner_net_worth,
        final_renter_net_worth,
        renter_total_initial_contribution: down_payment,
        renter_total_initial_yield: initial_value - down_payment,
        renter_total_continuous_contribution: decomposition.continuous_contributed,
        renter_total_continuous_yield: continuous_value - decomposition.continuous_contributed,
        total_owner_unrecoverable_costs: monthly_data.iter().map(|m| m.total_owner_costs).sum(),
        total_renter_unrecoverable_costs: monthly_data
            .iter()
            .map(|m| m.total_renter_outflow)
            .sum(),
    }
}
