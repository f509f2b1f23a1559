use super::owner::owner_schedule;
use super::rates::{monthly_geometric_rate, monthly_payment};
use super::renter::renter_schedule;
use super::types::{OwnerMonthlyState, RenterMonthlyState, SimulationParams};

#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub down_payment: f64,
    pub loan_principal: f64,
    pub monthly_mortgage_payment: f64,
    pub monthly_investment_return: f64,
    pub monthly_income_growth: f64,
    /// Zero unless results are reported in today's money.
    pub monthly_discount_rate: f64,
    pub owner_schedule: Vec<OwnerMonthlyState>,
    pub renter_schedule: Vec<RenterMonthlyState>,
}

pub fn setup_simulation(params: &SimulationParams) -> SimulationContext {
    let down_payment = params.down_payment();
    let loan_principal = params.home_price - down_payment;
    let monthly_mortgage_payment =
        monthly_payment(loan_principal, params.mortgage_rate, params.loan_term_years);

    let monthly_discount_rate = if params.inflation_adjusted {
        monthly_geometric_rate(params.inflation_rate)
    } else {
        0.0
    };

    SimulationContext {
        down_payment,
        loan_principal,
        monthly_mortgage_payment,
        monthly_investment_return: monthly_geometric_rate(params.investment_return_rate),
        monthly_income_growth: monthly_geometric_rate(params.effective_income_growth_rate()),
        monthly_discount_rate,
        owner_schedule: owner_schedule(params, monthly_mortgage_payment, loan_principal),
        renter_schedule: renter_schedule(params),
    }
}
