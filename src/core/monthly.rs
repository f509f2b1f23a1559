use super::types::{
    MonthlyCashFlow, OwnerMonthlyState, Portfolios, RenterMonthlyState, SimulationParams,
};

/// Annual cap on deductible property tax, prorated monthly.
const PROPERTY_TAX_DEDUCTION_CAP: f64 = 10_000.0;

#[derive(Debug, Clone, Copy)]
pub struct MonthInput<'a> {
    pub params: &'a SimulationParams,
    pub month: u32,
    pub owner: &'a OwnerMonthlyState,
    pub renter: &'a RenterMonthlyState,
    pub portfolios: Portfolios,
    pub gross_income: f64,
    pub annual_401k: f64,
    pub monthly_investment_return: f64,
    pub discount_factor: f64,
}

/// Monetary fields other than `row` are nominal; callers scale them with
/// `discount_factor` before summing across months.
#[derive(Debug, Clone)]
pub struct MonthOutcome {
    pub row: MonthlyCashFlow,
    pub portfolios: Portfolios,
    pub owner_contribution: f64,
    pub renter_contribution: f64,
    pub owner_growth: f64,
    pub renter_growth: f64,
    pub tax_savings: f64,
    pub discount_factor: f64,
}

pub fn monthly_tax_savings(params: &SimulationParams, owner: &OwnerMonthlyState) -> f64 {
    let deductible_tax = owner.property_tax.min(PROPERTY_TAX_DEDUCTION_CAP / 12.0);
    let deductible = deductible_tax + owner.interest_payment;
    let usage = params.itemized_deduction_rate.clamp(0.0, 100.0) / 100.0;
    deductible * params.combined_marginal_rate() * usage
}

pub fn evaluate_month(input: MonthInput<'_>) -> MonthOutcome {
    let MonthInput {
        params,
        month,
        owner,
        renter,
        portfolios,
        gross_income,
        annual_401k,
        monthly_investment_return,
        discount_factor,
    } = input;

    let marginal_rate = params.combined_marginal_rate();
    let tax_savings = monthly_tax_savings(params, owner);
    let owner_outflow = owner.total_outflow - tax_savings;
    let renter_outflow = renter.total_outflow;

    let gross_monthly = gross_income / 12.0;
    let monthly_401k = annual_401k / 12.0;
    let income_tax = (gross_monthly - monthly_401k) * marginal_rate;
    let net_income = gross_monthly - income_tax - monthly_401k;

    let diff = owner_outflow - renter_outflow;
    let renter_discipline = params.renter_discipline.clamp(0.0, 100.0) / 100.0;
    let owner_discipline = params.owner_discipline.clamp(0.0, 100.0) / 100.0;
    let (owner_surplus, renter_surplus) = if diff > 0.0 {
        (0.0, diff * renter_discipline)
    } else {
        (-diff * owner_discipline, 0.0)
    };

    let owner_funded = portfolios.owner + monthly_401k + owner_surplus;
    let renter_funded = portfolios.renter + monthly_401k + renter_surplus;
    let next = Portfolios {
        owner: owner_funded * (1.0 + monthly_investment_return),
        renter: renter_funded * (1.0 + monthly_investment_return),
    };

    let owner_net_worth = owner.realizable_equity + next.owner;
    let renter_net_worth = next.renter;

    let lifestyle_budget_owner = net_income - owner_outflow - owner_surplus;
    let lifestyle_budget_renter = net_income - renter_outflow - renter_surplus;

    let housing_income_ratio_owner = owner_outflow / gross_monthly * 100.0;
    let housing_income_ratio_renter = renter_outflow / gross_monthly * 100.0;

    let unrecoverable = owner.property_tax
        + owner.home_insurance
        + owner.maintenance_cost
        + owner.interest_payment
        + owner.pmi_payment
        - tax_savings;

    let df = discount_factor;
    let row = MonthlyCashFlow {
        month,
        year: month.div_ceil(12),
        mortgage_payment: owner.mortgage_payment * df,
        property_tax: owner.property_tax * df,
        home_insurance: owner.home_insurance * df,
        maintenance_cost: owner.maintenance_cost * df,
        pmi_payment: owner.pmi_payment * df,
        total_owner_costs: unrecoverable * df,
        total_owner_outflow: owner_outflow * df,
        rent_payment: renter.rent_payment * df,
        renters_insurance: renter.renters_insurance * df,
        total_renter_outflow: renter_outflow * df,
        savings: diff.abs() * df,
        invested_amount: (owner_surplus + renter_surplus) * df,
        tax_savings: tax_savings * df,
        owner_net_worth: owner_net_worth * df,
        renter_net_worth: renter_net_worth * df,
        gross_income: gross_monthly * df,
        net_income: net_income * df,
        lifestyle_budget_renter: lifestyle_budget_renter * df,
        lifestyle_budget_owner: lifestyle_budget_owner * df,
        housing_income_ratio_owner,
        housing_income_ratio_renter,
    };

    MonthOutcome {
        row,
        portfolios: next,
        owner_contribution: owner_surplus + monthly_401k,
        renter_contribution: renter_surplus + monthly_401k,
        owner_growth: next.owner - owner_funded,
        renter_growth: next.renter - renter_funded,
        tax_savings,
        discount_factor: df,
    }
}
