use serde::Serialize;

/// Scenario inputs. Rates are annual percentages (6.5 means 6.5%) unless
/// the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub home_price: f64,
    #[serde(rename = "downPaymentPercentage")]
    pub down_payment_percent: f64,
    pub mortgage_rate: f64,
    pub loan_term_years: u32,
    pub property_tax_rate: f64,
    pub home_insurance_rate: f64,
    #[serde(rename = "maintenanceCostPercentage")]
    pub maintenance_rate: f64,
    pub home_appreciation_rate: f64,
    #[serde(rename = "sellingCostPercentage")]
    pub selling_cost_percent: f64,
    /// Annual percentage of the original loan amount.
    pub pmi_rate: f64,
    /// Tax base grows at a fixed 2%/yr instead of tracking market value.
    pub assessed_value_cap: bool,

    pub monthly_rent: f64,
    pub rent_inflation_rate: f64,
    pub renters_insurance_monthly: f64,

    pub investment_return_rate: f64,
    pub inflation_rate: f64,

    pub gross_income: f64,
    pub federal_tax_rate: f64,
    pub state_tax_rate: f64,
    /// Annual pre-tax retirement contribution; grows with income.
    pub contribution_401k: f64,
    /// `None` tracks `inflation_rate`.
    pub income_growth_rate: Option<f64>,
    /// 0 = standard deduction, 100 = every deductible dollar is itemized.
    pub itemized_deduction_rate: f64,

    pub simulation_years: u32,
    pub inflation_adjusted: bool,

    pub renter_discipline: f64,
    pub owner_discipline: f64,
}

impl SimulationParams {
    pub fn down_payment(&self) -> f64 {
        self.home_price * (self.down_payment_percent / 100.0)
    }

    pub fn combined_marginal_rate(&self) -> f64 {
        (self.federal_tax_rate + self.state_tax_rate) / 100.0
    }

    pub fn effective_income_growth_rate(&self) -> f64 {
        self.income_growth_rate.unwrap_or(self.inflation_rate)
    }

    pub fn total_months(&self) -> u32 {
        self.simulation_years * 12
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            home_price: 525_000.0,
            down_payment_percent: 10.0,
            mortgage_rate: 6.5,
            loan_term_years: 30,
            property_tax_rate: 1.32,
            home_insurance_rate: 0.30,
            maintenance_rate: 1.0,
            home_appreciation_rate: 3.5,
            selling_cost_percent: 6.0,
            pmi_rate: 0.0,
            assessed_value_cap: false,
            monthly_rent: 2_500.0,
            rent_inflation_rate: 3.5,
            renters_insurance_monthly: 15.0,
            investment_return_rate: 10.0,
            inflation_rate: 3.0,
            gross_income: 115_000.0,
            federal_tax_rate: 22.0,
            state_tax_rate: 9.3,
            contribution_401k: 0.0,
            income_growth_rate: None,
            itemized_deduction_rate: 0.0,
            simulation_years: 35,
            inflation_adjusted: false,
            renter_discipline: 0.0,
            owner_discipline: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnerMonthlyState {
    pub mortgage_payment: f64,
    pub interest_payment: f64,
    pub principal_payment: f64,
    pub remaining_principal: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub maintenance_cost: f64,
    pub pmi_payment: f64,
    pub total_outflow: f64,
    /// Value at the start of the month.
    pub home_value: f64,
    pub realizable_equity: f64,
    pub monthly_appreciation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenterMonthlyState {
    pub rent_payment: f64,
    pub renters_insurance: f64,
    pub total_outflow: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Portfolios {
    pub owner: f64,
    pub renter: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCashFlow {
    pub month: u32,
    pub year: u32,

    pub mortgage_payment: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub maintenance_cost: f64,
    pub pmi_payment: f64,
    pub total_owner_costs: f64,
    pub total_owner_outflow: f64,

    pub rent_payment: f64,
    pub renters_insurance: f64,
    pub total_renter_outflow: f64,

    pub savings: f64,
    pub invested_amount: f64,
    pub tax_savings: f64,
    pub owner_net_worth: f64,
    pub renter_net_worth: f64,

    pub gross_income: f64,
    pub net_income: f64,
    pub lifestyle_budget_renter: f64,
    pub lifestyle_budget_owner: f64,
    pub housing_income_ratio_owner: f64,
    pub housing_income_ratio_renter: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualFlows {
    pub year: u32,

    pub renter_rent: f64,
    pub renter_insurance: f64,
    pub renter_portfolio_contribution: f64,
    pub renter_portfolio_growth: f64,

    pub owner_principal_paid: f64,
    pub owner_interest_paid: f64,
    pub owner_tax: f64,
    pub owner_insurance: f64,
    pub owner_maintenance: f64,
    pub owner_pmi: f64,
    pub owner_tax_savings: f64,
    pub owner_home_appreciation: f64,
    pub owner_portfolio_contribution: f64,
    pub owner_portfolio_growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSnapshot {
    pub year: u32,
    pub owner_net_worth: f64,
    pub renter_net_worth: f64,
    pub crossover: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crossover {
    pub year: u32,
    pub total_months: u32,
}

impl Crossover {
    /// Month within the crossover year, 1..=12.
    pub fn month_of_year(self) -> u32 {
        (self.total_months - 1) % 12 + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_interest_paid: f64,
    pub final_owner_net_worth: f64,
    pub final_renter_net_worth: f64,
    pub renter_total_initial_contribution: f64,
    pub renter_total_initial_yield: f64,
    pub renter_total_continuous_contribution: f64,
    pub renter_total_continuous_yield: f64,
    pub total_owner_unrecoverable_costs: f64,
    pub total_renter_unrecoverable_costs: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_data: Vec<MonthlyCashFlow>,
    pub annual_data: Vec<AnnualSnapshot>,
    pub annual_flows: Vec<AnnualFlows>,
    pub crossover_date: Option<Crossover>,
    pub monthly_payment_crossover_date: Option<Crossover>,
    pub summary: SimulationSummary,
}
