use super::monthly::MonthOutcome;
use super::types::{AnnualFlows, OwnerMonthlyState, RenterMonthlyState};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyComponents {
    pub rent: f64,
    pub renter_insurance: f64,
    pub renter_contribution: f64,
    pub renter_growth: f64,
    pub principal: f64,
    pub interest: f64,
    pub property_tax: f64,
    pub owner_insurance: f64,
    pub maintenance: f64,
    pub pmi: f64,
    pub tax_savings: f64,
    pub appreciation: f64,
    pub owner_contribution: f64,
    pub owner_growth: f64,
}

impl MonthlyComponents {
    pub fn discounted(
        owner: &OwnerMonthlyState,
        renter: &RenterMonthlyState,
        outcome: &MonthOutcome,
    ) -> Self {
        let df = outcome.discount_factor;
        Self {
            rent: renter.rent_payment * df,
            renter_insurance: renter.renters_insurance * df,
            renter_contribution: outcome.renter_contribution * df,
            renter_growth: outcome.renter_growth * df,
            principal: owner.principal_payment * df,
            interest: owner.interest_payment * df,
            property_tax: owner.property_tax * df,
            owner_insurance: owner.home_insurance * df,
            maintenance: owner.maintenance_cost * df,
            pmi: owner.pmi_payment * df,
            tax_savings: outcome.tax_savings * df,
            appreciation: owner.monthly_appreciation * df,
            owner_contribution: outcome.owner_contribution * df,
            owner_growth: outcome.owner_growth * df,
        }
    }
}

/// Fresh totals for `year`. Year one opens with the down payment as the
/// owner's initial equity purchase and the renter's lump-sum investment.
pub fn start_year(year: u32, down_payment: f64) -> AnnualFlows {
    let mut flows = AnnualFlows {
        year,
        ..AnnualFlows::default()
    };
    if year == 1 {
        flows.owner_principal_paid = down_payment;
        flows.renter_portfolio_contribution = down_payment;
    }
    flows
}

pub fn accumulate(flows: AnnualFlows, month: &MonthlyComponents) -> AnnualFlows {
    AnnualFlows {
        year: flows.year,
        renter_rent: flows.renter_rent + month.rent,
        renter_insurance: flows.renter_insurance + month.renter_insurance,
        renter_portfolio_contribution: flows.renter_portfolio_contribution
            + month.renter_contribution,
        renter_portfolio_growth: flows.renter_portfolio_growth + month.renter_growth,
        owner_principal_paid: flows.owner_principal_paid + month.principal,
        owner_interest_paid: flows.owner_interest_paid + month.interest,
        owner_tax: flows.owner_tax + month.property_tax,
        owner_insurance: flows.owner_insurance + month.owner_insurance,
        owner_maintenance: flows.owner_maintenance + month.maintenance,
        owner_pmi: flows.owner_pmi + month.pmi,
        owner_tax_savings: flows.owner_tax_savings + month.tax_savings,
        owner_home_appreciation: flows.owner_home_appreciation + month.appreciation,
        owner_portfolio_contribution: flows.owner_portfolio_contribution
            + month.owner_contribution,
        owner_portfolio_growth: flows.owner_portfolio_growth + month.owner_growth,
    }
}
