use super::rates::monthly_geometric_rate;
use super::types::{RenterMonthlyState, SimulationParams};

/// Rent and renter's insurance compound every month so the curve stays smooth
/// instead of stepping at lease renewals.
pub fn renter_schedule(params: &SimulationParams) -> Vec<RenterMonthlyState> {
    let total_months = params.total_months();
    let monthly_inflation = monthly_geometric_rate(params.rent_inflation_rate);

    let mut rent = params.monthly_rent;
    let mut insurance = params.renters_insurance_monthly;
    let mut schedule = Vec::with_capacity(total_months as usize);

    for _ in 0..total_months {
        schedule.push(RenterMonthlyState {
            rent_payment: rent,
            renters_insurance: insurance,
            total_outflow: rent + insurance,
        });
        rent *= 1.0 + monthly_inflation;
        insurance *= 1.0 + monthly_inflation;
    }

    schedule
}
