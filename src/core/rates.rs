/// Fixed monthly principal-and-interest payment for a fully amortizing loan.
///
/// The mortgage uses the simple APR convention (`annual_rate_percent / 12`),
/// not the geometric conversion used for every other rate in the engine.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let payments = f64::from(years * 12);
    if annual_rate_percent == 0.0 {
        return principal / payments;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powf(payments);
    principal * monthly_rate * growth / (growth - 1.0)
}

pub fn monthly_geometric_rate(annual_rate_percent: f64) -> f64 {
    if annual_rate_percent == 0.0 {
        return 0.0;
    }
    (1.0 + annual_rate_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

pub fn discount_factor(monthly_discount_rate: f64, month: u32) -> f64 {
    1.0 / (1.0 + monthly_discount_rate).powi(month as i32)
}
