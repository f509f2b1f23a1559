use super::rates::monthly_geometric_rate;
use super::types::{OwnerMonthlyState, SimulationParams};

const ASSESSED_VALUE_GROWTH_RATE: f64 = 2.0;
/// PMI is charged while the balance exceeds this share of the purchase price.
const PMI_LOAN_TO_VALUE_LIMIT: f64 = 0.8;

pub fn owner_schedule(
    params: &SimulationParams,
    monthly_mortgage_payment: f64,
    loan_principal: f64,
) -> Vec<OwnerMonthlyState> {
    let total_months = params.total_months();
    let term_months = params.loan_term_years * 12;

    let monthly_appreciation_rate = monthly_geometric_rate(params.home_appreciation_rate);
    let monthly_assessed_rate = monthly_geometric_rate(ASSESSED_VALUE_GROWTH_RATE);
    let monthly_mortgage_rate = params.mortgage_rate / 100.0 / 12.0;
    let monthly_pmi = loan_principal * (params.pmi_rate / 100.0) / 12.0;
    let pmi_threshold = params.home_price * PMI_LOAN_TO_VALUE_LIMIT;

    let mut home_value = params.home_price;
    let mut assessed_value = params.home_price;
    let mut remaining_principal = loan_principal;
    let mut schedule = Vec::with_capacity(total_months as usize);

    for month in 1..=total_months {
        let tax_base = if params.assessed_value_cap {
            assessed_value
        } else {
            home_value
        };
        let property_tax = tax_base * (params.property_tax_rate / 100.0) / 12.0;
        let maintenance_cost = home_value * (params.maintenance_rate / 100.0) / 12.0;
        let home_insurance = home_value * (params.home_insurance_rate / 100.0) / 12.0;

        let (mortgage_payment, interest_payment, principal_payment, pmi_payment) =
            if month <= term_months {
                let interest = remaining_principal * monthly_mortgage_rate;
                let principal = (monthly_mortgage_payment - interest).min(remaining_principal);
                let pmi = if remaining_principal > pmi_threshold {
                    monthly_pmi
                } else {
                    0.0
                };
                remaining_principal = (remaining_principal - principal).max(0.0);
                (monthly_mortgage_payment, interest, principal, pmi)
            } else {
                remaining_principal = 0.0;
                (0.0, 0.0, 0.0, 0.0)
            };

        let total_outflow =
            mortgage_payment + property_tax + maintenance_cost + home_insurance + pmi_payment;
        let realizable_equity =
            home_value * (1.0 - params.selling_cost_percent / 100.0) - remaining_principal;

        let start_value = home_value;
        home_value *= 1.0 + monthly_appreciation_rate;
        if params.assessed_value_cap {
            assessed_value *= 1.0 + monthly_assessed_rate;
        }

        schedule.push(OwnerMonthlyState {
            mortgage_payment,
            interest_payment,
            principal_payment,
            remaining_principal,
            property_tax,
            home_insurance,
            maintenance_cost,
            pmi_payment,
            total_outflow,
            home_value: start_value,
            realizable_equity,
            monthly_appreciation: home_value - start_value,
        });
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::monthly_payment;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_params() -> SimulationParams {
        SimulationParams {
            home_price: 500_000.0,
            down_payment_percent: 20.0,
            mortgage_rate: 6.5,
            loan_term_years: 30,
            property_tax_rate: 1.25,
            home_insurance_rate: 0.35,
            maintenance_rate: 1.0,
            home_appreciation_rate: 3.0,
            selling_cost_percent: 6.0,
            pmi_rate: 0.0,
            simulation_years: 35,
            ..SimulationParams::default()
        }
    }

    fn schedule_for(params: &SimulationParams) -> Vec<OwnerMonthlyState> {
        let loan = params.home_price - params.down_payment();
        let payment = monthly_payment(loan, params.mortgage_rate, params.loan_term_years);
        owner_schedule(params, payment, loan)
    }

    #[test]
    fn first_month_splits_payment_into_interest_and_principal() {
        let params = sample_params();
        let schedule = schedule_for(&params);
        let first = schedule[0];

        assert_close(first.interest_payment, 400_000.0 * 0.065 / 12.0, 1e-9);
        assert_close(
            first.principal_payment + first.interest_payment,
            first.mortgage_payment,
            1e-9,
        );
        assert_close(
            first.remaining_principal,
            400_000.0 - first.principal_payment,
            1e-9,
        );
        assert_close(first.property_tax, 500_000.0 * 0.0125 / 12.0, 1e-9);
        assert_close(first.home_value, 500_000.0, 1e-9);
    }

    #[test]
    fn loan_is_fully_repaid_at_term_and_payments_stop() {
        let params = sample_params();
        let schedule = schedule_for(&params);

        assert_close(schedule[359].remaining_principal, 0.0, 1e-6);
        for row in &schedule[360..] {
            assert_eq!(row.mortgage_payment, 0.0);
            assert_eq!(row.interest_payment, 0.0);
            assert_eq!(row.principal_payment, 0.0);
            assert_eq!(row.remaining_principal, 0.0);
        }
    }

    #[test]
    fn outflow_drops_by_the_mortgage_payment_at_payoff() {
        let params = sample_params();
        let schedule = schedule_for(&params);
        let last_paid = schedule[359];
        let first_free = schedule[360];

        let drop = last_paid.total_outflow - first_free.total_outflow;
        assert_close(drop, last_paid.mortgage_payment, 0.01 * last_paid.mortgage_payment);
    }

    #[test]
    fn principal_payments_sum_to_loan_amount() {
        let params = sample_params();
        let schedule = schedule_for(&params);
        let repaid: f64 = schedule.iter().map(|row| row.principal_payment).sum();
        assert_close(repaid, 400_000.0, 1e-4);
    }

    #[test]
    fn zero_rate_loan_amortizes_linearly() {
        let mut params = sample_params();
        params.mortgage_rate = 0.0;
        let schedule = schedule_for(&params);

        for row in &schedule[..359] {
            assert_eq!(row.interest_payment, 0.0);
            assert_close(row.principal_payment, 400_000.0 / 360.0, 1e-9);
        }
        // The last payment is clamped to whatever balance the subtractions left.
        assert_eq!(schedule[359].interest_payment, 0.0);
        assert_eq!(
            schedule[359].principal_payment,
            schedule[358].remaining_principal
        );
        assert_close(schedule[359].principal_payment, 400_000.0 / 360.0, 1e-6);
        assert_eq!(schedule[359].remaining_principal, 0.0);
        assert_close(schedule[179].remaining_principal, 200_000.0, 1e-6);
    }

    #[test]
    fn pmi_applies_only_above_eighty_percent_of_original_price() {
        let mut params = sample_params();
        params.down_payment_percent = 10.0;
        params.pmi_rate = 0.5;
        let schedule = schedule_for(&params);

        let monthly_pmi = 450_000.0 * 0.005 / 12.0;
        assert_close(schedule[0].pmi_payment, monthly_pmi, 1e-9);

        let threshold = 500_000.0 * 0.8;
        let mut balance_before = 450_000.0;
        for row in &schedule[..360] {
            if balance_before > threshold {
                assert_close(row.pmi_payment, monthly_pmi, 1e-9);
            } else {
                assert_eq!(row.pmi_payment, 0.0);
            }
            balance_before = row.remaining_principal;
        }
        assert_eq!(schedule[359].pmi_payment, 0.0);
    }

    #[test]
    fn twenty_percent_down_never_pays_pmi() {
        let mut params = sample_params();
        params.pmi_rate = 1.0;
        let schedule = schedule_for(&params);
        assert!(schedule.iter().all(|row| row.pmi_payment == 0.0));
    }

    #[test]
    fn home_value_appreciates_geometrically_and_records_the_delta() {
        let params = sample_params();
        let schedule = schedule_for(&params);

        assert_close(schedule[12].home_value, 500_000.0 * 1.03, 1e-6);
        for pair in schedule.windows(2) {
            assert_close(
                pair[1].home_value - pair[0].home_value,
                pair[0].monthly_appreciation,
                1e-6,
            );
        }
    }

    #[test]
    fn assessed_value_cap_limits_tax_base_growth() {
        let mut capped = sample_params();
        capped.home_appreciation_rate = 8.0;
        capped.assessed_value_cap = true;
        let mut uncapped = capped.clone();
        uncapped.assessed_value_cap = false;

        let capped_schedule = schedule_for(&capped);
        let uncapped_schedule = schedule_for(&uncapped);

        assert_close(
            capped_schedule[12].property_tax,
            500_000.0 * 1.02 * 0.0125 / 12.0,
            1e-6,
        );
        assert!(capped_schedule[120].property_tax < uncapped_schedule[120].property_tax);
        assert_close(
            capped_schedule[120].maintenance_cost,
            uncapped_schedule[120].maintenance_cost,
            1e-9,
        );
    }

    #[test]
    fn realizable_equity_nets_selling_cost_and_balance() {
        let params = sample_params();
        let schedule = schedule_for(&params);
        for row in schedule.iter().step_by(37) {
            assert_close(
                row.realizable_equity,
                row.home_value * 0.94 - row.remaining_principal,
                1e-6,
            );
        }
    }

    #[test]
    fn loan_term_longer_than_horizon_keeps_paying() {
        let mut params = sample_params();
        params.simulation_years = 10;
        let schedule = schedule_for(&params);
        assert_eq!(schedule.len(), 120);
        assert!(schedule.iter().all(|row| row.mortgage_payment > 0.0));
        assert!(schedule[119].remaining_principal > 0.0);
    }
}
