use std::fmt::Write;

use super::types::{SimulationParams, SimulationResult};

fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

pub fn render_report(params: &SimulationParams, result: &SimulationResult) -> String {
    let mut out = String::new();
    write_report(&mut out, params, result).expect("writing to a String cannot fail");
    out
}

fn write_report(
    out: &mut String,
    params: &SimulationParams,
    result: &SimulationResult,
) -> std::fmt::Result {
    writeln!(out, "## Simulation Inputs")?;
    writeln!(out)?;
    writeln!(out, "**Income & Taxes:**")?;
    writeln!(out, "- Gross Income: {}", format_currency(params.gross_income))?;
    writeln!(out, "- Federal Tax Rate: {}", format_percent(params.federal_tax_rate))?;
    writeln!(out, "- State Tax Rate: {}", format_percent(params.state_tax_rate))?;
    writeln!(
        out,
        "- Income Growth Rate: {}",
        format_percent(params.effective_income_growth_rate())
    )?;
    writeln!(out, "- Annual 401k Contribution: {}", format_currency(params.contribution_401k))?;
    writeln!(
        out,
        "- Itemized Deduction Usage: {}",
        format_percent(params.itemized_deduction_rate)
    )?;
    writeln!(out)?;
    writeln!(out, "**Housing (Buy):**")?;
    writeln!(out, "- Home Price: {}", format_currency(params.home_price))?;
    writeln!(out, "- Down Payment: {}%", params.down_payment_percent)?;
    writeln!(out, "- Mortgage Rate: {}", format_percent(params.mortgage_rate))?;
    writeln!(out, "- Loan Term: {} years", params.loan_term_years)?;
    writeln!(out, "- Property Tax Rate: {}", format_percent(params.property_tax_rate))?;
    writeln!(out, "- Assessed Value Cap: {}", yes_no(params.assessed_value_cap))?;
    writeln!(
        out,
        "- Home Appreciation Rate: {}",
        format_percent(params.home_appreciation_rate)
    )?;
    writeln!(out, "- Owner Discipline (Invest Difference): {}%", params.owner_discipline)?;
    writeln!(out)?;
    writeln!(out, "**Housing (Rent):**")?;
    writeln!(out, "- Monthly Rent: {}", format_currency(params.monthly_rent))?;
    writeln!(out, "- Rent Inflation Rate: {}", format_percent(params.rent_inflation_rate))?;
    writeln!(out, "- Renter Discipline (Invest Difference): {}%", params.renter_discipline)?;
    writeln!(out)?;
    writeln!(out, "**Market:**")?;
    writeln!(
        out,
        "- Investment Return Rate: {}",
        format_percent(params.investment_return_rate)
    )?;
    writeln!(out, "- Inflation Rate: {}", format_percent(params.inflation_rate))?;
    writeln!(
        out,
        "- Inflation Adjusted Results: {}",
        yes_no(params.inflation_adjusted)
    )?;
    writeln!(out)?;

    let summary = &result.summary;
    let difference = summary.final_owner_net_worth - summary.final_renter_net_worth;
    let verdict = if difference > 0.0 {
        "Owner wins"
    } else {
        "Renter wins"
    };
    let crossover = result
        .crossover_date
        .map(|c| format!("Year {}, Month {}", c.year, c.month_of_year()))
        .unwrap_or_else(|| "Never".to_string());
    let payment_crossover = result
        .monthly_payment_crossover_date
        .map(|c| format!("Year {}, Month {}", c.year, c.month_of_year()))
        .unwrap_or_else(|| "Never".to_string());

    writeln!(out, "## Simulation Results Summary")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Final Owner Net Worth (Year {}): {}",
        params.simulation_years,
        format_currency(summary.final_owner_net_worth)
    )?;
    writeln!(
        out,
        "- Final Renter Net Worth (Year {}): {}",
        params.simulation_years,
        format_currency(summary.final_renter_net_worth)
    )?;
    writeln!(
        out,
        "- Net Worth Difference: {} ({verdict})",
        format_currency(difference)
    )?;
    writeln!(out, "- Crossover Date: {crossover}")?;
    writeln!(out, "- Monthly Payment Crossover: {payment_crossover}")?;
    writeln!(
        out,
        "- Total Interest Paid: {}",
        format_currency(summary.total_interest_paid)
    )?;
    writeln!(
        out,
        "- Owner Unrecoverable Costs: {}",
        format_currency(summary.total_owner_unrecoverable_costs)
    )?;
    writeln!(
        out,
        "- Renter Unrecoverable Costs: {}",
        format_currency(summary.total_renter_unrecoverable_costs)
    )?;
    writeln!(
        out,
        "- Renter Portfolio: {} initial + {} initial yield + {} continuous + {} continuous yield",
        format_currency(summary.renter_total_initial_contribution),
        format_currency(summary.renter_total_initial_yield),
        format_currency(summary.renter_total_continuous_contribution),
        format_currency(summary.renter_total_continuous_yield)
    )?;
    writeln!(out)?;

    writeln!(out, "## Annual Data")?;
    writeln!(out)?;
    writeln!(
        out,
        "| Year | Owner Net Worth | Renter Net Worth | Owner Cash Flow | Renter Cash Flow |"
    )?;
    writeln!(
        out,
        "|------|-----------------|------------------|-----------------|------------------|"
    )?;
    for snapshot in &result.annual_data {
        let (owner_cash_flow, renter_cash_flow) = result
            .monthly_data
            .iter()
            .filter(|m| m.year == snapshot.year)
            .fold((0.0, 0.0), |(owner, renter), m| {
                (owner + m.total_owner_outflow, renter + m.total_renter_outflow)
            });
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            snapshot.year,
            format_currency(snapshot.owner_net_worth),
            format_currency(snapshot.renter_net_worth),
            format_currency(owner_cash_flow),
            format_currency(renter_cash_flow)
        )?;
    }

    Ok(())
}
