use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    BreakEvenConfig, BreakEvenResult, BreakEvenTarget, SimulationParams, SimulationResult,
    SolverError, render_report, simulate, solve_break_even,
};

const MAX_SIMULATION_YEARS: u32 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("--{field} must be {requirement}")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
    },
    #[error("break-even search: {0}")]
    BreakEven(#[from] SolverError),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "rentbuy",
    about = "Month-by-month rent vs buy net worth projection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON and markdown HTTP API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Run one scenario and print the full result as JSON.
    Simulate(ScenarioArgs),
    /// Run one scenario and print a markdown report.
    Report(ScenarioArgs),
    /// Search for the rent or price at which buying and renting break even.
    BreakEven {
        #[arg(long, value_enum, default_value_t = BreakEvenTargetArg::MonthlyRent)]
        target: BreakEvenTargetArg,
        #[arg(long)]
        search_min: Option<f64>,
        #[arg(long)]
        search_max: Option<f64>,
        #[arg(long)]
        tolerance: Option<f64>,
        #[arg(long)]
        max_iterations: Option<u32>,
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ScenarioArgs {
    #[arg(long, default_value_t = 525_000.0)]
    home_price: f64,
    #[arg(long, default_value_t = 10.0)]
    down_payment_percent: f64,
    #[arg(long, default_value_t = 6.5, help = "Annual mortgage APR, percent")]
    mortgage_rate: f64,
    #[arg(long, default_value_t = 30)]
    loan_term_years: u32,
    #[arg(long, default_value_t = 1.32)]
    property_tax_rate: f64,
    #[arg(long, default_value_t = 0.30)]
    home_insurance_rate: f64,
    #[arg(long, default_value_t = 1.0)]
    maintenance_rate: f64,
    #[arg(long, default_value_t = 3.5)]
    home_appreciation_rate: f64,
    #[arg(long, default_value_t = 6.0)]
    selling_cost_percent: f64,
    #[arg(long, default_value_t = 0.5)]
    pmi_rate: f64,
    #[arg(
        long,
        help = "Grow the property tax base at 2% a year instead of with home value"
    )]
    assessed_value_cap: bool,
    #[arg(long, default_value_t = 2_500.0)]
    monthly_rent: f64,
    #[arg(long, default_value_t = 3.5)]
    rent_inflation_rate: f64,
    #[arg(long, default_value_t = 15.0)]
    renters_insurance_monthly: f64,
    #[arg(long, default_value_t = 10.0)]
    investment_return_rate: f64,
    #[arg(long, default_value_t = 3.0)]
    inflation_rate: f64,
    #[arg(long, default_value_t = 115_000.0)]
    gross_income: f64,
    #[arg(long, default_value_t = 22.0)]
    federal_tax_rate: f64,
    #[arg(long, default_value_t = 9.3)]
    state_tax_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual pre-tax 401k contribution")]
    contribution_401k: f64,
    #[arg(long, help = "Annual income growth; tracks --inflation-rate when omitted")]
    income_growth_rate: Option<f64>,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Share of the owner's deductions actually itemized, percent"
    )]
    itemized_deduction_rate: f64,
    #[arg(long, default_value_t = 35)]
    simulation_years: u32,
    #[arg(long, help = "Report every monetary series in today's dollars")]
    inflation_adjusted: bool,
    #[arg(long, default_value_t = 0.0)]
    renter_discipline: f64,
    #[arg(long, default_value_t = 0.0)]
    owner_discipline: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    home_price: Option<f64>,
    #[serde(rename = "downPaymentPercentage", alias = "downPaymentPercent")]
    down_payment_percent: Option<f64>,
    mortgage_rate: Option<f64>,
    loan_term_years: Option<u32>,
    property_tax_rate: Option<f64>,
    home_insurance_rate: Option<f64>,
    #[serde(rename = "maintenanceCostPercentage", alias = "maintenanceRate")]
    maintenance_rate: Option<f64>,
    home_appreciation_rate: Option<f64>,
    #[serde(rename = "sellingCostPercentage", alias = "sellingCostPercent")]
    selling_cost_percent: Option<f64>,
    pmi_rate: Option<f64>,
    #[serde(alias = "isProp13")]
    assessed_value_cap: Option<bool>,

    monthly_rent: Option<f64>,
    rent_inflation_rate: Option<f64>,
    renters_insurance_monthly: Option<f64>,

    investment_return_rate: Option<f64>,
    inflation_rate: Option<f64>,

    gross_income: Option<f64>,
    federal_tax_rate: Option<f64>,
    state_tax_rate: Option<f64>,
    contribution_401k: Option<f64>,
    income_growth_rate: Option<f64>,
    itemized_deduction_rate: Option<f64>,

    simulation_years: Option<u32>,
    inflation_adjusted: Option<bool>,
    renter_discipline: Option<f64>,
    owner_discipline: Option<f64>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BreakEvenTargetArg {
    #[default]
    #[serde(alias = "monthlyRent", alias = "rent")]
    MonthlyRent,
    #[serde(alias = "homePrice", alias = "price")]
    HomePrice,
}

impl From<BreakEvenTargetArg> for BreakEvenTarget {
    fn from(value: BreakEvenTargetArg) -> Self {
        match value {
            BreakEvenTargetArg::MonthlyRent => BreakEvenTarget::MonthlyRent,
            BreakEvenTargetArg::HomePrice => BreakEvenTarget::HomePrice,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreakEvenPayload {
    #[serde(default)]
    target: BreakEvenTargetArg,
    search_min: Option<f64>,
    search_max: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<u32>,
    #[serde(flatten)]
    scenario: SimulatePayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse<'a> {
    inputs: &'a SimulationParams,
    #[serde(flatten)]
    result: &'a SimulationResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreakEvenResponse<'a> {
    inputs: &'a SimulationParams,
    #[serde(flatten)]
    result: &'a BreakEvenResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn invalid(field: &'static str, requirement: &'static str) -> InputError {
    InputError::Invalid { field, requirement }
}

fn require_percent(field: &'static str, value: f64) -> Result<(), InputError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(field, "between 0 and 100"));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, ">= 0"));
    }
    Ok(())
}

fn require_growth_rate(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() || value <= -100.0 {
        return Err(invalid(field, "> -100"));
    }
    Ok(())
}

fn build_params(args: ScenarioArgs) -> Result<SimulationParams, InputError> {
    if !args.home_price.is_finite() || args.home_price <= 0.0 {
        return Err(invalid("home-price", "> 0"));
    }
    require_percent("down-payment-percent", args.down_payment_percent)?;
    require_non_negative("mortgage-rate", args.mortgage_rate)?;
    if args.loan_term_years == 0 {
        return Err(invalid("loan-term-years", "> 0"));
    }
    require_non_negative("property-tax-rate", args.property_tax_rate)?;
    require_non_negative("home-insurance-rate", args.home_insurance_rate)?;
    require_non_negative("maintenance-rate", args.maintenance_rate)?;
    require_growth_rate("home-appreciation-rate", args.home_appreciation_rate)?;
    require_percent("selling-cost-percent", args.selling_cost_percent)?;
    require_non_negative("pmi-rate", args.pmi_rate)?;

    require_non_negative("monthly-rent", args.monthly_rent)?;
    require_growth_rate("rent-inflation-rate", args.rent_inflation_rate)?;
    require_non_negative("renters-insurance-monthly", args.renters_insurance_monthly)?;

    require_growth_rate("investment-return-rate", args.investment_return_rate)?;
    require_growth_rate("inflation-rate", args.inflation_rate)?;

    if !args.gross_income.is_finite() || args.gross_income <= 0.0 {
        return Err(invalid("gross-income", "> 0"));
    }
    require_percent("federal-tax-rate", args.federal_tax_rate)?;
    require_percent("state-tax-rate", args.state_tax_rate)?;
    if args.federal_tax_rate + args.state_tax_rate > 100.0 {
        return Err(invalid(
            "federal-tax-rate",
            "at most 100 combined with --state-tax-rate",
        ));
    }
    require_non_negative("contribution-401k", args.contribution_401k)?;
    if args.contribution_401k > args.gross_income {
        return Err(invalid("contribution-401k", "<= --gross-income"));
    }
    if let Some(rate) = args.income_growth_rate {
        require_growth_rate("income-growth-rate", rate)?;
    }
    require_percent("itemized-deduction-rate", args.itemized_deduction_rate)?;

    if !(1..=MAX_SIMULATION_YEARS).contains(&args.simulation_years) {
        return Err(invalid("simulation-years", "between 1 and 100"));
    }
    require_percent("renter-discipline", args.renter_discipline)?;
    require_percent("owner-discipline", args.owner_discipline)?;

    Ok(SimulationParams {
        home_price: args.home_price,
        down_payment_percent: args.down_payment_percent,
        mortgage_rate: args.mortgage_rate,
        loan_term_years: args.loan_term_years,
        property_tax_rate: args.property_tax_rate,
        home_insurance_rate: args.home_insurance_rate,
        maintenance_rate: args.maintenance_rate,
        home_appreciation_rate: args.home_appreciation_rate,
        selling_cost_percent: args.selling_cost_percent,
        pmi_rate: args.pmi_rate,
        assessed_value_cap: args.assessed_value_cap,
        monthly_rent: args.monthly_rent,
        rent_inflation_rate: args.rent_inflation_rate,
        renters_insurance_monthly: args.renters_insurance_monthly,
        investment_return_rate: args.investment_return_rate,
        inflation_rate: args.inflation_rate,
        gross_income: args.gross_income,
        federal_tax_rate: args.federal_tax_rate,
        state_tax_rate: args.state_tax_rate,
        contribution_401k: args.contribution_401k,
        income_growth_rate: args.income_growth_rate,
        itemized_deduction_rate: args.itemized_deduction_rate,
        simulation_years: args.simulation_years,
        inflation_adjusted: args.inflation_adjusted,
        renter_discipline: args.renter_discipline,
        owner_discipline: args.owner_discipline,
    })
}

pub async fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Serve { port } => run_http_server(port).await?,
        Command::Simulate(args) => {
            let params = build_params(args)?;
            let result = simulate(&params);
            let body = serde_json::to_string_pretty(&SimulateResponse {
                inputs: &params,
                result: &result,
            })?;
            println!("{body}");
        }
        Command::Report(args) => {
            let params = build_params(args)?;
            let result = simulate(&params);
            print!("{}", render_report(&params, &result));
        }
        Command::BreakEven {
            target,
            search_min,
            search_max,
            tolerance,
            max_iterations,
            scenario,
        } => {
            let params = build_params(scenario)?;
            let config = break_even_config(
                target.into(),
                search_min,
                search_max,
                tolerance,
                max_iterations,
            );
            let result = solve_break_even(&params, config).map_err(InputError::from)?;
            let body = serde_json::to_string_pretty(&BreakEvenResponse {
                inputs: &params,
                result: &result,
            })?;
            println!("{body}");
        }
    }
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route(
            "/api/report",
            get(report_get_handler).post(report_post_handler),
        )
        .route("/api/break-even", post(break_even_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "rent vs buy HTTP API listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let params = match params_from_payload(payload) {
        Ok(params) => params,
        Err(e) => return input_error_response(&e),
    };
    let result = simulate(&params);
    json_response(
        StatusCode::OK,
        SimulateResponse {
            inputs: &params,
            result: &result,
        },
    )
}

async fn report_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    report_handler_impl(payload)
}

async fn report_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    report_handler_impl(payload)
}

fn report_handler_impl(payload: SimulatePayload) -> Response {
    let params = match params_from_payload(payload) {
        Ok(params) => params,
        Err(e) => return input_error_response(&e),
    };
    let report = render_report(&params, &simulate(&params));
    with_cache_control((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        report,
    ))
}

async fn break_even_handler(Json(payload): Json<BreakEvenPayload>) -> Response {
    let (params, config) = match break_even_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => return input_error_response(&e),
    };
    let result = match solve_break_even(&params, config) {
        Ok(result) => result,
        Err(e) => return input_error_response(&InputError::from(e)),
    };
    tracing::info!(
        search_target = ?config.target,
        feasible = result.feasible,
        converged = result.converged,
        iterations = result.iterations.len(),
        "break-even search finished"
    );
    json_response(
        StatusCode::OK,
        BreakEvenResponse {
            inputs: &params,
            result: &result,
        },
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn input_error_response(err: &InputError) -> Response {
    tracing::warn!(error = %err, "rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

#[cfg(test)]
fn params_from_json(json: &str) -> Result<SimulationParams, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    params_from_payload(payload).map_err(|e| e.to_string())
}

fn params_from_payload(payload: SimulatePayload) -> Result<SimulationParams, InputError> {
    build_params(overlay_payload(default_args_for_api(), payload))
}

fn overlay_payload(mut args: ScenarioArgs, payload: SimulatePayload) -> ScenarioArgs {
    if let Some(v) = payload.home_price {
        args.home_price = v;
    }
    if let Some(v) = payload.down_payment_percent {
        args.down_payment_percent = v;
    }
    if let Some(v) = payload.mortgage_rate {
        args.mortgage_rate = v;
    }
    if let Some(v) = payload.loan_term_years {
        args.loan_term_years = v;
    }
    if let Some(v) = payload.property_tax_rate {
        args.property_tax_rate = v;
    }
    if let Some(v) = payload.home_insurance_rate {
        args.home_insurance_rate = v;
    }
    if let Some(v) = payload.maintenance_rate {
        args.maintenance_rate = v;
    }
    if let Some(v) = payload.home_appreciation_rate {
        args.home_appreciation_rate = v;
    }
    if let Some(v) = payload.selling_cost_percent {
        args.selling_cost_percent = v;
    }
    if let Some(v) = payload.pmi_rate {
        args.pmi_rate = v;
    }
    if let Some(v) = payload.assessed_value_cap {
        args.assessed_value_cap = v;
    }
    if let Some(v) = payload.monthly_rent {
        args.monthly_rent = v;
    }
    if let Some(v) = payload.rent_inflation_rate {
        args.rent_inflation_rate = v;
    }
    if let Some(v) = payload.renters_insurance_monthly {
        args.renters_insurance_monthly = v;
    }
    if let Some(v) = payload.investment_return_rate {
        args.investment_return_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.gross_income {
        args.gross_income = v;
    }
    if let Some(v) = payload.federal_tax_rate {
        args.federal_tax_rate = v;
    }
    if let Some(v) = payload.state_tax_rate {
        args.state_tax_rate = v;
    }
    if let Some(v) = payload.contribution_401k {
        args.contribution_401k = v;
    }
    if payload.income_growth_rate.is_some() {
        args.income_growth_rate = payload.income_growth_rate;
    }
    if let Some(v) = payload.itemized_deduction_rate {
        args.itemized_deduction_rate = v;
    }
    if let Some(v) = payload.simulation_years {
        args.simulation_years = v;
    }
    if let Some(v) = payload.inflation_adjusted {
        args.inflation_adjusted = v;
    }
    if let Some(v) = payload.renter_discipline {
        args.renter_discipline = v;
    }
    if let Some(v) = payload.owner_discipline {
        args.owner_discipline = v;
    }
    args
}

fn break_even_request_from_payload(
    payload: BreakEvenPayload,
) -> Result<(SimulationParams, BreakEvenConfig), InputError> {
    let params = params_from_payload(payload.scenario)?;
    let config = break_even_config(
        payload.target.into(),
        payload.search_min,
        payload.search_max,
        payload.tolerance,
        payload.max_iterations,
    );
    Ok((params, config))
}

fn break_even_config(
    target: BreakEvenTarget,
    search_min: Option<f64>,
    search_max: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<u32>,
) -> BreakEvenConfig {
    let (default_min, default_max, default_tolerance) = match target {
        BreakEvenTarget::MonthlyRent => (0.0, 20_000.0, 0.5),
        BreakEvenTarget::HomePrice => (10_000.0, 5_000_000.0, 50.0),
    };
    BreakEvenConfig {
        target,
        search_min: search_min.unwrap_or(default_min),
        search_max: search_max.unwrap_or(default_max),
        tolerance: tolerance.unwrap_or(default_tolerance),
        max_iterations: max_iterations.unwrap_or(60),
    }
}

fn default_args_for_api() -> ScenarioArgs {
    ScenarioArgs {
        home_price: 525_000.0,
        down_payment_percent: 10.0,
        mortgage_rate: 6.5,
        loan_term_years: 30,
        property_tax_rate: 1.32,
        home_insurance_rate: 0.30,
        maintenance_rate: 1.0,
        home_appreciation_rate: 3.5,
        selling_cost_percent: 6.0,
        pmi_rate: 0.5,
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
        income_growth_rate: Some(3.0),
        itemized_deduction_rate: 0.0,
        simulation_years: 35,
        inflation_adjusted: false,
        renter_discipline: 0.0,
        owner_discipline: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_args() -> ScenarioArgs {
        default_args_for_api()
    }

    fn application_defaults() -> SimulationParams {
        SimulationParams {
            pmi_rate: 0.5,
            income_growth_rate: Some(3.0),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn api_defaults_add_pmi_and_income_growth_to_engine_defaults() {
        let params = build_params(sample_args()).expect("defaults are valid");
        assert_eq!(params, application_defaults());
        assert_ne!(params, SimulationParams::default());
    }

    #[test]
    fn cli_defaults_match_api_defaults_except_income_growth() {
        let cli = Cli::try_parse_from(["rentbuy", "simulate"]).expect("parses");
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate subcommand");
        };
        assert_eq!(args.income_growth_rate, None);
        let expected = ScenarioArgs {
            income_growth_rate: None,
            ..sample_args()
        };
        assert_eq!(args, expected);
    }

    #[test]
    fn cli_parses_report_flags() {
        let cli = Cli::try_parse_from([
            "rentbuy",
            "report",
            "--home-price",
            "600000",
            "--assessed-value-cap",
            "--contribution-401k",
            "12000",
            "--simulation-years",
            "10",
        ])
        .expect("parses");
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        let params = build_params(args).expect("valid");
        assert_eq!(params.home_price, 600_000.0);
        assert!(params.assessed_value_cap);
        assert_eq!(params.contribution_401k, 12_000.0);
        assert_eq!(params.simulation_years, 10);
    }

    #[test]
    fn cli_parses_serve_port() {
        let cli = Cli::try_parse_from(["rentbuy", "serve", "--port", "9000"]).expect("parses");
        assert!(matches!(cli.command, Command::Serve { port: 9000 }));
    }

    #[test]
    fn cli_parses_break_even_target() {
        let cli = Cli::try_parse_from([
            "rentbuy",
            "break-even",
            "--target",
            "home-price",
            "--search-max",
            "900000",
            "--monthly-rent",
            "3200",
        ])
        .expect("parses");
        let Command::BreakEven {
            target,
            search_max,
            scenario,
            ..
        } = cli.command
        else {
            panic!("expected break-even subcommand");
        };
        assert_eq!(target, BreakEvenTargetArg::HomePrice);
        assert_eq!(search_max, Some(900_000.0));
        assert_eq!(scenario.monthly_rent, 3_200.0);
    }

    #[test]
    fn payload_overlays_only_provided_fields() {
        let params = params_from_json(
            r#"{"homePrice": 800000, "downPaymentPercentage": 20, "isProp13": true,
                "renterDiscipline": 50, "simulationYears": 12}"#,
        )
        .expect("valid payload");
        assert_eq!(params.home_price, 800_000.0);
        assert_eq!(params.down_payment_percent, 20.0);
        assert!(params.assessed_value_cap);
        assert_eq!(params.renter_discipline, 50.0);
        assert_eq!(params.simulation_years, 12);
        assert_eq!(params.monthly_rent, 2_500.0);
        assert_eq!(params.income_growth_rate, Some(3.0));
    }

    #[test]
    fn payload_accepts_web_field_names() {
        let params = params_from_json(
            r#"{"maintenanceCostPercentage": 1.5, "sellingCostPercentage": 5,
                "contribution401k": 6000, "itemizedDeductionRate": 100}"#,
        )
        .expect("valid payload");
        assert_eq!(params.maintenance_rate, 1.5);
        assert_eq!(params.selling_cost_percent, 5.0);
        assert_eq!(params.contribution_401k, 6_000.0);
        assert_eq!(params.itemized_deduction_rate, 100.0);
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let params = params_from_json("{}").expect("valid payload");
        assert_eq!(params, application_defaults());
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        let cases: [(&str, &str); 8] = [
            (r#"{"homePrice": 0}"#, "--home-price"),
            (r#"{"downPaymentPercentage": 120}"#, "--down-payment-percent"),
            (r#"{"loanTermYears": 0}"#, "--loan-term-years"),
            (r#"{"simulationYears": 0}"#, "--simulation-years"),
            (r#"{"renterDiscipline": -1}"#, "--renter-discipline"),
            (r#"{"investmentReturnRate": -100}"#, "--investment-return-rate"),
            (r#"{"federalTaxRate": 70, "stateTaxRate": 40}"#, "--federal-tax-rate"),
            (r#"{"contribution401k": 200000}"#, "--contribution-401k"),
        ];
        for (json, flag) in cases {
            let err = params_from_json(json).expect_err("must reject");
            assert!(err.contains(flag), "{json}: expected {flag} in {err}");
        }
    }

    #[test]
    fn rejects_unparseable_payload() {
        let err = params_from_json(r#"{"homePrice": "lots"}"#).expect_err("must reject");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn input_error_message_names_flag_and_requirement() {
        let err = build_params(ScenarioArgs {
            gross_income: 0.0,
            ..sample_args()
        })
        .expect_err("must reject zero income");
        assert_eq!(err, invalid("gross-income", "> 0"));
        assert_eq!(err.to_string(), "--gross-income must be > 0");
    }

    #[test]
    fn simulate_response_flattens_result_next_to_inputs() {
        let params = SimulationParams {
            simulation_years: 2,
            ..SimulationParams::default()
        };
        let result = simulate(&params);
        let value = serde_json::to_value(SimulateResponse {
            inputs: &params,
            result: &result,
        })
        .expect("serializes");

        assert_eq!(value["inputs"]["homePrice"], 525_000.0);
        assert_eq!(value["inputs"]["downPaymentPercentage"], 10.0);
        assert_eq!(value["monthlyData"].as_array().map(Vec::len), Some(24));
        assert_eq!(value["annualData"].as_array().map(Vec::len), Some(2));
        assert!(value["summary"]["finalRenterNetWorth"].is_number());
    }

    #[test]
    fn break_even_payload_defaults_to_rent_search() {
        let payload: BreakEvenPayload =
            serde_json::from_str(r#"{"homePrice": 400000}"#).expect("parses");
        let (params, config) = break_even_request_from_payload(payload).expect("valid");
        assert_eq!(params.home_price, 400_000.0);
        assert_eq!(config.target, BreakEvenTarget::MonthlyRent);
        assert_eq!(config.search_min, 0.0);
        assert_eq!(config.search_max, 20_000.0);
        assert_eq!(config.max_iterations, 60);
    }

    #[test]
    fn break_even_payload_reads_price_target_and_bounds() {
        let payload: BreakEvenPayload = serde_json::from_str(
            r#"{"target": "home-price", "searchMin": 100000, "searchMax": 900000,
                "tolerance": 10, "monthlyRent": 3000}"#,
        )
        .expect("parses");
        let (params, config) = break_even_request_from_payload(payload).expect("valid");
        assert_eq!(params.monthly_rent, 3_000.0);
        assert_eq!(config.target, BreakEvenTarget::HomePrice);
        assert_eq!(config.search_min, 100_000.0);
        assert_eq!(config.search_max, 900_000.0);
        assert_eq!(config.tolerance, 10.0);
    }

    #[test]
    fn solver_errors_become_input_errors() {
        let err = InputError::from(SolverError::EmptyRange);
        assert!(err.to_string().starts_with("break-even search:"));
    }

    #[test]
    fn json_responses_disable_caching() {
        let response = error_response(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
    }
}
