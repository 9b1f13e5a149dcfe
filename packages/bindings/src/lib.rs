//! Node bindings for the calculator engines, consumed by the website's
//! calculator page. Every function takes and returns a JSON string so the
//! JS side never handles Decimal precision directly.

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use btc_calculator_core::types::Money;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// CAGR engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_cagr(input_json: String) -> NapiResult<String> {
    let input: btc_calculator_core::cagr::CagrInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = btc_calculator_core::cagr::calculate_cagr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_cgt(input_json: String) -> NapiResult<String> {
    let scenario: btc_calculator_core::tax::TaxScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = btc_calculator_core::tax::calculate_cgt(&scenario).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn get_cgt_discount_message(holding_period_months: i64) -> String {
    btc_calculator_core::tax::get_cgt_discount_message(holding_period_months)
}

#[napi]
pub fn validate_tax_scenario(input_json: String) -> NapiResult<Vec<String>> {
    let scenario: btc_calculator_core::tax::TaxScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(btc_calculator_core::tax::validate_tax_scenario(&scenario))
}

// ---------------------------------------------------------------------------
// Projection engine
// ---------------------------------------------------------------------------

/// Overlay arguments for `project_with_tax`, bundled so the JS caller passes
/// one JSON document.
#[derive(Deserialize)]
struct ProjectWithTaxInput {
    projection: btc_calculator_core::projection::ProjectionInput,
    initial_cost_base: Money,
    tax: btc_calculator_core::projection::ProjectionTaxInput,
}

#[napi]
pub fn calculate_projection(input_json: String) -> NapiResult<String> {
    let input: btc_calculator_core::projection::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        btc_calculator_core::projection::calculate_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_with_tax(input_json: String) -> NapiResult<String> {
    let input: ProjectWithTaxInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let projection = btc_calculator_core::projection::calculate_projection(&input.projection)
        .map_err(to_napi_error)?;
    let taxed = btc_calculator_core::projection::add_tax_scenario_to_projection(
        &projection,
        input.initial_cost_base,
        &input.tax,
    );
    serde_json::to_string(&taxed).map_err(to_napi_error)
}

#[napi]
pub fn validate_projection_input(input_json: String) -> NapiResult<Vec<String>> {
    let input: btc_calculator_core::projection::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(btc_calculator_core::projection::validate_projection_input(
        &input,
    ))
}
