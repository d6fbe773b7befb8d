//! Guarded ratio helpers.
//!
//! Every derived rate divides by a count or amount that may be zero; these return
//! zero instead of NaN or infinity in that case.

/// Assumed average order value used to estimate orders from PPC sales.
///
/// Records carry no order counts, so orders are approximated as `ppc_sales / 25`.
/// This is a fixed modelling assumption, not a measured count.
pub const ASSUMED_AVERAGE_ORDER_VALUE: f64 = 25.0;

/// `numerator / denominator`, or zero when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `numerator / denominator * 100`, or zero when the denominator is not positive.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

/// Estimated order count for an amount of PPC sales.
pub fn estimated_orders(ppc_sales: f64) -> f64 {
    ppc_sales / ASSUMED_AVERAGE_ORDER_VALUE
}
