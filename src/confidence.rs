/// Map the larger of the two edges to a 1-10 confidence score.
///
/// Linear in edge magnitude up to the ceiling, then saturated: zero edge is
/// 1, anything at or beyond the ceiling is 10.
pub fn confidence_from_edges(total_edge: f64, spread_edge: f64, ceiling: f64) -> u8 {
    let edge = total_edge.abs().max(spread_edge.abs());
    let e = (edge / ceiling).min(1.0);
    (1.0 + 9.0 * e).round() as u8
}
