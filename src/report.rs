//! Plain-text rendering of ranking results.

use std::fmt::Write as _;

use crate::distribution::Distribution;

/// Decimal places shown per score.
pub const PRECISION: usize = 4;

/// Render a title line followed by one `  page: score` line per page,
/// sorted by page name.
pub fn render(title: &str, distribution: &Distribution) -> String {
    let mut out = String::with_capacity(title.len() + 1 + distribution.len() * 24);
    out.push_str(title);
    out.push('\n');
    for (page, score) in distribution.sorted_by_page() {
        let _ = writeln!(out, "  {page}: {score:.prec$}", prec = PRECISION);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn test_render_sorted_fixed_precision() {
        let mut builder = GraphBuilder::new();
        builder.add_links("2.html", ["1.html"]);
        builder.add_links("1.html", ["2.html"]);
        let graph = builder.build().unwrap();
        let dist = Distribution::from_scores(&graph, vec![0.61234, 0.38766]).unwrap();

        let text = render("PageRank Results from Iteration", &dist);
        assert_eq!(
            text,
            "PageRank Results from Iteration\n  1.html: 0.3877\n  2.html: 0.6123\n"
        );
    }
}
