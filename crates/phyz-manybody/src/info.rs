//! Canonical descriptive strings.
//!
//! Format: `<sep><Name>,Ns=<n>,BC=<bc>` followed by `,<sep><key>=<value>`
//! for every tracked parameter not skipped, in the model's declaration
//! order. Callers use the string as a cache key and file-name stem, so the
//! layout must not drift.

use phyz_lattice::BoundaryCondition;

/// Separator used by cached descriptive strings.
pub const DEFAULT_SEP: &str = "_";

/// Significant digits used by cached descriptive strings.
pub const DEFAULT_PREC: usize = 2;

/// Render `value` with `prec` significant digits.
///
/// Integer digits are never dropped: `123.4` with two digits is `"123"`.
pub fn format_sig(value: f64, prec: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let prec = prec.max(1);
    if value == 0.0 {
        return format!("{:.*}", prec - 1, 0.0);
    }
    // Exponent of the rounded value, so 9.99 at two digits counts as 1.0e1.
    let sci = format!("{:.*e}", prec - 1, value);
    let magnitude = sci
        .rsplit_once('e')
        .and_then(|(_, exp)| exp.parse::<i64>().ok())
        .unwrap_or(0);
    let decimals = (prec as i64 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}

/// Incremental builder for a descriptive string.
#[derive(Debug)]
pub struct InfoBuilder<'a> {
    out: String,
    sep: &'a str,
    skip: &'a [&'a str],
    prec: usize,
}

impl<'a> InfoBuilder<'a> {
    pub fn new(
        name: &str,
        ns: usize,
        bc: BoundaryCondition,
        skip: &'a [&'a str],
        sep: &'a str,
        prec: usize,
    ) -> Self {
        Self {
            out: format!("{sep}{name},Ns={ns},BC={bc}"),
            sep,
            skip,
            prec,
        }
    }

    /// Append a real parameter unless `key` is skipped.
    pub fn param(mut self, key: &str, value: f64) -> Self {
        if !self.skips(key) {
            let v = format_sig(value, self.prec);
            self.out.push_str(&format!(",{}{key}={v}", self.sep));
        }
        self
    }

    /// Append an integer or flag parameter unless `key` is skipped.
    pub fn param_int(mut self, key: &str, value: i64) -> Self {
        if !self.skips(key) {
            self.out.push_str(&format!(",{}{key}={value}", self.sep));
        }
        self
    }

    /// Append a per-site array by its first element, the way disorder-free
    /// runs are labelled.
    pub fn param_first(self, key: &str, values: &[f64]) -> Self {
        let first = values.first().copied().unwrap_or(0.0);
        self.param(key, first)
    }

    fn skips(&self, key: &str) -> bool {
        self.skip.iter().any(|s| *s == key)
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sig() {
        assert_eq!(format_sig(1.0, 2), "1.0");
        assert_eq!(format_sig(0.5, 2), "0.50");
        assert_eq!(format_sig(0.01234, 2), "0.012");
        assert_eq!(format_sig(12.3, 2), "12");
        assert_eq!(format_sig(123.4, 2), "123");
        assert_eq!(format_sig(-0.26, 1), "-0.3");
        assert_eq!(format_sig(0.0, 3), "0.00");
    }

    #[test]
    fn test_format_sig_rounds_up_a_decade() {
        assert_eq!(format_sig(9.99, 2), "10");
        assert_eq!(format_sig(0.0999, 2), "0.10");
        assert_eq!(format_sig(-0.96, 1), "-1");
        assert_eq!(format_sig(99.6, 2), "100");
    }

    #[test]
    fn test_builder_layout() {
        let s = InfoBuilder::new("Ising", 4, BoundaryCondition::Pbc, &[], "_", 2)
            .param("J", 1.0)
            .param("hx", 0.5)
            .param_int("N", 3)
            .finish();
        assert_eq!(s, "_Ising,Ns=4,BC=PBC,_J=1.0,_hx=0.50,_N=3");
    }

    #[test]
    fn test_builder_skips() {
        let skip = ["hx"];
        let s = InfoBuilder::new("Ising", 4, BoundaryCondition::Obc, &skip, "-", 2)
            .param("J", 1.0)
            .param("hx", 0.5)
            .finish();
        assert_eq!(s, "-Ising,Ns=4,BC=OBC,-J=1.0");
    }
}
