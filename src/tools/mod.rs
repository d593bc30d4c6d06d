//! The three planning widgets.
//!
//! Each widget owns its raw input strings, an optional snapshot of its
//! deterministic computation, optional advice text, and a busy flag plus
//! generation counter guarding the augmentation round-trip. Augmentation
//! is only reachable once a local result exists; a completion tagged with
//! an older generation than the latest calculation is discarded, so among
//! live completions the last one to finish wins.

pub mod financial;
pub mod recipe;
pub mod timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolId {
    Financial,
    Timeline,
    Recipe,
}

/// Lifecycle of one widget, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    Idle,
    Calculated,
    Augmenting,
    Augmented,
}

/// Numeric coercion for user input: anything unparseable counts as zero,
/// never an error.
pub(crate) fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_input_coerces_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(" 2500000 "), 2_500_000.0);
    }
}
