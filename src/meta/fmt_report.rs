//! Report-formatting macro.

/// Write a single labelled line of a `Display` report.
///
/// Used throughout the `Display` implementations of configuration and
/// geometry types to keep multi-field reports uniformly aligned:
/// ```rust
/// # use embedquad::fmt_report;
/// # use std::fmt::Write;
/// fn report(out: &mut String) -> std::fmt::Result {
///     fmt_report!(out, 3, "count");
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! fmt_report {
    ($fmt:expr, $value:expr, $label:expr) => {
        writeln!($fmt, "{:<32}: {}", $label, $value)?;
    };
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    fn report(out: &mut String) -> std::fmt::Result {
        fmt_report!(out, 3, "count");
        Ok(())
    }

    #[test]
    fn test_fmt_report() {
        let mut out = String::new();
        report(&mut out).unwrap();
        assert_eq!(out, "count                           : 3\n");
    }
}
