pub mod peek;

/// Asserts a YAML snapshot of `$output`, recording the source text it was
/// produced from in the snapshot's `info` field.
///
/// The calling crate needs `insta` (with the `yaml` feature) as a dependency.
#[macro_export]
macro_rules! assert_yaml_snapshot_with_source {
    ($test_name:expr; $source:expr => $output:expr) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_yaml_snapshot!($test_name, $output);
        })
    }};

    ($source:expr => $output:expr) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_yaml_snapshot!($output);
        })
    }};
}
