/// Asserts that two floats agree within an absolute tolerance.
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let (actual, expected): (f64, f64) = ($actual, $expected);
        assert!(
            (actual - expected).abs() <= $tol,
            "{} = {} is not within {} of {}",
            stringify!($actual),
            actual,
            $tol,
            expected
        );
    }};
}

/// Asserts that a float is NaN.
#[macro_export]
macro_rules! assert_nan {
    ($value:expr) => {{
        let value: f64 = $value;
        assert!(value.is_nan(), "{} = {} is not NaN", stringify!($value), value);
    }};
}
