/// Validation-layer assertion.
///
/// Active under `debug_assertions` or with the `validate` feature; compiles to nothing otherwise.
macro_rules! check {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "validate")) {
            assert!($cond, $($arg)+);
        }
    };
}

/// Checks the structural invariant of an array before an operation touches it.
macro_rules! check_valid {
    ($array:expr, $op:literal) => {
        check!(
            $array.is_valid(),
            concat!("`", $op, "` called on a corrupted array (len {}, capacity {})"),
            $array.len(),
            $array.capacity()
        )
    };
}
