/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Arrays get keys `0..n`; braces build an array with string keys. Every
/// bracket or brace creates a new composite with its own identity.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{export, value};
///
/// let v = value!({ "name": "Alice", "tags": ["a", "b"] });
/// assert_eq!(
///     export(&v),
///     "Array &1 (\n    'name' => 'Alice'\n    'tags' => Array &2 (\n        0 => 'a'\n        1 => 'b'\n    )\n)"
/// );
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::from(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Array($crate::Array::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let array = $crate::Array::new();
        $(
            array.insert($key, $crate::value!($value));
        )*
        $crate::Value::Array(array)
    }};

    // Anything else goes through `From`.
    ($s:expr) => {
        $crate::Value::from($s)
    };
}
