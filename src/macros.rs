/// Builds a [`Row`](crate::Row) from a literal.
///
/// Braces build a named row, brackets a positional one; values go through
/// [`Value::from`](crate::Value), so `None::<&str>` (or any `Option`)
/// gives a null cell.
///
/// # Examples
///
/// ```rust
/// use fixie::{row, Value};
///
/// let named = row!({"name": "H", "n": 1});
/// assert_eq!(named.get("n"), Some(&Value::from(1)));
///
/// let positional = row!(["a", "b"]);
/// assert_eq!(positional.len(), 2);
///
/// let with_null = row!({"group": None::<&str>});
/// assert_eq!(with_null.get("group"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! row {
    // Handle empty named row
    ({}) => {
        $crate::Row::from_pairs(::std::iter::empty::<(::std::string::String, $crate::Value)>())
    };

    // Handle non-empty named row
    ({ $($key:literal : $value:expr),* $(,)? }) => {
        $crate::Row::from_pairs([
            $( ($key.to_string(), $crate::Value::from($value)) ),*
        ])
    };

    // Handle empty positional row
    ([]) => {
        $crate::Row::Positional(::std::vec::Vec::new())
    };

    // Handle non-empty positional row
    ([ $($value:expr),* $(,)? ]) => {
        $crate::Row::Positional(vec![ $( $crate::Value::from($value) ),* ])
    };
}
