/// Builds a [`Tuple`] from a list of expressions convertible into [`Value`]s.
///
/// **Example**:
/// ```rust
/// use reltab::{tuple, Value};
///
/// let film = tuple!["Star_Wars", 1977, 124, 'T'];
/// assert_eq!(Value::Integer(1977), film[1]);
/// assert_eq!(Value::Character('T'), film[3]);
/// ```
///
/// [`Tuple`]: crate::Tuple
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! tuple {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Value::from($value)),*]
    };
}

/// Builds a [`CompositeKey`] from a list of expressions convertible into [`Value`]s.
///
/// **Example**:
/// ```rust
/// use reltab::{key, CompositeKey, Value};
///
/// assert_eq!(
///     CompositeKey::new(vec![Value::from("Star_Wars"), Value::from(1977)]),
///     key!["Star_Wars", 1977]
/// );
/// ```
///
/// [`CompositeKey`]: crate::CompositeKey
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! key {
    ($($value:expr),* $(,)?) => {
        $crate::CompositeKey::new(vec![$($crate::Value::from($value)),*])
    };
}
