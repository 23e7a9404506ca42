/// Builds a [`Value`](crate::Value) from notation-like syntax.
///
/// Keys must be string literals. Values may be `null`, `true`, `false`, nested arrays and
/// objects, or any expression, which goes through [`to_value`](crate::to_value); one that
/// cannot be converted becomes `Null`.
///
/// ```rust
/// use serde_colson::{colson, Value};
///
/// let offset = 3;
/// let value = colson!({
///     "name": "Alice",
///     "scores": [1, 2.5, null, -offset],
///     "meta": {},
///     "delta": -1
/// });
/// assert_eq!(value["scores"][3], Value::Int(-3));
/// assert_eq!(
///     value.to_string(),
///     r#"{"name":"Alice","scores":[1,2.5,null,-3],"meta":{},"delta":-1}"#
/// );
/// ```
#[macro_export]
macro_rules! colson {
    // Array elements, one at a time; finished elements collect between the brackets.
    (@array [$($done:expr),*]) => {
        vec![$($done),*]
    };

    (@array [$($done:expr),*] null $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::Value::Null] $($($rest)*)?)
    };

    (@array [$($done:expr),*] true $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::Value::Bool(true)] $($($rest)*)?)
    };

    (@array [$($done:expr),*] false $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::Value::Bool(false)] $($($rest)*)?)
    };

    (@array [$($done:expr),*] [$($array:tt)*] $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::colson!([$($array)*])] $($($rest)*)?)
    };

    (@array [$($done:expr),*] {$($object:tt)*} $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::colson!({$($object)*})] $($($rest)*)?)
    };

    (@array [$($done:expr),*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::colson!(@array [$($done,)* $crate::colson!($next)] $($($rest)*)?)
    };

    // Object entries, inserted into `$object` as they are read.
    (@object $object:ident) => {};

    (@object $object:ident $key:literal : null $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::Value::Null);
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (@object $object:ident $key:literal : true $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::Value::Bool(true));
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (@object $object:ident $key:literal : false $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::Value::Bool(false));
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (@object $object:ident $key:literal : [$($array:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::colson!([$($array)*]));
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (@object $object:ident $key:literal : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::colson!({$($inner)*}));
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (@object $object:ident $key:literal : $value:expr $(, $($rest:tt)*)?) => {
        let _ = $object.insert($key.to_string(), $crate::colson!($value));
        $( $crate::colson!(@object $object $($rest)*); )?
    };

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([ $($elems:tt)* ]) => {
        $crate::Value::Array($crate::colson!(@array [] $($elems)*))
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::colson!(@object object $($entries)+);
        $crate::Value::Object(object)
    }};

    // Anything else is converted through serde.
    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}
