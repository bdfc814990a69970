//! Macros for building entry arguments and property sets.
//!
//! - `arguments!`: Creates an array of template arguments
//! - `properties!`: Creates an array of key/value property pairs
//!
//! Both convert every element with [`Value::from`](crate::Value), so any type with a `From`
//! conversion can be mixed freely.

/// Creates an array of [`Value`](crate::Value)s to bind to a message template.
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{LogEntry, Value, arguments};
///
/// let entry = LogEntry::information("{User} has {Count} items", arguments!["alice", 3]);
/// assert_eq!(entry.arguments(), &[Value::from("alice"), Value::from(3)]);
/// assert_eq!(entry.render_message(), r#""alice" has 3 items"#);
///
/// let empty = arguments![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! arguments {
    () => {{
        let arguments: [$crate::Value; 0] = [];
        arguments
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Value::from($value)),+]
    };
}

/// Creates an array of `(String, Value)` pairs, suitable for
/// [`LogEntry::add_properties`](crate::LogEntry::add_properties).
///
/// Keys can be identifiers, which also name the value variable, or string literals.
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{LogEntry, Value, properties};
///
/// let user_id = 123;
/// let mut entry = LogEntry::information("Request handled", []);
/// entry.add_properties(properties!(user_id, "http.status" = 200, route = "/health"));
///
/// assert_eq!(entry.property("user_id"), Some(&Value::from(123)));
/// assert_eq!(entry.property("http.status"), Some(&Value::from(200)));
/// assert_eq!(entry.property("route"), Some(&Value::from("/health")));
/// ```
#[macro_export]
macro_rules! properties {
    ($($input:tt)*) => {
        $crate::__properties_inner!(@ { }, { $($input)* })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __properties_inner {
    (@ { $($output:expr),* $(,)? }, { $(,)? }) => {
        [$($output),*]
    };

    (@ { $($output:expr),* $(,)? }, { $key:ident $(, $($input:tt)*)? }) => {
        $crate::__properties_inner!(@ { $($output,)* $crate::__property!($key = $key) }, { $($($input)*)? })
    };

    (@ { $($output:expr),* $(,)? }, { $key:ident = $value:expr $(, $($input:tt)*)? }) => {
        $crate::__properties_inner!(@ { $($output,)* $crate::__property!($key = $value) }, { $($($input)*)? })
    };

    (@ { $($output:expr),* $(,)? }, { $key:literal = $value:expr $(, $($input:tt)*)? }) => {
        $crate::__properties_inner!(@ { $($output,)* $crate::__property!($key = $value) }, { $($($input)*)? })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __property {
    ($key:ident = $value:expr) => {
        (
            ::std::string::String::from(stringify!($key)),
            $crate::Value::from($value),
        )
    };
    ($key:literal = $value:expr) => {
        (
            ::std::string::String::from($key),
            $crate::Value::from($value),
        )
    };
}
