//! The `args!` macro for building argument bags.

/// Builds an [`Arguments`](crate::Arguments) bag.
///
/// Positional values come first, separated by commas. Keyword values follow a
/// semicolon as `name = value` pairs. Every value is converted with
/// `Into<Value>`.
///
/// # Syntax
///
/// - `args![]` - no arguments
/// - `args![1, 2]` - positional only
/// - `args![; c = 10, d = 20]` - keyword only
/// - `args![1, 2; c = 10]` - both
///
/// # Examples
///
/// ```rust
/// use currying::{Value, args};
///
/// let arguments = args![1, "two"; flag = true];
///
/// assert_eq!(arguments.positional(), &[Value::from(1), Value::from("two")]);
/// assert_eq!(arguments.keyword().get("flag"), Some(&Value::from(true)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };

    ($($positional:expr),+ $(,)?) => {
        $crate::Arguments::new()
            $(.with_positional($positional))+
    };

    ($($positional:expr),* ; $($name:ident = $value:expr),* $(,)?) => {
        $crate::Arguments::new()
            $(.with_positional($positional))*
            $(.with_keyword(::core::stringify!($name), $value))*
    };
}
