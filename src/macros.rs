pub use enclose::*;

#[macro_export]
macro_rules! computation {
    (( $($d_tt:tt)* ) => $($b:tt)*) => {
        $crate::Computation::new($crate::macros::enclose!(($( $d_tt )*) Box::new(move || { $($b)* })))
    };
    (=> $($b:tt)*) => {
        $crate::Computation::new(Box::new(move || { $($b)* }))
    };
}

#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(
                ::std::convert::Into::<::std::string::String>::into($key),
                ::std::string::ToString::to_string(&$value),
            );
        )+
        attributes
    }};
}

#[macro_export]
macro_rules! object {
    () => {
        $crate::Object::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Object::new()$(.with($key, $value))+
    };
}

#[macro_export]
macro_rules! array {
    ($($value:expr),* $(,)?) => {{
        let array = $crate::Array::new();
        $( array.push($value); )*
        array
    }};
}
