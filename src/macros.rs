#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! link {
    ($from:expr => $to:expr ; $lt:expr) => {
        $crate::LinkPattern::new($from, $to, $lt)
    };
    ($from:expr => $to:expr ; $lt:expr ; [ $($attr:expr),* $(,)? ]) => {
        $crate::LinkPattern::with_attrs($from, $to, $lt, [ $($attr),* ])
    };
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        when: [ $($cond:expr),* $(,)? ],
        then: [ $($out:expr),* $(,)? ]
        $(,)?
    ) => {
        $crate::ReasonRule::new($name, vec![ $($cond),* ], vec![ $($out),* ])
    };
}
