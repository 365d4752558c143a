//! Compile-time name binding for the generator API.

/// Bind the constructor and `yield_` under caller-chosen names in the
/// invoking module.
///
/// Omitted names fall back to `make_generator` and `yield_`. Only the names
/// change; the bound items are the same functions.
///
/// ```
/// mod api {
///     cogen_runtime::bind_generator_api!(generator_alias = coroutine, yield_alias = give);
/// }
///
/// let counter: cogen_runtime::Generator<(), u32> = api::coroutine(|_| {
///     let mut n = 0;
///     loop {
///         n += 1;
///         api::give::<u32, ()>(n)?;
///     }
/// })
/// .unwrap();
/// assert_eq!(counter.call_one([]).unwrap(), 1);
/// assert_eq!(counter.call_one([]).unwrap(), 2);
/// ```
#[macro_export]
macro_rules! bind_generator_api {
    () => {
        $crate::bind_generator_api!(generator_alias = make_generator, yield_alias = yield_);
    };
    (generator_alias = $generator:ident $(,)?) => {
        $crate::bind_generator_api!(generator_alias = $generator, yield_alias = yield_);
    };
    (yield_alias = $yielder:ident $(,)?) => {
        $crate::bind_generator_api!(generator_alias = make_generator, yield_alias = $yielder);
    };
    (generator_alias = $generator:ident, yield_alias = $yielder:ident $(,)?) => {
        #[allow(unused_imports)]
        pub use $crate::make_generator as $generator;
        #[allow(unused_imports)]
        pub use $crate::yield_ as $yielder;
    };
}
