//! Capability adapters.
//!
//! A capability adapter is a concrete type implementing a trait by routing
//! every method through a [`MockHandle`](crate::MockHandle), using the method
//! name as the call identity. [`capability_double!`](crate::capability_double)
//! generates one; traits the macro cannot express (async methods, generic
//! methods) get a hand-written adapter calling the same handle API.
//!
//! # Example
//!
//! ```
//! use stunt_double::{any, args, capability_double, Expectation, Times};
//!
//! pub trait LogWriter {
//!     fn get_logger(&self) -> String;
//!     fn set_logger(&self, logger: &str);
//!     fn write(&self, message: &str);
//! }
//!
//! capability_double! {
//!     pub struct MockLogWriter implements LogWriter {
//!         fn get_logger(&self) -> String;
//!         fn set_logger(&self, logger: &str);
//!         fn write(&self, message: &str);
//!     }
//! }
//!
//! let writer = MockLogWriter::of([Expectation::on("get_logger").returns("console")]);
//! writer.write("Hello, logger!");
//!
//! assert_eq!(writer.get_logger(), "console");
//! writer
//!     .handle()
//!     .verify("write", args![any()], Times::once())
//!     .unwrap();
//! ```

/// Declare a struct implementing one or more traits through a single
/// [`MockHandle`](crate::MockHandle).
///
/// Every method takes `&self`; arguments must implement `serde::Serialize` and
/// return types `serde::de::DeserializeOwned`. Return types with a `Default`
/// answer lenient unconfigured calls with it; others fail such calls with
/// `MockError::NoDefault`. The generated type has `new`, `of`, `from_handle`
/// and `handle` mirroring the handle constructors.
///
/// Several `implements` blocks share one handle, so one call history backs
/// every capability the struct provides:
///
/// ```
/// use stunt_double::{any, args, capability_double, Expectation, Times};
///
/// pub trait Source {
///     fn names(&self) -> Vec<String>;
/// }
///
/// pub trait Sink {
///     fn add(&self, name: &str) -> Result<(), String>;
/// }
///
/// capability_double! {
///     pub struct MockBlogs
///         implements Source {
///             fn names(&self) -> Vec<String>;
///         }
///         implements Sink {
///             fn add(&self, name: &str) -> Result<(), String>;
///         }
/// }
///
/// let blogs = MockBlogs::of([
///     Expectation::on("names").returns(vec!["AAA"]),
///     Expectation::on("add").with(args![any()]).returns(Ok::<(), String>(())),
/// ]);
/// let source: &dyn Source = &blogs;
/// let sink: &dyn Sink = &blogs;
///
/// assert_eq!(source.names(), vec!["AAA".to_string()]);
/// assert_eq!(sink.add("BBB"), Ok(()));
/// blogs.handle().verify("add", args![any()], Times::once()).unwrap();
/// ```
#[macro_export]
macro_rules! capability_double {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident
        $(
            implements $capability:path {
                $(
                    fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)*) $(-> $ret:ty)?;
                )*
            }
        )+
    ) => {
        $(#[$meta])*
        $vis struct $name {
            handle: $crate::MockHandle,
        }

        #[allow(dead_code)]
        impl $name {
            /// Adapter over a lenient, incrementally configured handle.
            pub fn new() -> Self {
                Self::from_handle($crate::MockHandle::new_named(stringify!($name)))
            }

            /// Adapter over a frozen handle with all expectations declared up front.
            pub fn of<I>(expectations: I) -> Self
            where
                I: ::std::iter::IntoIterator<Item = $crate::Expectation>,
            {
                Self::from_handle($crate::MockHandle::of_named(stringify!($name), expectations))
            }

            /// Adapter over an existing handle.
            pub fn from_handle(handle: $crate::MockHandle) -> Self {
                Self { handle }
            }

            /// The handle behind this adapter, for configuration and verification.
            pub fn handle(&self) -> &$crate::MockHandle {
                &self.handle
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("handle", &self.handle)
                    .finish()
            }
        }

        $(
            impl $capability for $name {
                $(
                    fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)? {
                        #[allow(unused_imports)]
                        use $crate::__private::{KnownDefault as _, NoKnownDefault as _};
                        let default = (&$crate::__private::DefaultOf::<
                            $crate::__return_type!($($ret)?),
                        >::new())
                            .supplier();
                        self.handle
                            .call_with_default(stringify!($method), ($($arg,)*), default)
                    }
                )*
            }
        )+
    };
}

/// The declared return type of an adapter method, `()` when omitted.
#[doc(hidden)]
#[macro_export]
macro_rules! __return_type {
    () => {
        ()
    };
    ($ret:ty) => {
        $ret
    };
}

/// Default supplier selection for generated adapters.
///
/// `(&DefaultOf::<R>::new()).supplier()` resolves to `KnownDefault` when `R`
/// implements `Default` and to `NoKnownDefault` otherwise. Method lookup tries
/// the receiver `&DefaultOf<R>` before auto-referencing it, and only the first
/// impl applies there. `R` must be a concrete type at the call site.
#[doc(hidden)]
pub mod support {
    use crate::application::handle::DefaultFn;
    use std::marker::PhantomData;

    pub struct DefaultOf<R>(PhantomData<fn() -> R>);

    impl<R> DefaultOf<R> {
        pub fn new() -> Self {
            Self(PhantomData)
        }
    }

    impl<R> Default for DefaultOf<R> {
        fn default() -> Self {
            Self::new()
        }
    }

    pub trait KnownDefault<R> {
        fn supplier(&self) -> Option<DefaultFn<R>>;
    }

    impl<R: Default> KnownDefault<R> for DefaultOf<R> {
        fn supplier(&self) -> Option<DefaultFn<R>> {
            Some(R::default as DefaultFn<R>)
        }
    }

    pub trait NoKnownDefault<R> {
        fn supplier(&self) -> Option<DefaultFn<R>>;
    }

    impl<R> NoKnownDefault<R> for &DefaultOf<R> {
        fn supplier(&self) -> Option<DefaultFn<R>> {
            None
        }
    }
}
