//! Interface declaration macro.

/// Declare a trait whose implementations can be wrapped by a [`crate::Profiler`].
///
/// Methods marked `#[profiled]` are timed when called through a wrapped
/// instance; every other method is forwarded untouched. The macro emits the
/// trait itself (with `Send + Sync` supertraits), and an
/// [`Interface`](crate::Interface) impl for `dyn Trait` that builds a private
/// forwarding proxy.
///
/// Methods take `&self` and plain `name: Type` arguments. Doc comments and
/// other attributes on the trait and its methods are kept; `#[profiled]` is
/// consumed by the macro and may appear anywhere among a method's attributes.
///
/// # Examples
///
/// ```ignore
/// use callscope_profiler::profiled_interface;
///
/// profiled_interface! {
///     /// Downloads pages.
///     pub trait Fetcher {
///         /// Download the page at `url`.
///         #[profiled]
///         fn fetch(&self, url: &str) -> Result<String, FetchError>;
///         fn name(&self) -> String;
///     }
/// }
///
/// let fetcher: Box<dyn Fetcher> = profiler.wrap(Box::new(HttpFetcher::new()))?;
/// fetcher.fetch("https://example.com")?; // timed
/// fetcher.name(); // forwarded
/// ```
#[macro_export]
macro_rules! profiled_interface {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[$($attr:tt)*])*
                fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)*) $(-> $ret:ty)?;
            )*
        }
    ) => {
        $(#[$meta])*
        $vis trait $name: Send + Sync {
            $(
                $crate::__trait_method! {
                    []
                    $(#[$($attr)*])*
                    fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)?;
                }
            )*
        }

        impl $crate::Interface for dyn $name {
            fn descriptor() -> &'static $crate::InterfaceDescriptor {
                const PATH: &str = concat!(module_path!(), "::", stringify!($name));
                const METHODS: &[$crate::MethodDescriptor] = &[
                    $(
                        $crate::MethodDescriptor::new(
                            $crate::MethodId::new(
                                PATH,
                                stringify!($method),
                                stringify!(($($arg_ty),*) $(-> $ret)?),
                            ),
                            $crate::__is_profiled!($(#[$($attr)*])*),
                        ),
                    )*
                ];
                static DESCRIPTOR: $crate::InterfaceDescriptor =
                    $crate::InterfaceDescriptor::new(PATH, METHODS);
                &DESCRIPTOR
            }

            fn proxy(delegate: Box<Self>, interceptor: $crate::Interceptor) -> Box<Self> {
                // Slot index of each method, in declaration order.
                #[allow(non_camel_case_types)]
                enum Slot {
                    $($method,)*
                }

                struct Proxy {
                    delegate: Box<dyn $name>,
                    interceptor: $crate::Interceptor,
                }

                impl $name for Proxy {
                    $(
                        fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)? {
                            self.interceptor
                                .invoke(Slot::$method as usize, || self.delegate.$method($($arg),*))
                        }
                    )*
                }

                Box::new(Proxy {
                    delegate,
                    interceptor,
                })
            }
        }
    };
}

/// Whether a method's attribute list contains `#[profiled]`.
#[doc(hidden)]
#[macro_export]
macro_rules! __is_profiled {
    () => {
        false
    };
    (#[profiled] $($rest:tt)*) => {
        true
    };
    (#[$($attr:tt)*] $($rest:tt)*) => {
        $crate::__is_profiled!($($rest)*)
    };
}

/// Emit a trait method declaration, dropping `#[profiled]` from its
/// attributes. Kept attributes accumulate in the leading brackets.
#[doc(hidden)]
#[macro_export]
macro_rules! __trait_method {
    ([$($kept:tt)*] #[profiled] $($rest:tt)*) => {
        $crate::__trait_method! { [$($kept)*] $($rest)* }
    };
    ([$($kept:tt)*] #[$($attr:tt)*] $($rest:tt)*) => {
        $crate::__trait_method! { [$($kept)* #[$($attr)*]] $($rest)* }
    };
    ([$($kept:tt)*] fn $($signature:tt)*) => {
        $($kept)* fn $($signature)*
    };
}
