#![warn(clippy::all)]

extern crate proc_macro;

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, Expr, ItemFn};

///
/// Wraps a function body with `std::panic::catch_unwind` so that panics raised
/// while processing a mask never unwind across the C boundary. The macro
/// argument is the value returned in case of panic, or nothing if the
/// function returns void.
///
/// The panic is logged with `log::error!` together with the name of the
/// wrapped function, so the `log` crate must be a dependency of the caller.
///
/// ### Release function with no return value:
/// ```
///     # use tempmask_ffi_macros::catch_panic;
///
///     #[catch_panic]
///     pub extern "C" fn handle_free() {
///         // may panic here...
///     }
/// ```
///
/// ### Function returning a result code, `1` on panic:
/// ```
///     # use tempmask_ffi_macros::catch_panic;
///
///     #[catch_panic(1)]
///     pub extern "C" fn checked_op(len: usize) -> u32 {
///         if len == 0 { panic!("empty input"); }
///         0
///     }
///
///     assert_eq!(checked_op(3), 0);
///     assert_eq!(checked_op(0), 1);
/// ```
///
#[proc_macro_attribute]
pub fn catch_panic(args: TokenStream, item: TokenStream) -> TokenStream {

    let ItemFn { attrs, vis, sig, block } = parse_macro_input!(item as ItemFn);

    // Without args the function is assumed to return void
    let args = if args.is_empty() { quote!(()).into() } else { args };

    let ret_expr = parse_macro_input!(args as Expr);

    let fn_name = sig.ident.to_string();

    let wrapped = quote! {
        #(#attrs)*
        #vis #sig {
            match std::panic::catch_unwind(|| { #block }) {
                Ok(v) => v,
                Err(e) => {
                    if let Some(s) = e.downcast_ref::<&'static str>() {
                        log::error!("Panic in {}: {}", #fn_name, s);
                    } else if let Some(s) = e.downcast_ref::<String>() {
                        log::error!("Panic in {}: {}", #fn_name, s);
                    } else {
                        log::error!("Panic in {}", #fn_name);
                    }
                    #ret_expr
                }
            }
        }
    };

    TokenStream::from(wrapped)
}
