extern crate proc_macro;

mod treegen;

use proc_macro::TokenStream;
use treegen::scpi_tree_impl;

/// Declares an SCPI command tree and expands to `scpi_core` builder calls.
///
/// The notation follows the way instrument manuals document command
/// hierarchies: nesting in braces, optional levels in square brackets,
/// and `=>` attaching a handler function to a level.
///
/// ```ignore
/// let tree = scpi_tree! {
///     SENSor {
///         [POWer] {
///             CURRent => usercode::commands::current,
///             VOLTage => usercode::commands::voltage,
///         }
///     }
/// };
///
/// tree.parse("SENS:VOLT 100mV;SENS:CURR?");
/// ```
///
/// Keywords are validated at compile time; one that does not start with
/// an uppercase ASCII letter is rejected with an error pointing at the
/// offending identifier.
#[proc_macro]
pub fn scpi_tree(input: TokenStream) -> TokenStream {
    scpi_tree_impl(input)
}
