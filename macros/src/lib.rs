//! Derive macros for the todo widget
//!
//! This crate provides procedural macros to reduce boilerplate around actions
//! and state.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (commands/events)
//! - `#[derive(State)]` - Generates the `Fingerprinted` impl used by the store
//!
//! # Example
//!
//! ```ignore
//! use todo_widget_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { text: String },
//!
//!     #[event]
//!     TodoAdded { id: i64, text: String },
//! }
//!
//! // Generated methods:
//! assert!(TodoAction::AddTodo { text: "test".into() }.is_command());
//! assert!(TodoAction::TodoAdded { id: 1, text: "test".into() }.is_event());
//! assert_eq!(TodoAction::AddTodo { text: "test".into() }.name(), "AddTodo");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Index, Variant};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_command()` - Returns true if this variant is a command
/// - `is_event()` - Returns true if this variant is an event
/// - `name()` - Returns the variant name, for log fields
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum TodoAction {
///     #[command]
///     RemoveTodo { id: TodoId },
///
///     #[event]
///     TodoRemoved { id: TodoId },
/// }
///
/// let action = TodoAction::RemoveTodo { id };
///
/// assert!(action.is_command());
/// assert!(!action.is_event());
/// ```
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums"
        )
        .to_compile_error()
        .into();
    };

    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]"
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(variant);

        if is_command {
            command_arms.push(quote! { #pattern => true, });
        }

        if is_event {
            event_arms.push(quote! { #pattern => true, });
        }

        let variant_name = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #variant_name, });
    }

    // An enum without variants has no `self` value to match on.
    let name_body = if name_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#name_arms)* } }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(clippy::match_like_matches_macro)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(clippy::match_like_matches_macro)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name of this action
            #[must_use]
            pub const fn name(&self) -> &'static str {
                #name_body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for State structs
///
/// Implements `todo_widget_core::state::Fingerprinted`. The fingerprint is a
/// tuple holding a clone of every tracked field, so each tracked field must be
/// `Clone + PartialEq`. Use snapshot types for collections to keep the clone
/// cheap.
///
/// # Attributes
///
/// - `#[untracked]` - Leave a field out of the fingerprint (changes to it do
///   not notify subscribers)
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-struct type
///
/// # Example
///
/// ```ignore
/// use todo_widget_macros::State;
///
/// #[derive(State, Clone, Debug)]
/// struct TodoState {
///     pub todos: TodoCollection,
///     pub draft: String,
///     #[untracked]
///     pub renders: u64,
/// }
/// ```
#[proc_macro_derive(State, attributes(untracked))]
pub fn derive_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(
            input,
            "#[derive(State)] can only be used on structs"
        )
        .to_compile_error()
        .into();
    };

    let mut types = Vec::new();
    let mut accessors = Vec::new();

    for (index, field) in data_struct.fields.iter().enumerate() {
        if has_attribute(&field.attrs, "untracked") {
            continue;
        }

        let ty = &field.ty;
        types.push(quote! { #ty });

        let accessor = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = Index::from(index);
                quote! { #index }
            }
        };
        accessors.push(quote! { ::core::clone::Clone::clone(&self.#accessor) });
    }

    let expanded = quote! {
        impl #impl_generics ::todo_widget_core::state::Fingerprinted for #name #ty_generics #where_clause {
            type Fingerprint = ( #(#types,)* );

            fn fingerprint(&self) -> Self::Fingerprint {
                ( #(#accessors,)* )
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern that ignores a variant's fields
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident(name)
    })
}
