#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by the roster crates.
//!
//! * [`macro@roster_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@roster_slice`] turns a struct into a cheaply clonable feature slice handle.
//! * [`macro@api_model`] and [`macro@api_handler`] keep HTTP DTOs and handlers consistent and
//!   wire them into `utoipa` when the consuming crate enables its `server` feature.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a crate error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant carrying a source error.
/// * `From<Source>` for every variant carrying a source error.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// * Variants must use named fields (or be unit-like).
/// * A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// * Variants with a `source` field (or a field marked `#[source]`/`#[from]`) must also
///   carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[roster_derive::roster_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StoreError> {
///     std::fs::read("catalog.json").context("Reading catalog")
/// }
/// ```
#[proc_macro_attribute]
pub fn roster_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a vertical slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an `Arc` wrapper
/// that derefs to the inner state and implements `FeatureSlice` so it can be registered in
/// the kernel's `ApiState`.
///
/// # Example
/// ```rust,ignore
/// #[roster_derive::roster_slice]
/// pub struct Activities {
///     pub manager: RosterManager,
/// }
///
/// let slice = Activities::new(ActivitiesInner { manager });
/// ```
#[proc_macro_attribute]
pub fn roster_slice(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

/// Defines an HTTP data transfer object.
///
/// * Adds `Debug`, `Serialize` and `Deserialize` derives when missing.
/// * Adds `utoipa::ToSchema` behind the consuming crate's `server` feature.
/// * Applies `#[serde(rename_all = "snake_case")]` unless overridden with
///   `rename_all = "..."`.
/// * Applies `#[serde(deny_unknown_fields)]` unless disabled with `deny_unknown_fields = false`.
///
/// ```rust,ignore
/// #[roster_derive::api_model]
/// pub struct MessageResponse {
///     pub message: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_model(args.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` behind the consuming crate's `server` feature.
///
/// Accepts the regular `utoipa::path` arguments.
///
/// ```rust,ignore
/// #[roster_derive::api_handler(
///     get,
///     path = "/activities",
///     responses((status = OK, description = "Full catalog")),
///     tag = ACTIVITIES_TAG,
/// )]
/// pub async fn list_activities(activities: Activities) -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_handler(args.into(), input).into()
}
