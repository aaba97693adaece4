//! Core library for the matriz-tools command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the integration tests. The modules are
//! structured to keep responsibilities narrow and composable: IO adapters
//! live under [`matriz::tools::io`], data representations inside
//! [`matriz::tools::model`], the text primitives in
//! [`matriz::tools::normalize`], the place-name reference set in
//! [`matriz::tools::reference`], the route and row-record extraction in
//! [`matriz::tools::routes`] and [`matriz::tools::tabular`], and the
//! orchestration under [`matriz::tools::sync`].

pub mod matriz;

pub use matriz::tools::{
    Result, ToolError, error, io, model, normalize, reference, routes, sync, tabular,
};
