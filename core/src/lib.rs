//! Sans-IO core for the data-item API testing harness.
//!
//! # Overview
//! Everything the harness knows about the remote API lives here: the wire
//! DTOs, the request builder / response parser pairs, the error taxonomy,
//! and the four form state machines that drive the manual-testing UI. None
//! of it touches the network — the host executes each `HttpRequest` and
//! feeds the `HttpResponse` (or transport verdict) back in.
//!
//! # Design
//! - `ItemClient` is stateless; it holds only the base URL.
//! - Each REST operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), so the I/O boundary is explicit.
//! - Form machines are deterministic: they emit the id/payload to send and
//!   absorb the `Result` the host got back, which makes every error path
//!   testable with a literal response.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod forms;
pub mod http;
pub mod types;

pub use client::ItemClient;
pub use error::ApiError;
pub use forms::{CreateForm, DeleteForm, FormError, QueryPanel, UpdateForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{DataItem, ItemPatch, NewDataItem};
