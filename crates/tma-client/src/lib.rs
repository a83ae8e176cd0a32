//! Authenticated backend client for the Telegram Mini App.
//!
//! Every request carries the Telegram `initData` under
//! [`INIT_DATA_HEADER`]; an empty credential fails locally before any I/O.
//! The wire is abstracted behind [`HttpTransport`] so the same client runs
//! on browser `fetch` and on `reqwest`.

pub mod client;
pub mod credential;
pub mod endpoints;
pub mod error;
#[cfg(feature = "reqwest")]
pub mod reqwest_transport;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod transport;

pub use client::{ApiClient, ClientConfig, DEFAULT_API_BASE_URL};
pub use credential::{INIT_DATA_HEADER, INIT_DATA_HEADER_ALIAS, InitData};
pub use endpoints::DemoEndpoint;
pub use error::{ApiError, ErrorKind, HttpStatusError, Operation};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
