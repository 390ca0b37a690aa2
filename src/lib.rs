//! Client for the Halo 5 API at <https://www.haloapi.com>.
//!
//! Every endpoint is a GET carrying the `Ocp-Apim-Subscription-Key` header.
//! Metadata and stats endpoints return the JSON body untouched; the profile
//! image endpoints return the URL the API redirects to.

pub mod api_client;
pub mod client;
pub mod error;
pub mod halo_api;
pub mod types;

pub use api_client::{ReqwestDispatcher, API_KEY_HEADER};
pub use client::Dispatcher;
pub use error::{EnvVarError, Error, HttpError, JSONError};
pub use halo_api::{HaloApi, HaloApiBuilder, API_KEY_VAR, BASE_URL};
pub use types::*;
