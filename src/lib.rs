//! Client-side driver for an image classification widget.
//!
//! A [`PredictionController`] takes the file chosen by the user, submits it
//! to a prediction endpoint through a [`PredictionTransport`] and renders the
//! ranked class probabilities, or an error message, on a [`PredictionView`].

pub mod config;
pub mod controller;
pub mod error;
pub mod label;
pub mod messages;
pub mod render;
pub mod selection;
pub mod transport;
pub mod ui;

pub use config::ClientConfig;
pub use controller::{PredictionController, interpret};
pub use error::{ErrorKind, PredictionError};
pub use label::format_label;
pub use messages::{Confidence, Details, ErrorPayload, PredictionResponse};
pub use render::{DetailRow, RenderedPrediction, format_percentage};
pub use selection::{FileSelection, SelectedFile};
pub use transport::{HttpTransport, PredictionRequest, PredictionTransport, RawResponse};
pub use ui::{PredictionView, UiState};
