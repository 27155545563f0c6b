use crate::{config::ClientConfig, selection::SelectedFile};
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use std::future::Future;

/// A single submission: one file under the multipart field [`PredictionRequest::FIELD_NAME`].
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    pub file: SelectedFile,
}

impl PredictionRequest {
    pub const FIELD_NAME: &'static str = "file";

    pub fn new(file: SelectedFile) -> Self {
        Self { file }
    }

    /// Builds the multipart form carrying the file.
    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let SelectedFile {
            name,
            content_type,
            data,
        } = self.file;

        let mut part = Part::bytes(data).file_name(name);
        if let Some(content_type) = content_type {
            part = part.mime_str(&content_type)?;
        }
        Ok(Form::new().part(Self::FIELD_NAME, part))
    }
}

/// What came back from the endpoint, before any decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Trait for the network exchange behind a prediction.
///
/// An `Err` means no response was obtained at all; any HTTP status, success
/// or not, is an `Ok`.
pub trait PredictionTransport {
    /// The error type returned when the exchange fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submits the request and waits for the whole response.
    fn submit(
        &self,
        request: PredictionRequest,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>>;
}

/// Submits predictions over HTTP with `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionTransport for HttpTransport {
    type Error = reqwest::Error;

    async fn submit(&self, request: PredictionRequest) -> Result<RawResponse, Self::Error> {
        log::debug!("Submitting {} to {}", request.file.name, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(request.into_form()?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();
        log::debug!("Received {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}
