use crate::{
    error::PredictionError,
    messages::{ErrorPayload, PredictionResponse},
    render::RenderedPrediction,
    selection::{FileSelection, SelectedFile},
    transport::{PredictionRequest, PredictionTransport, RawResponse},
    ui::{self, PredictionView, UiState},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// Drives one prediction flow: selection, submission, and the display of its outcome.
///
/// All state sits behind the controller so triggers only need `&self`. At most
/// one prediction is in flight at a time; a trigger arriving while another is
/// running is rejected with [`PredictionError::Busy`].
pub struct PredictionController<T: PredictionTransport, V: PredictionView> {
    transport: T,
    view: Mutex<V>,
    selection: Mutex<FileSelection>,
    state: Mutex<UiState>,
    in_flight: AtomicBool,
}

impl<T: PredictionTransport, V: PredictionView> PredictionController<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            transport,
            view: Mutex::new(view),
            selection: Mutex::new(FileSelection::default()),
            state: Mutex::new(UiState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns the current state of the widget.
    pub fn state(&self) -> UiState {
        lock(&self.state).clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Gives access to the view, e.g. to read what it displays.
    pub fn view(&self) -> MutexGuard<'_, V> {
        lock(&self.view)
    }

    /// Replaces the current selection, updating the file-name display when a file was chosen.
    pub fn select_files(&self, files: Vec<SelectedFile>) {
        let text = lock(&self.selection).replace(files);
        if let Some(text) = text {
            log::debug!("Selection changed: {text}");
            lock(&self.view).show_selected_name(&text);
        }
    }

    /// Submits the selected file and displays the outcome.
    ///
    /// Every error except [`PredictionError::Busy`] has already been shown in
    /// the error area when this returns; the loading state is left on every
    /// path, including when the returned future is dropped early.
    pub async fn trigger_prediction(&self) -> Result<RenderedPrediction, PredictionError> {
        let Some(_flight) = InFlight::claim(&self.in_flight) else {
            log::warn!("A prediction is already in flight, ignoring trigger");
            return Err(PredictionError::Busy);
        };

        let Some(file) = lock(&self.selection).current().cloned() else {
            let err = PredictionError::NoFileSelected;
            log::warn!("{err}");
            self.transition(UiState::Error(err.to_string()));
            // loading was never entered
            *lock(&self.state) = UiState::Idle;
            return Err(err);
        };

        let _loading = LoadingScope::enter(self);

        let outcome = self.exchange(file).await;
        match &outcome {
            Ok(rendered) => {
                log::info!("Prediction: {} ({})", rendered.headline, rendered.confidence);
                self.transition(UiState::Success(rendered.clone()));
            }
            Err(err) => {
                log::warn!("Prediction failed ({:?}): {err}", err.kind());
                self.transition(UiState::Error(err.to_string()));
            }
        }
        outcome
    }

    async fn exchange(&self, file: SelectedFile) -> Result<RenderedPrediction, PredictionError> {
        let raw = self
            .transport
            .submit(PredictionRequest::new(file))
            .await
            .map_err(PredictionError::transport)?;
        let response = interpret(&raw)?;
        Ok(RenderedPrediction::from_response(&response))
    }

    fn transition(&self, next: UiState) {
        log::debug!("UI state -> {}", next.as_str());
        ui::render(&mut *lock(&self.view), &next);
        *lock(&self.state) = next;
    }
}

/// Decodes a raw response into a prediction or the error to present.
///
/// The body must be JSON whatever the status. Failure statuses yield the
/// `detail` message or the fixed fallback; a success status whose body is not a
/// prediction counts as a transport failure.
///
/// One exception: a success status whose body carries a string `error` is
/// presented as a server error with that text, where the browser widget this
/// replaces would have reported a connection failure. Servers that report
/// internal failures this way get their message through to the user.
pub fn interpret(raw: &RawResponse) -> Result<PredictionResponse, PredictionError> {
    let body: Value = serde_json::from_slice(&raw.body).map_err(PredictionError::transport)?;

    if !raw.status.is_success() {
        return Err(PredictionError::Server(
            ErrorPayload::from_body(&body).message(),
        ));
    }

    PredictionResponse::deserialize(&body).map_err(|err| {
        match body.get("error").and_then(Value::as_str) {
            Some(message) => PredictionError::Server(message.to_string()),
            None => PredictionError::transport(err),
        }
    })
}

// Poisoning only means a view panicked mid-call; the data is still usable.
fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the in-flight flag until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps the widget in the loading state until dropped.
struct LoadingScope<'a, T: PredictionTransport, V: PredictionView> {
    controller: &'a PredictionController<T, V>,
}

impl<'a, T: PredictionTransport, V: PredictionView> LoadingScope<'a, T, V> {
    fn enter(controller: &'a PredictionController<T, V>) -> Self {
        controller.transition(UiState::Loading);
        Self { controller }
    }
}

impl<T: PredictionTransport, V: PredictionView> Drop for LoadingScope<'_, T, V> {
    fn drop(&mut self) {
        self.controller.transition(UiState::Idle);
    }
}
