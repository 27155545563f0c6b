use crate::render::RenderedPrediction;

/// Phase of the widget as driven by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum UiState {
    /// Ready for a trigger.
    Idle,
    /// A submission is in flight and the trigger is disabled.
    Loading,
    /// A result has just been rendered.
    Success(RenderedPrediction),
    /// An error message has just been presented.
    Error(String),
}

impl UiState {
    /// Returns the state as a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success(_) => "success",
            UiState::Error(_) => "error",
        }
    }
}

/// The display surface the widget drives.
///
/// Implementors own the addressable regions: the file-name display, the
/// loading indicator, the trigger control, the result area and the error
/// area. Each operation touches only the regions it names.
pub trait PredictionView {
    /// Sets the text of the file-name display.
    fn show_selected_name(&mut self, text: &str);

    /// Shows or hides the loading indicator; the trigger control is disabled while loading.
    fn set_loading(&mut self, loading: bool);

    /// Reveals the result area with a freshly rendered prediction, replacing any previous rows.
    fn show_result(&mut self, result: &RenderedPrediction);

    /// Reveals the error area with the given message.
    fn show_error(&mut self, message: &str);

    /// Hides both the result and the error area.
    fn hide_results(&mut self);
}

/// Applies a state to the view.
pub fn render<V: PredictionView + ?Sized>(view: &mut V, state: &UiState) {
    match state {
        UiState::Idle => view.set_loading(false),
        UiState::Loading => {
            view.set_loading(true);
            view.hide_results();
        }
        UiState::Success(result) => view.show_result(result),
        UiState::Error(message) => view.show_error(message),
    }
}
