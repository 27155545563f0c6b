use argh::FromArgs;
use predict_widget::{
    ClientConfig, HttpTransport, PredictionController, PredictionView, RenderedPrediction,
    SelectedFile,
    config::{DEFAULT_HOST, DEFAULT_PORT},
};
use std::{path::PathBuf, time::Duration};

#[derive(FromArgs)]
/// Classify an image against a running prediction server
struct ClassifyArgs {
    /// the host to connect to
    #[argh(option, short = 'h', default = "DEFAULT_HOST.to_string()")]
    host: String,

    /// the port to connect to
    #[argh(option, short = 'p', default = "DEFAULT_PORT")]
    port: u16,

    /// the path to the image
    #[argh(option, short = 'i')]
    image: Option<PathBuf>,

    /// request timeout in seconds
    #[argh(option, short = 't')]
    timeout: Option<u64>,
}

/// Prints every display change to the terminal.
struct TerminalView;

impl PredictionView for TerminalView {
    fn show_selected_name(&mut self, text: &str) {
        println!("{text}");
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("⏳ Analyzing...");
        }
    }

    fn show_result(&mut self, result: &RenderedPrediction) {
        println!("{} ({})", result.headline, result.confidence);
        for row in &result.rows {
            println!("  {:<20} {:>8}", row.label, row.percentage);
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn hide_results(&mut self) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: ClassifyArgs = argh::from_env();

    let config = ClientConfig {
        timeout: args.timeout.map(Duration::from_secs),
        ..ClientConfig::new(args.host, args.port)
    };
    let controller = PredictionController::new(HttpTransport::new(&config)?, TerminalView);

    if let Some(path) = args.image {
        controller.select_files(vec![SelectedFile::from_path(path)?]);
    }

    if let Err(err) = controller.trigger_prediction().await {
        // presented errors are already on screen
        if !err.is_presented() {
            eprintln!("{err}");
        }
        std::process::exit(1);
    }

    Ok(())
}
