use std::{io, path::Path};

/// An image picked by the user: raw bytes plus the name it is displayed and uploaded under.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).map(str::to_string);
        Self {
            name,
            content_type,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, naming it after the last path component.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid file name"))?;
        let data = std::fs::read(path)?;
        Ok(Self::new(name, data))
    }
}

// Guess the MIME type based on extension
fn content_type_for(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// The current contents of the file picker.
#[derive(Clone, Debug, Default)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    /// Replaces the selection and returns the text for the file-name display, if it should change.
    pub fn replace(&mut self, files: Vec<SelectedFile>) -> Option<String> {
        self.files = files;
        self.current().map(|file| selected_name_text(&file.name))
    }

    /// The file a prediction would be made on.
    pub fn current(&self) -> Option<&SelectedFile> {
        self.files.first()
    }
}

pub fn selected_name_text(name: &str) -> String {
    format!("✅ Selected: {name}")
}
