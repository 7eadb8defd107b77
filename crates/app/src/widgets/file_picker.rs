//! Native file dialog using rfd (rust file dialog).

use std::path::PathBuf;

/// Filter for file types.
#[derive(Clone)]
pub struct FileFilter {
    /// Label shown in the dialog
    pub name: String,
    /// Extensions without the leading dot
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a filter from a label and extensions.
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The hint shown for permit documents. Not enforced on drops.
    pub fn permit_documents() -> Self {
        Self::new("Permit Documents", &["pdf", "docx"])
    }
}

/// Native file picker for permit documents.
pub struct FilePickerWidget {
    /// Filters offered in the dialog
    filters: Vec<FileFilter>,
    /// Folder the dialog opens in
    start_dir: Option<PathBuf>,
    /// Dialog title
    title: String,
}

impl Default for FilePickerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerWidget {
    /// Create a new file picker.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            start_dir: None,
            title: "Select File".to_string(),
        }
    }

    /// Set the dialog title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a file type filter.
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Blocking single-file picker. Empty when the dialog was cancelled.
    /// Reopens in the folder of the last pick.
    pub fn pick_files(&mut self) -> Vec<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(&self.title);

        for filter in &self.filters {
            let ext_refs: Vec<&str> = filter.extensions.iter().map(|s| s.as_str()).collect();
            dialog = dialog.add_filter(&filter.name, &ext_refs);
        }

        if let Some(ref dir) = self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file().map(|f| vec![f]).unwrap_or_default();
        if let Some(last) = picked.first().and_then(|p| p.parent()) {
            self.start_dir = Some(last.to_path_buf());
        }
        picked
    }
}
