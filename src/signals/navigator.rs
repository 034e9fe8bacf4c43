//! Navigator plugin and MIME type tables
//!
//! The fingerprint only ever sees one fixed browser: Chrome's two built-in PDF
//! plugins and the matching two-entry `navigator.mimeTypes` table. This module
//! keeps those entries as data and serializes them the way the fingerprint
//! script walks them.
//!
//! # Example
//!
//! ```rust
//! use adyen_fingerprint::signals::navigator::{MimeTypeInfo, PluginInfo};
//!
//! let plugins = PluginInfo::chrome_defaults();
//! assert_eq!(plugins.len(), 2);
//!
//! let mimes = MimeTypeInfo::chrome_defaults();
//! assert_eq!(MimeTypeInfo::serialize_table(&mimes).len(), 76);
//! ```

/// Information about a browser plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name
    pub name: String,
    /// Plugin description
    pub description: String,
    /// Plugin filename
    pub filename: String,
    /// MIME types supported by this plugin
    pub mime_types: Vec<MimeTypeInfo>,
}

impl PluginInfo {
    /// Create a new plugin info
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            filename: filename.into(),
            mime_types: Vec::new(),
        }
    }

    /// Add a MIME type
    pub fn with_mime_type(mut self, mime_type: MimeTypeInfo) -> Self {
        self.mime_types.push(mime_type);
        self
    }

    /// Chrome PDF Plugin
    pub fn chrome_pdf_plugin() -> Self {
        Self::new(
            "Chrome PDF Plugin",
            "Portable Document Format",
            "internal-pdf-viewer",
        )
        .with_mime_type(MimeTypeInfo::chrome_pdf())
    }

    /// Chrome PDF Viewer (the extension-backed entry)
    pub fn chrome_pdf_viewer() -> Self {
        Self::new("Chrome PDF Viewer", "", "mhjfbmdgcfjbbpaeojofohoefgiehjai")
            .with_mime_type(MimeTypeInfo::new("application/pdf", "", "pdf"))
    }

    /// The plugin list every fingerprint reports.
    pub fn chrome_defaults() -> Vec<PluginInfo> {
        vec![Self::chrome_pdf_plugin(), Self::chrome_pdf_viewer()]
    }

    /// `Plugin <i>: <name>; <description>; <filename>; (<mime>; <type>; <suffixes>). `
    pub fn serialize_list(plugins: &[PluginInfo]) -> String {
        plugins
            .iter()
            .enumerate()
            .map(|(i, plugin)| {
                let mimes: String = plugin
                    .mime_types
                    .iter()
                    .map(|m| format!("({}; {}; {})", m.description, m.mime_type, m.suffixes))
                    .collect();
                format!(
                    "Plugin {}: {}; {}; {}; {}. ",
                    i, plugin.name, plugin.description, plugin.filename, mimes
                )
            })
            .collect()
    }
}

/// Information about a MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTypeInfo {
    /// MIME type string (e.g., "application/pdf")
    pub mime_type: String,
    /// Description of the MIME type
    pub description: String,
    /// File extensions (e.g., "pdf")
    pub suffixes: String,
}

impl MimeTypeInfo {
    /// Create a new MIME type info
    pub fn new(
        mime_type: impl Into<String>,
        description: impl Into<String>,
        suffixes: impl Into<String>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            description: description.into(),
            suffixes: suffixes.into(),
        }
    }

    /// Chrome's own PDF MIME type
    pub fn chrome_pdf() -> Self {
        Self::new(
            "application/x-google-chrome-pdf",
            "Portable Document Format",
            "pdf",
        )
    }

    /// `navigator.mimeTypes` as the fingerprint sees it, index order.
    pub fn chrome_defaults() -> Vec<MimeTypeInfo> {
        vec![Self::new("application/pdf", "", "pdf"), Self::chrome_pdf()]
    }

    /// `description + type + suffixes` for each entry, no separators.
    pub fn serialize_table(mime_types: &[MimeTypeInfo]) -> String {
        mime_types
            .iter()
            .map(|m| format!("{}{}{}", m.description, m.mime_type, m.suffixes))
            .collect()
    }
}
