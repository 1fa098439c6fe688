//! Dialog configuration: initial form values, swatches, and UI strings.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::format::ExportFormat;
use crate::options::ExportOptions;

/// Toast id of the clipboard action's loading notification.
pub const CLIPBOARD_TOAST_ID: &str = "toastClipboard";
/// Toast id of the download action's loading notification.
pub const DOWNLOAD_TOAST_ID: &str = "toastDownload";

/// Background swatches offered under the color input.
pub const DEFAULT_SWATCHES: [&str; 19] = [
    "#F2F3F4",
    "#181818",
    "#B80000",
    "#DB3E00",
    "#FCCB00",
    "#008B02",
    "#006B76",
    "#1273DE",
    "#004DCF",
    "#5300EB",
    "#EB9694",
    "#FAD0C3",
    "#FEF3BD",
    "#C1E1C5",
    "#BEDADC",
    "#C4DEF6",
    "#BED3F3",
    "#D4C4FB",
    "transparent",
];

/// User-facing strings of the dialog and its toasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub title: String,
    pub filename_label: String,
    pub background_label: String,
    pub clipboard_button: String,
    pub download_button: String,
    pub clipboard_loading: String,
    pub clipboard_success: String,
    pub clipboard_failure: String,
    pub download_loading: String,
    pub download_failure: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            title: "Gerar Imagem do Diagrama".into(),
            filename_label: "Nome do Arquivo".into(),
            background_label: "Cor do Fundo".into(),
            clipboard_button: "Área de transferência".into(),
            download_button: "Baixar".into(),
            clipboard_loading: "Copiando para a área de transferência....".into(),
            clipboard_success: "Copiado para a área de transferência".into(),
            clipboard_failure: "Falha ao copiar para a área de transferência".into(),
            download_loading: "Baixando...".into(),
            download_failure: "Falha ao baixar a imagem!".into(),
        }
    }
}

/// Everything the dialog needs besides the diagram itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Form values on first open.
    pub options: ExportOptions,
    /// Format selected on first open.
    pub format: ExportFormat,
    /// Background swatches, CSS colors.
    pub swatches: Vec<String>,
    pub messages: Messages,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            options: ExportOptions::default(),
            format: ExportFormat::default(),
            swatches: DEFAULT_SWATCHES.iter().map(|&s| s.to_owned()).collect(),
            messages: Messages::default(),
        }
    }
}

impl DialogConfig {
    /// Parse a JSON config, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped
    /// fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
