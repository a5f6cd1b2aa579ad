use std::path::{Path, PathBuf};

use super::errors::ReceiptError;

const DATA_URL_PREFIX: &str = r"^data:[\w.+-]+/[\w.+-]+;base64,";

/// Base64 payload of a receipt image, without any data-URI prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Image(String);

impl Base64Image {
    /// Accepts either a bare base64 string or a `data:<mime>;base64,` URL.
    /// Whitespace is dropped; an empty payload is an encoding failure.
    pub fn from_data_url(raw: &str) -> Result<Self, ReceiptError> {
        let stripped = regex::Regex::new(DATA_URL_PREFIX)
            .map(|re| re.replace(raw.trim_start(), "").to_string())
            .unwrap_or_else(|_| raw.to_string());
        let clean: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();

        if clean.is_empty() {
            return Err(ReceiptError::encoding("empty image payload"));
        }
        Ok(Self(clean))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where the bytes of a selected image live.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    DataUrl(String),
}

/// Opaque handle to an image the user picked for scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    name: String,
    source: ImageSource,
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "receipt".to_string());
        Self {
            name,
            source: ImageSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Bytes(data),
        }
    }

    pub fn from_data_url(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::DataUrl(data_url.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

/// Digit grouping convention used when reading totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// `14,000.50`
    #[default]
    CommaThousands,
    /// `14.000,50`
    PeriodThousands,
}

impl NumberFormat {
    /// Returns `(group_separator, decimal_separator)`.
    pub fn separators(&self) -> (char, char) {
        match self {
            NumberFormat::CommaThousands => (',', '.'),
            NumberFormat::PeriodThousands => ('.', ','),
        }
    }
}

impl std::fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberFormat::CommaThousands => write!(f, "comma"),
            NumberFormat::PeriodThousands => write!(f, "period"),
        }
    }
}

impl std::str::FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" => Ok(NumberFormat::CommaThousands),
            "period" => Ok(NumberFormat::PeriodThousands),
            _ => Err(format!("Invalid number format: {}", s)),
        }
    }
}
