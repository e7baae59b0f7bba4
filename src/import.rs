//! File-format dispatch and the geometry importer seam.

use std::fmt;

use crate::error::ImportError;
use crate::topology::Shape;

/// CAD exchange formats the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Step,
    Iges,
}

impl FileFormat {
    /// Picks the format from the lowercased extension of `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::UnsupportedFormat`] for anything other than
    /// `step`, `stp`, `iges` or `igs`.
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "step" | "stp" => Ok(Self::Step),
            "iges" | "igs" => Ok(Self::Iges),
            _ => Err(ImportError::UnsupportedFormat { extension }),
        }
    }

    /// Canonical extension used when staging the file for the reader.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Iges => "iges",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Status returned by a CAD reader after reading a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Nothing was read.
    Void,
    /// The file was read successfully.
    Done,
    /// The file was read with errors.
    Error,
    /// The reader failed.
    Fail,
    /// Reading was interrupted.
    Stop,
}

/// A CAD kernel reader: reads a file, then transfers its roots into a shape.
pub trait Importer {
    /// Reads `data` as `format`.
    fn read(&mut self, data: &[u8], format: FileFormat) -> ReadStatus;

    /// Transfers the roots of the last successful read into one shape.
    fn take_shape(&mut self) -> Option<Shape>;
}

/// Runs format dispatch, read and transfer once for an uploaded file.
///
/// # Errors
///
/// Returns an error if the extension is not supported, the reader does not
/// report [`ReadStatus::Done`], or no shape is transferred.
pub fn import_shape<I: Importer + ?Sized>(
    importer: &mut I,
    file_name: &str,
    data: &[u8],
) -> Result<Shape, ImportError> {
    let format = FileFormat::from_file_name(file_name)?;
    import_with_format(importer, file_name, format, data)
}

pub(crate) fn import_with_format<I: Importer + ?Sized>(
    importer: &mut I,
    file_name: &str,
    format: FileFormat,
    data: &[u8],
) -> Result<Shape, ImportError> {
    let status = importer.read(data, format);
    if status != ReadStatus::Done {
        return Err(ImportError::Failed {
            file: file_name.to_owned(),
            status,
        });
    }
    tracing::info!(file = file_name, %format, "file is loaded");
    let shape = importer.take_shape().ok_or_else(|| ImportError::NoShape {
        file: file_name.to_owned(),
    })?;
    tracing::info!(file = file_name, solids = shape.solid_count(), "converted successfully");
    Ok(shape)
}
