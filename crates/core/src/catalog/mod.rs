//! Resource catalogs
//!
//! A catalog is the immutable set of tables a device advertises: parameter
//! descriptors, extended metadata pages, files and commands. Each class has
//! its own identifier space; ids need not be contiguous. Table order is the
//! order hosts enumerate in.
//!
//! # Usage
//!
//! ```
//! use reach_core::catalog::{Catalog, ParamDataType, ParamDescriptor, StaticCatalog};
//!
//! const PARAMS: &[ParamDescriptor] = &[
//!     ParamDescriptor::new(1, ParamDataType::Uint32, "uint32_value").default_value(1970.0),
//! ];
//!
//! let catalog = StaticCatalog::new(PARAMS, &[], &[], &[]);
//! assert!(catalog.validate().is_ok());
//! assert_eq!(catalog.parameter_index(1), Some(0));
//! ```

mod descriptor;
mod fingerprint;

pub use descriptor::{
    AccessLevel, CommandAction, CommandDescriptor, ExLabel, FileDescriptor, ParamDataType,
    ParamDescriptor, ParamExDescriptor, StorageClass, COMMAND_NAME_LEN, EX_LABEL_LEN,
    FILE_NAME_LEN, MAX_LABELS_PER_PAGE, PARAM_DESCRIPTION_LEN, PARAM_NAME_LEN, PARAM_UNITS_LEN,
};
pub use fingerprint::fingerprint;

use crate::error::CatalogError;

/// Maximum number of parameters a catalog may declare
pub const MAX_PARAMS: usize = 64;

/// Source of the immutable resource tables
pub trait Catalog {
    fn parameters(&self) -> &[ParamDescriptor];

    fn extended(&self) -> &[ParamExDescriptor];

    fn files(&self) -> &[FileDescriptor];

    fn commands(&self) -> &[CommandDescriptor];

    /// Descriptor of parameter `pid`
    fn parameter(&self, pid: u32) -> Option<&ParamDescriptor> {
        self.parameters().iter().find(|d| d.id == pid)
    }

    /// Table position of parameter `pid`
    fn parameter_index(&self, pid: u32) -> Option<usize> {
        self.parameters().iter().position(|d| d.id == pid)
    }

    fn file(&self, fid: u32) -> Option<&FileDescriptor> {
        self.files().iter().find(|d| d.id == fid)
    }

    fn command(&self, cid: u32) -> Option<&CommandDescriptor> {
        self.commands().iter().find(|d| d.id == cid)
    }

    /// Schema fingerprint over the parameter and extended tables
    fn fingerprint(&self) -> u32 {
        fingerprint(self.parameters(), self.extended())
    }

    /// Check the structural rules every catalog must satisfy
    fn validate(&self) -> Result<(), CatalogError> {
        validate_parameters(self.parameters())?;
        validate_extended(self.parameters(), self.extended())?;
        validate_files(self.files())?;
        validate_commands(self.commands())
    }
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn parameters(&self) -> &[ParamDescriptor] {
        (**self).parameters()
    }

    fn extended(&self) -> &[ParamExDescriptor] {
        (**self).extended()
    }

    fn files(&self) -> &[FileDescriptor] {
        (**self).files()
    }

    fn commands(&self) -> &[CommandDescriptor] {
        (**self).commands()
    }
}

/// Catalog backed by `'static` tables, usually `const` arrays
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    parameters: &'static [ParamDescriptor],
    extended: &'static [ParamExDescriptor],
    files: &'static [FileDescriptor],
    commands: &'static [CommandDescriptor],
}

impl StaticCatalog {
    pub const fn new(
        parameters: &'static [ParamDescriptor],
        extended: &'static [ParamExDescriptor],
        files: &'static [FileDescriptor],
        commands: &'static [CommandDescriptor],
    ) -> Self {
        Self {
            parameters,
            extended,
            files,
            commands,
        }
    }
}

impl Catalog for StaticCatalog {
    fn parameters(&self) -> &[ParamDescriptor] {
        self.parameters
    }

    fn extended(&self) -> &[ParamExDescriptor] {
        self.extended
    }

    fn files(&self) -> &[FileDescriptor] {
        self.files
    }

    fn commands(&self) -> &[CommandDescriptor] {
        self.commands
    }
}

fn text_fits(text: Option<&str>, max: usize) -> bool {
    text.map_or(true, |t| t.len() <= max)
}

fn validate_parameters(params: &[ParamDescriptor]) -> Result<(), CatalogError> {
    if params.len() > MAX_PARAMS {
        return Err(CatalogError::TooManyParameters(params.len()));
    }
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|p| p.id == param.id) {
            return Err(CatalogError::DuplicateParameterId(param.id));
        }
        if !text_fits(Some(param.name), PARAM_NAME_LEN)
            || !text_fits(param.description, PARAM_DESCRIPTION_LEN)
            || !text_fits(param.units, PARAM_UNITS_LEN)
        {
            return Err(CatalogError::TextTooLong(param.id));
        }
    }
    Ok(())
}

fn validate_extended(
    params: &[ParamDescriptor],
    pages: &[ParamExDescriptor],
) -> Result<(), CatalogError> {
    for page in pages {
        let pid = page.associated_pid;
        let param = params
            .iter()
            .find(|p| p.id == pid)
            .ok_or(CatalogError::UnknownParameter(pid))?;
        if param.data_type != page.data_type || !page.data_type.has_labels() {
            return Err(CatalogError::ExtendedTypeMismatch(pid));
        }
        if page.labels.len() > MAX_LABELS_PER_PAGE {
            return Err(CatalogError::TooManyLabels(pid));
        }
        if page.labels.iter().any(|l| l.label.len() > EX_LABEL_LEN) {
            return Err(CatalogError::TextTooLong(pid));
        }
    }
    Ok(())
}

fn validate_files(files: &[FileDescriptor]) -> Result<(), CatalogError> {
    for (i, file) in files.iter().enumerate() {
        if files[..i].iter().any(|f| f.id == file.id) {
            return Err(CatalogError::DuplicateFileId(file.id));
        }
        if file.name.len() > FILE_NAME_LEN {
            return Err(CatalogError::TextTooLong(file.id));
        }
    }
    Ok(())
}

fn validate_commands(commands: &[CommandDescriptor]) -> Result<(), CatalogError> {
    for (i, command) in commands.iter().enumerate() {
        if commands[..i].iter().any(|c| c.id == command.id) {
            return Err(CatalogError::DuplicateCommandId(command.id));
        }
        if command.name.len() > COMMAND_NAME_LEN {
            return Err(CatalogError::TextTooLong(command.id));
        }
    }
    Ok(())
}
