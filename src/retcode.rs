use crate::ffi;
use thiserror::Error;

/// Return code of a SCIP library call.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Retcode {
    /// Normal termination.
    #[error("okay")]
    Okay,
    /// Unspecified error.
    #[error("unspecified error")]
    Error,
    /// Insufficient memory error.
    #[error("insufficient memory")]
    NoMemory,
    /// Read error.
    #[error("read error")]
    ReadError,
    /// Write error.
    #[error("write error")]
    WriteError,
    /// File not found error.
    #[error("file not found")]
    NoFile,
    /// Cannot create file.
    #[error("cannot create file")]
    FileCreateError,
    /// Error in LP solver.
    #[error("LP solver error")]
    LpError,
    /// No problem exists.
    #[error("no problem exists")]
    NoProblem,
    /// Method cannot be called at this time in solution process.
    #[error("invalid call in the current stage")]
    InvalidCall,
    /// Error in input data.
    #[error("invalid input data")]
    InvalidData,
    /// Method returned an invalid result code.
    #[error("invalid result code")]
    InvalidResult,
    /// A required plugin was not found.
    #[error("plugin not found")]
    PluginNotFound,
    /// The parameter with the given name was not found.
    #[error("unknown parameter")]
    ParameterUnknown,
    /// The parameter is not of the expected type.
    #[error("parameter has the wrong type")]
    ParameterWrongType,
    /// The value is invalid for the given parameter.
    #[error("invalid parameter value")]
    ParameterWrongVal,
    /// The given key is already existing in table.
    #[error("key already exists")]
    KeyAlreadyExisting,
    /// Maximal branching depth level exceeded.
    #[error("maximal branching depth exceeded")]
    MaxDepthLevel,
    /// No branching could be created.
    #[error("branching error")]
    BranchError,
    /// Function not implemented.
    #[error("not implemented")]
    NotImplemented,
    /// A code this crate does not know about.
    #[error("unknown return code {0}")]
    Unknown(i32),
}

impl From<ffi::SCIP_Retcode> for Retcode {
    fn from(val: ffi::SCIP_Retcode) -> Self {
        match val {
            ffi::SCIP_Retcode_SCIP_OKAY => Retcode::Okay,
            ffi::SCIP_Retcode_SCIP_ERROR => Retcode::Error,
            ffi::SCIP_Retcode_SCIP_NOMEMORY => Retcode::NoMemory,
            ffi::SCIP_Retcode_SCIP_READERROR => Retcode::ReadError,
            ffi::SCIP_Retcode_SCIP_WRITEERROR => Retcode::WriteError,
            ffi::SCIP_Retcode_SCIP_NOFILE => Retcode::NoFile,
            ffi::SCIP_Retcode_SCIP_FILECREATEERROR => Retcode::FileCreateError,
            ffi::SCIP_Retcode_SCIP_LPERROR => Retcode::LpError,
            ffi::SCIP_Retcode_SCIP_NOPROBLEM => Retcode::NoProblem,
            ffi::SCIP_Retcode_SCIP_INVALIDCALL => Retcode::InvalidCall,
            ffi::SCIP_Retcode_SCIP_INVALIDDATA => Retcode::InvalidData,
            ffi::SCIP_Retcode_SCIP_INVALIDRESULT => Retcode::InvalidResult,
            ffi::SCIP_Retcode_SCIP_PLUGINNOTFOUND => Retcode::PluginNotFound,
            ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN => Retcode::ParameterUnknown,
            ffi::SCIP_Retcode_SCIP_PARAMETERWRONGTYPE => Retcode::ParameterWrongType,
            ffi::SCIP_Retcode_SCIP_PARAMETERWRONGVAL => Retcode::ParameterWrongVal,
            ffi::SCIP_Retcode_SCIP_KEYALREADYEXISTING => Retcode::KeyAlreadyExisting,
            ffi::SCIP_Retcode_SCIP_MAXDEPTHLEVEL => Retcode::MaxDepthLevel,
            ffi::SCIP_Retcode_SCIP_BRANCHERROR => Retcode::BranchError,
            ffi::SCIP_Retcode_SCIP_NOTIMPLEMENTED => Retcode::NotImplemented,
            other => Retcode::Unknown(other as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn okay_and_errors() {
        assert_eq!(Retcode::from(ffi::SCIP_Retcode_SCIP_OKAY), Retcode::Okay);
        assert_eq!(Retcode::from(ffi::SCIP_Retcode_SCIP_LPERROR), Retcode::LpError);
        assert_eq!(
            Retcode::from(ffi::SCIP_Retcode_SCIP_INVALIDDATA).to_string(),
            "invalid input data"
        );
    }
}
