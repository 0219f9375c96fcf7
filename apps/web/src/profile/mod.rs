//! Profile update flow: form state, multipart encoding and the dialog.

mod dialog;
mod encode;
mod form;

pub use dialog::{LoadingFlag, ProfileDialog, UNSUCCESSFUL_UPDATE_MESSAGE};
pub use encode::{FormPart, FormValue, ProfileUpdateRequest, ResumeFile};
pub use form::{ProfileField, ProfileForm};
