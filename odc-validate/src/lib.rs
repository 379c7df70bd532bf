//! OpenDRIVE structural/numeric sanity validation with healing (spec
//! §4.6 "Validator", the `validate-opendrive` mode). Operates directly on
//! [`odc_o2r::OpenDriveModelInput`] — the same already-parsed record model
//! the O->R transform consumes — rather than duplicating a second parse
//! step, since both modes start from the same external collaborator's
//! output.

pub mod validate;

pub use validate::validate_and_heal;
