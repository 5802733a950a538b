//! Process exit codes for `metapath`.
//! An unresolved key only changes the exit code under `--strict`.

pub const SUCCESS: u8 = 0;
pub const KEY_NOT_FOUND: u8 = 1; // --strict and the key did not resolve
pub const FETCH_ERROR: u8 = 2; // Metadata could not be fetched or printed
