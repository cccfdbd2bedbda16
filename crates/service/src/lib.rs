//! Service layer for the client registry.
//! - `registry`: the HTTP-facing operations behind an injectable repository.
//! - `seed`: explicit insertion of rows no HTTP route creates.

pub mod errors;
pub mod registry;
pub mod seed;
#[cfg(test)]
pub mod test_support;

pub use registry::RegistryService;
