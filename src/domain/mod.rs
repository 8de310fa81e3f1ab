//! Domain Layer
//!
//! The configuration engine without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Config model, backup names, suppression state
//! - `value_objects/` - Checksum, backup tag, severity, finding identity
//! - `services/` - Parser/serializer, validation engine, differ
//! - `policies/` - Catalog of known GRUB variables
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
