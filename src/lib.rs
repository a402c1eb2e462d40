//! Generate TypeScript declarations from example JSON payloads or from
//! OpenAPI/Swagger schema tables.
//!
//! Two independent generators share the name allocator and the emitter:
//! - [`generate_interfaces`]: infer interfaces/enums from one JSON sample
//! - [`parse_openapi_text`] + [`generate_types_from_schemas`]: one type
//!   alias per named schema of a spec document
//!
//! Every call builds its own allocator/registry, so calls are deterministic
//! and safe to run concurrently.
pub mod emit;
pub mod enums;
pub mod error;
pub mod ir;
pub mod naming;
pub mod openapi;
pub mod path_de;
pub mod sample;

pub use enums::{enums_from_sample, EnumRegistry, EnumsMap};
pub use error::{SampleParseError, SpecParseError};
pub use naming::NameAllocator;
pub use openapi::{
    generate_types_from_schemas, parse_openapi_text, parse_openapi_value, GeneratedTypes, ParsedSpec,
    SchemaSource,
};
pub use path_de::{parse_sample_slice, parse_sample_text};
pub use sample::{generate_interfaces, infer_sample, GenerationContext, SampleOutput};
