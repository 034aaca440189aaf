pub mod assets;
pub mod extractor;
pub mod javascript;
pub mod jvm;
pub mod paths;
pub mod python;
pub mod registry;

pub use extractor::{RawRelation, RelationExtractor, TargetForm};
pub use javascript::JavaScriptExtractor;
pub use jvm::JvmExtractor;
pub use paths::ImportPathResolver;
pub use python::PythonExtractor;
pub use registry::ExtractorRegistry;
