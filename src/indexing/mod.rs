pub mod builder;
pub mod exclusion;
pub mod facade;
pub mod fingerprint;
pub mod scanner;
pub mod targets;

pub use builder::{BuildOutput, BuildStats, ContentSource, FsContentSource, GraphBuilder};
pub use exclusion::{DEFAULT_EXCLUSIONS, ExclusionMatcher};
pub use facade::{BuildSummary, IndexFacade, ScanSummary};
pub use fingerprint::{fingerprint_bytes, fingerprint_file};
pub use scanner::{DirectoryScanner, ScanOutput, ScanStats};
pub use targets::TargetIndex;
