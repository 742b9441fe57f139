pub mod cpp_info;
pub mod exports;
pub mod layout;
pub mod options;
pub mod profile;
pub mod requirement;
pub mod settings;

pub use cpp_info::{CppInfo, PackageInfo};
pub use exports::{ExportFileSet, ResolvedFiles};
pub use layout::Layout;
pub use options::BinaryOptions;
pub use profile::{Conf, Profile};
pub use requirement::{Requirement, Requirements};
pub use settings::{CppStd, Os, Settings};
