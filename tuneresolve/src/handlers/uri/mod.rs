//! URI handler chain (first non-empty result wins)

mod known_extensions;
mod m3u8_extension;
mod pls_extension;
mod process;

pub use known_extensions::KnownExtensionsUriHandler;
pub use m3u8_extension::M3u8ExtensionUriHandler;
pub use pls_extension::PlsExtensionUriHandler;
pub use process::ProcessUriHandler;
