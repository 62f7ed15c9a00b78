//! Media-type handler chain (all handlers run, outputs concatenated)

mod apple_mpeg_url;
mod known_media_type;
mod mpeg_url;
mod scpls;

pub use apple_mpeg_url::AppleMpegUrlMediaTypeHandler;
pub use known_media_type::KnownMediaTypeHandler;
pub use mpeg_url::MpegUrlMediaTypeHandler;
pub use scpls::ScplsMediaTypeHandler;
