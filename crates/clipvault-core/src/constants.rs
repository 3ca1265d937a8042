//! Shared constants

/// Maximum length of a video title.
pub const MAX_TITLE_LENGTH: u64 = 200;

/// Folder the media gateway files uploaded videos under.
pub const VIDEO_UPLOAD_FOLDER: &str = "video-uploads";

/// Folder the media gateway files social-share images under.
pub const IMAGE_UPLOAD_FOLDER: &str = "social-share-uploads";

/// Incoming transformation applied to every uploaded video: automatic quality, MP4 output.
pub const VIDEO_TRANSFORMATION: &str = "q_auto,f_mp4";

pub const BYTES_PER_MB: usize = 1024 * 1024;
