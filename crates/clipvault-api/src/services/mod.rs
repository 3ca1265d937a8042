pub mod form;
pub mod image;
pub mod upload;

pub use form::{ImageUploadForm, VideoUploadForm};
pub use image::ImageUploadService;
pub use upload::VideoUploadService;
