//! Ad image use cases

mod add_image;
mod get_image;
mod list_images;

pub use add_image::AddImageUseCase;
pub use get_image::GetImageUseCase;
pub use list_images::ListImagesUseCase;
