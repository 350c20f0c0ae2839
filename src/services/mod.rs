// Service exports
pub mod blob;
pub mod cloudinary;
pub mod object_store;
pub mod session;
pub mod store;

pub use blob::{BlobError, BlobStorage, UploadBackend, UploadKind};
pub use cloudinary::CloudinaryClient;
pub use object_store::ObjectStoreClient;
pub use session::SessionStore;
pub use store::{ProfileStore, StoreError};
