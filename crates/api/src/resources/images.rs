//! Image upload.
//!
//! The backend stores the file and answers with the generated filename as
//! plain text. Public URLs come from
//! [`ApiConfig::image_url`](crate::ApiConfig::image_url).

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Upload an image and return the filename the backend stored it
    /// under.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// file.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        self.post_multipart_text("images", form).await
    }
}
