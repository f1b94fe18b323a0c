//! Picked `<input type="file">` entries as [`ImageFile`]s.

use wasm_bindgen_futures::JsFuture;

use crate::util::data_url::{self, ImageFile, ReadError};

pub struct BrowserFile {
    file: web_sys::File,
    name: String,
}

impl BrowserFile {
    pub fn new(file: web_sys::File) -> Self {
        let name = file.name();
        Self { file, name }
    }
}

#[async_trait::async_trait(?Send)]
impl ImageFile for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_as_data_url(&self) -> Result<String, ReadError> {
        let buffer = JsFuture::from(self.file.array_buffer())
            .await
            .map_err(|e| ReadError(format!("{e:?}")))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(data_url::encode(&self.file.type_(), &bytes))
    }
}
