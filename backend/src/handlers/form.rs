//! Multipart form extraction

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::AppResult;

/// Fields of the advisory form. Both are optional.
#[derive(Debug, Default)]
pub struct ReportForm {
    /// Uploaded image; only kept when the client sent a non-empty filename
    pub image: Option<Bytes>,
    pub city: Option<String>,
}

impl ReportForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ReportForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("image") => {
                    let has_filename = field.file_name().is_some_and(|name| !name.is_empty());
                    let data = field.bytes().await?;
                    if has_filename {
                        form.image = Some(data);
                    }
                }
                Some("city") => {
                    form.city = Some(field.text().await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// City input, if a non-empty value was submitted
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }
}
