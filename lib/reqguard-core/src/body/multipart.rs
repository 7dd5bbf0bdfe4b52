use bytes::Bytes;
use headers::ContentType;
use mime::Mime;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::EncodedBody;
use crate::ReqguardError;

/// Transport options of a binary multipart field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartOptions {
    /// File name sent in the `Content-Disposition` header.
    pub filename: Option<String>,
    /// Part content type.
    pub content_type: Option<Mime>,
}

/// Binary data of a multipart field with its transport options.
#[derive(Clone, PartialEq, derive_more::Debug)]
pub struct BinaryPart {
    #[debug(ignore)]
    data: Bytes,
    options: PartOptions,
}

impl BinaryPart {
    /// Creates a binary part without options.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            options: PartOptions::default(),
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.options.filename = Some(filename.into());
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.options.content_type = Some(content_type);
        self
    }

    /// Returns the data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the transport options.
    pub fn options(&self) -> &PartOptions {
        &self.options
    }
}

// Only the size is exposed: the data itself is never displayed.
impl Serialize for BinaryPart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BinaryPart", 3)?;
        state.serialize_field("size", &self.data.len())?;
        state.serialize_field("filename", &self.options.filename)?;
        state.serialize_field(
            "contentType",
            &self.options.content_type.as_ref().map(ToString::to_string),
        )?;
        state.end()
    }
}

/// Value of a multipart field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    /// A text value.
    Text(String),
    /// Binary data.
    Binary(BinaryPart),
}

/// A named multipart field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// The field name.
    pub name: String,
    /// The field value.
    pub value: FormValue,
}

/// An ordered `multipart/form-data` form.
///
/// Fields keep their insertion order, duplicates included.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{BinaryPart, MultipartForm};
///
/// let mut form = MultipartForm::new();
/// form.append_text("title", "holidays");
/// form.append_binary("photo", BinaryPart::new(vec![0xFF, 0xD8]).with_filename("beach.jpg"));
///
/// assert_eq!(form.field_names().collect::<Vec<_>>(), vec!["title", "photo"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultipartForm {
    fields: Vec<FormField>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
    }

    /// Appends a binary field.
    pub fn append_binary(&mut self, name: impl Into<String>, part: BinaryPart) {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::Binary(part),
        });
    }

    /// Returns the fields in order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.fields.iter_mut()
    }

    /// Returns the field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Checks if the form is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Encodes the form with a generated boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type cannot be built.
    pub fn encode(&self) -> Result<EncodedBody, ReqguardError> {
        let boundary = format!("----formdata-reqguard-{}", uuid::Uuid::new_v4());
        self.encode_with_boundary(&boundary)
    }

    /// Encodes the form with the given boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary makes an invalid content type.
    pub fn encode_with_boundary(&self, boundary: &str) -> Result<EncodedBody, ReqguardError> {
        let content_type = format!("multipart/form-data; boundary={boundary}").parse::<Mime>()?;

        let mut data = Vec::new();
        for field in &self.fields {
            let name = escape_quoted(&field.name);
            data.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &field.value {
                FormValue::Text(value) => {
                    data.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    data.extend_from_slice(value.as_bytes());
                }
                FormValue::Binary(part) => {
                    let disposition = match &part.options.filename {
                        Some(filename) => format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\n",
                            escape_quoted(filename)
                        ),
                        None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
                    };
                    let part_type = part
                        .options
                        .content_type
                        .as_ref()
                        .unwrap_or(&mime::APPLICATION_OCTET_STREAM);
                    data.extend_from_slice(disposition.as_bytes());
                    data.extend_from_slice(format!("Content-Type: {part_type}\r\n\r\n").as_bytes());
                    data.extend_from_slice(&part.data);
                }
            }
            data.extend_from_slice(b"\r\n");
        }
        data.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Ok(EncodedBody {
            content_type: ContentType::from(content_type),
            data,
        })
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
