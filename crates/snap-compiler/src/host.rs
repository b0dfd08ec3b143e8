//! Two-phase template transport for callers that preallocate storage.
//!
//! Phase one compiles a selected template and reports its size; phase
//! two copies the cached buffer into caller-owned memory. Failures in
//! either phase yield 0 and write nothing.

use crate::config::CompilerConfig;
use crate::emit::{CompileError, compile};
use crate::markup::Document;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no encoded template is cached")]
    NoTemplateCached,
    #[error("destination holds {available} bytes, template needs {needed}")]
    DestinationTooSmall { needed: usize, available: usize },
    #[error("template not found: {0}")]
    SelectorNotFound(String),
    #[error("template compile failed: {0}")]
    Compile(#[from] CompileError),
}

/// A document of templates plus a one-slot cache of the last encoding.
#[derive(Debug)]
pub struct TemplateHost {
    document: Document,
    config: CompilerConfig,
    cached: Option<Vec<u8>>,
}

impl TemplateHost {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, CompilerConfig::default())
    }

    pub fn with_config(document: Document, config: CompilerConfig) -> Self {
        Self {
            document,
            config,
            cached: None,
        }
    }

    /// Parse `source` and host the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(Document::parse(source))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Length of the cached buffer, if any.
    pub fn cached_len(&self) -> Option<usize> {
        self.cached.as_ref().map(Vec::len)
    }

    /// Compile the template matched by `selector`, cache it, and return
    /// its byte length. Returns 0 on any failure.
    pub fn encoded_template_size(&mut self, selector: &str) -> usize {
        match self.try_encoded_template_size(selector) {
            Ok(len) => len,
            Err(err) => {
                tracing::error!(selector, "{err}");
                0
            }
        }
    }

    /// Copy the cached buffer into `dest` and clear the cache. Returns the
    /// number of bytes written, or 0 with `dest` untouched.
    pub fn encode_template(&mut self, dest: &mut [u8]) -> usize {
        match self.try_encode_template(dest) {
            Ok(len) => len,
            Err(err) => {
                tracing::error!("{err}");
                0
            }
        }
    }

    /// Fallible form of [`Self::encoded_template_size`].
    ///
    /// A failed request drops any previously cached buffer.
    pub fn try_encoded_template_size(&mut self, selector: &str) -> Result<usize, TransportError> {
        self.cached = None;

        let template = self
            .document
            .select(selector)
            .ok_or_else(|| TransportError::SelectorNotFound(selector.to_string()))?;
        let compiled = compile(&template.children, &self.config)?;

        let len = compiled.bytes.len();
        tracing::debug!(selector, len, "template cached");
        self.cached = Some(compiled.bytes);
        Ok(len)
    }

    /// Fallible form of [`Self::encode_template`].
    ///
    /// An undersized `dest` keeps the cache so the caller can retry.
    pub fn try_encode_template(&mut self, dest: &mut [u8]) -> Result<usize, TransportError> {
        let bytes = self.cached.as_ref().ok_or(TransportError::NoTemplateCached)?;
        if dest.len() < bytes.len() {
            return Err(TransportError::DestinationTooSmall {
                needed: bytes.len(),
                available: dest.len(),
            });
        }

        let len = bytes.len();
        dest[..len].copy_from_slice(bytes);
        self.cached = None;
        Ok(len)
    }
}
