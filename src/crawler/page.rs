/// A page fetch result handed over by the host crawler
///
/// The body is only kept for `200` responses; constructing a response with any
/// other status discards the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    requested_url: String,
    final_url: String,
    status: u16,
    body: Option<Vec<u8>>,
}

impl PageResponse {
    /// Builds a response, dropping the body unless the status is 200
    pub fn new(
        requested_url: impl Into<String>,
        final_url: impl Into<String>,
        status: u16,
        body: Option<Vec<u8>>,
    ) -> Self {
        let body = if status == 200 { body } else { None };
        Self {
            requested_url: requested_url.into(),
            final_url: final_url.into(),
            status,
            body,
        }
    }

    /// A successful fetch with content
    pub fn ok(
        requested_url: impl Into<String>,
        final_url: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(requested_url, final_url, 200, Some(body.into()))
    }

    /// A fetch that produced no usable content
    pub fn failed(
        requested_url: impl Into<String>,
        final_url: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::new(requested_url, final_url, status, None)
    }

    pub fn requested_url(&self) -> &str {
        &self.requested_url
    }

    /// URL the content was actually served from (after redirects)
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Returns true for a 200 response with a non-empty body
    pub fn has_content(&self) -> bool {
        self.status == 200 && self.body.as_ref().is_some_and(|body| !body.is_empty())
    }
}
