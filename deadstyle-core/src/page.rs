//! Page descriptors: the four ways a page's HTML can be supplied.

use std::fmt;
use std::io::Read;

use crate::error::RetrievalError;
use crate::fetch::PageResolver;

/// A script run against the page resolver.
///
/// Returning `Ok(Some(html))` supplies the page inline; `Ok(None)` selects
/// the resolver's current document (useful after driving the browsing agent
/// through a navigation). Retrieval errors raised here are recovered like
/// any other page retrieval failure.
pub type PageScript =
    Box<dyn FnMut(&mut dyn PageResolver) -> Result<Option<String>, RetrievalError>>;

/// One page to analyze. Dispatch is on the tag, never on runtime capability
/// probing.
pub enum PageDescriptor {
    /// Literal HTML text.
    Html(String),
    /// A byte stream yielding HTML (file handle, pipe, test double).
    Reader(Box<dyn Read>),
    /// A script driving the resolver; see [`PageScript`].
    Script(PageScript),
    /// A location resolved through the page source resolver.
    Location(String),
}

impl PageDescriptor {
    /// Short label for progress lines and skip reports.
    pub fn label(&self) -> String {
        match self {
            Self::Html(_) => "<inline html>".to_string(),
            Self::Reader(_) => "<reader>".to_string(),
            Self::Script(_) => "<script>".to_string(),
            Self::Location(location) => location.clone(),
        }
    }
}

impl fmt::Debug for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html(html) => f.debug_struct("Html").field("len", &html.len()).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
            Self::Script(_) => f.write_str("Script(..)"),
            Self::Location(location) => f.debug_tuple("Location").field(location).finish(),
        }
    }
}
