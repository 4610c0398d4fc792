//! Navigation steps that make up a [`Route`](super::Route).

use std::fmt;

use super::error::RouteError;
use super::SEPARATOR;

/// A validated segment name.
///
/// Any string is accepted except one containing the separator `/`. Names
/// that look like the reserved tokens (`.`, `..`) or are empty are valid;
/// they are escaped when a route is formatted.
///
/// # Example
///
/// ```
/// use routekit::route::Segment;
///
/// let segment = Segment::new("file.ext").unwrap();
/// assert_eq!(segment.as_str(), "file.ext");
///
/// assert!(Segment::new("dir/file.ext").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Create a segment, rejecting names that contain `/`.
    pub fn new(name: impl Into<String>) -> Result<Self, RouteError> {
        let name = name.into();
        match name.find(SEPARATOR) {
            Some(position) => Err(RouteError::InvalidSegment {
                name,
                index: 0,
                position,
            }),
            None => Ok(Self(name)),
        }
    }

    /// Wrap a name already known to be free of separators.
    pub(crate) fn from_split(name: String) -> Self {
        debug_assert!(!name.contains(SEPARATOR));
        Self(name)
    }

    /// The literal (unescaped) name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the segment, returning the literal name.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Segment {
    type Error = RouteError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Segment::new(name)
    }
}

impl TryFrom<&str> for Segment {
    type Error = RouteError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Segment::new(name)
    }
}

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Descend into a named child.
    Common(Segment),
    /// Go up one level (`..`).
    Back,
    /// Stay at this level (`.`). Never stored in a normalized route.
    Current,
}

impl Node {
    /// Create a `Common` node from a name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidSegment`] if the name contains `/`.
    pub fn common(name: impl Into<String>) -> Result<Self, RouteError> {
        Segment::new(name).map(Node::Common)
    }

    /// Check if this is a named segment.
    pub fn is_common(&self) -> bool {
        matches!(self, Node::Common(_))
    }

    /// Check if this is an up-step.
    pub fn is_back(&self) -> bool {
        matches!(self, Node::Back)
    }

    /// Check if this is a stay step.
    pub fn is_current(&self) -> bool {
        matches!(self, Node::Current)
    }

    /// The segment name for `Common` nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Common(segment) => Some(segment.as_str()),
            Node::Back | Node::Current => None,
        }
    }
}

impl From<Segment> for Node {
    fn from(segment: Segment) -> Self {
        Node::Common(segment)
    }
}
