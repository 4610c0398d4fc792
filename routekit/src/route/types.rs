//! The [`Route`] value type.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Index};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::RouteError;
use super::escape::{escape_name, split_nodes, unescape_name};
use super::hash;
use super::node::{Node, Segment};
use super::{BACK_TOKEN, CURRENT_TOKEN, SEPARATOR};

/// An immutable, normalized sequence of [`Node`]s.
///
/// Routes are only built through [`Route::root`], [`Route::unit`],
/// [`Route::join`], [`Route::parse`], [`Route::from_names`] and the derived
/// operations ([`Route::concat`], [`Route::parent`], [`Route::child`]), all of
/// which return new values in canonical form.
///
/// Serializes as its formatted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Route {
    nodes: Vec<Node>,
}

impl Route {
    /// The empty route, `.`.
    pub const fn root() -> Self {
        Self { nodes: Vec::new() }
    }

    /// A route of a single step. `Current` yields the root.
    pub fn unit(node: Node) -> Self {
        match node {
            Node::Current => Self::root(),
            Node::Common(_) | Node::Back => Self { nodes: vec![node] },
        }
    }

    /// Normalize a sequence of steps into a route.
    ///
    /// Steps are folded left to right: named segments are appended, stay steps
    /// are dropped, and an up-step removes a preceding named segment or, if
    /// there is none, is appended itself.
    ///
    /// # Example
    ///
    /// ```
    /// use routekit::route::{Node, Route};
    ///
    /// let route = Route::join([
    ///     Node::common("first").unwrap(),
    ///     Node::Current,
    ///     Node::common("first_missed").unwrap(),
    ///     Node::Back,
    ///     Node::common("second").unwrap(),
    /// ]);
    /// assert_eq!(route.to_string(), "first/second");
    /// ```
    pub fn join<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let nodes = nodes.into_iter();
        let mut joined: Vec<Node> = Vec::with_capacity(nodes.size_hint().0);

        for node in nodes {
            match node {
                Node::Common(_) => joined.push(node),
                Node::Current => {}
                Node::Back => {
                    if matches!(joined.last(), Some(Node::Common(_))) {
                        let cancelled = joined.pop();
                        trace!(?cancelled, "Segment cancelled by up-step");
                    } else {
                        joined.push(Node::Back);
                    }
                }
            }
        }

        Self { nodes: joined }
    }

    /// Build a route of named segments from already-split names.
    ///
    /// Names are taken literally: `.`, `..` and empty names become named
    /// segments, not steps.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidSegment`] for the first name containing `/`.
    pub fn from_names<I, S>(names: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Node::common(name).map_err(|e| e.at_index(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes })
    }

    /// Parse route text. Never fails.
    ///
    /// Every piece between separators becomes a step: `.` and `..` are the
    /// reserved steps, anything else is an unescaped segment name. Empty
    /// pieces (from `""`, `a//b` or a trailing `/`) are empty-named segments.
    pub fn parse(text: &str) -> Self {
        Self::join(split_nodes(text).map(classify))
    }

    /// Serialize to the canonical text form. Same as `to_string()`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Concatenate two routes, cancelling segments at the seam.
    ///
    /// Trailing named segments of `self` cancel against leading up-steps of
    /// `other`, pair by pair. Concatenation with the root on either side
    /// returns the other operand.
    pub fn concat(&self, other: &Route) -> Route {
        if other.is_root() {
            return self.clone();
        }
        if self.is_root() {
            return other.clone();
        }

        let cancelled = self
            .nodes
            .iter()
            .rev()
            .zip(other.nodes.iter())
            .take_while(|(left, right)| left.is_common() && right.is_back())
            .count();

        if cancelled > 0 {
            trace!(cancelled, "Compressed route concatenation");
        }

        let kept = self.nodes.len() - cancelled;
        let mut nodes = Vec::with_capacity(kept + other.nodes.len() - cancelled);
        nodes.extend_from_slice(&self.nodes[..kept]);
        nodes.extend_from_slice(&other.nodes[cancelled..]);

        Route { nodes }
    }

    /// The route one level up.
    ///
    /// - root becomes `..`
    /// - a trailing named segment is removed
    /// - a route already ending in `..` gets another `..`
    pub fn parent(&self) -> Route {
        match self.nodes.split_last() {
            None => Route::unit(Node::Back),
            Some((Node::Common(_), rest)) => Route {
                nodes: rest.to_vec(),
            },
            // normalized routes never end in Current
            Some(_) => {
                let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
                nodes.extend_from_slice(&self.nodes);
                nodes.push(Node::Back);
                Route { nodes }
            }
        }
    }

    /// The route `levels` steps up, equal to calling [`parent`](Self::parent)
    /// `levels` times.
    ///
    /// Trailing named segments are dropped first; the remaining levels are
    /// appended as `..` steps.
    pub fn ancestor(&self, levels: usize) -> Route {
        let backs = self.nodes.iter().take_while(|node| node.is_back()).count();
        let named = self.nodes.len() - backs;

        if levels <= named {
            Route {
                nodes: self.nodes[..self.nodes.len() - levels].to_vec(),
            }
        } else {
            Route {
                nodes: vec![Node::Back; backs.saturating_add(levels - named)],
            }
        }
    }

    /// The route extended by one named segment.
    pub fn child(&self, segment: Segment) -> Route {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(Node::Common(segment));
        Route { nodes }
    }

    /// True for the empty route `.`.
    pub fn is_root(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the route never climbs above its reference point.
    pub fn is_local(&self) -> bool {
        !matches!(self.nodes.first(), Some(Node::Back))
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Same as [`Route::is_root`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// The normalized steps.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Order-sensitive hash of the steps, folded with [`hash::combine`].
    pub fn fingerprint(&self) -> u64 {
        hash::fold(&self.nodes)
    }
}

fn classify(raw: &str) -> Node {
    match raw {
        CURRENT_TOKEN => Node::Current,
        BACK_TOKEN => Node::Back,
        _ => Node::Common(Segment::from_split(unescape_name(raw).into_owned())),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return f.write_str(CURRENT_TOKEN);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            match node {
                Node::Common(segment) => f.write_str(&escape_name(segment.as_str()))?,
                Node::Back => f.write_str(BACK_TOKEN)?,
                Node::Current => f.write_str(CURRENT_TOKEN)?,
            }
        }
        Ok(())
    }
}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(text))
    }
}

impl From<&str> for Route {
    fn from(text: &str) -> Self {
        Route::parse(text)
    }
}

impl From<String> for Route {
    fn from(text: String) -> Self {
        Route::parse(&text)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.to_string()
    }
}

impl From<Node> for Route {
    fn from(node: Node) -> Self {
        Route::unit(node)
    }
}

impl FromIterator<Node> for Route {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Route::join(iter)
    }
}

impl Index<usize> for Route {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for Route {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl AsRef<[Node]> for Route {
    fn as_ref(&self) -> &[Node] {
        &self.nodes
    }
}

impl Add for Route {
    type Output = Route;

    fn add(self, rhs: Route) -> Route {
        if rhs.is_root() {
            return self;
        }
        if self.is_root() {
            return rhs;
        }
        self.concat(&rhs)
    }
}

impl Add<&Route> for &Route {
    type Output = Route;

    fn add(self, rhs: &Route) -> Route {
        self.concat(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(name: &str) -> Node {
        Node::common(name).unwrap()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_root_route() {
        let route = Route::root();
        assert_eq!(route, Route::parse("."));
        assert!(route.is_empty());
        assert_eq!(route.len(), 0);
        assert!(route.is_root());
        assert!(route.is_local());
    }

    #[test]
    fn test_unit_from_common_node() {
        let route = Route::unit(common("single_common_node"));
        assert_eq!(route, Route::parse("single_common_node"));
        assert_eq!(route.nodes(), &[common("single_common_node")]);
        assert!(!route.is_root());
        assert!(route.is_local());
    }

    #[test]
    fn test_unit_from_back_node() {
        let route = Route::from(Node::Back);
        assert_eq!(route, Route::parse(".."));
        assert_eq!(route.len(), 1);
        assert!(!route.is_root());
        assert!(!route.is_local());
    }

    #[test]
    fn test_unit_from_current_node_is_root() {
        let route = Route::unit(Node::Current);
        assert_eq!(route, Route::root());
        assert!(route.is_root());
    }

    #[test]
    fn test_local_route_joined() {
        let route = Route::join([
            common("first"),
            Node::Current,
            common("first_missed"),
            Node::Back,
            common("second"),
        ]);
        assert_eq!(route, Route::parse("first/second"));
        assert_eq!(route.nodes(), &[common("first"), common("second")]);
        assert!(route.is_local());
        assert_eq!(route.format(), "first/second");
    }

    #[test]
    fn test_outer_route_joined() {
        let route = Route::join([Node::Back, Node::Current, common("neighborhood")]);
        assert_eq!(route, Route::parse("../neighborhood"));
        assert_eq!(route.nodes(), &[Node::Back, common("neighborhood")]);
        assert!(!route.is_local());
    }

    #[test]
    fn test_root_route_joined() {
        let route = Route::join([Node::Current, common("forget"), Node::Back, Node::Current]);
        assert!(route.is_root());
        assert_eq!(route.to_string(), ".");
    }

    #[test]
    fn test_cancellation_law() {
        assert_eq!(Route::join([common("a"), Node::Back]), Route::root());
    }

    #[test]
    fn test_current_elimination() {
        assert_eq!(
            Route::join([Node::Current, common("a"), Node::Current]),
            Route::unit(common("a"))
        );
    }

    #[test]
    fn test_back_after_back_is_kept() {
        let route = Route::join([Node::Back, Node::Back, common("a"), Node::Back, Node::Back]);
        assert_eq!(route.nodes(), &[Node::Back, Node::Back, Node::Back]);
    }

    #[test]
    fn test_from_iterator_joins() {
        let route: Route = vec![common("a"), Node::Back, common("b")].into_iter().collect();
        assert_eq!(route, Route::parse("b"));
    }

    #[test]
    fn test_from_names() {
        let route = Route::from_names(["first", "..", "", "third"]).unwrap();
        assert_eq!(
            route.nodes(),
            &[common("first"), common(".."), common(""), common("third")]
        );
    }

    #[test]
    fn test_from_names_rejects_separator() {
        let err = Route::from_names(["first", "second/but third", "fourth"]).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidSegment {
                name: "second/but third".to_string(),
                index: 1,
                position: 6,
            }
        );
    }

    #[test]
    fn test_child() {
        let route = Route::parse("../a").child(Segment::new("b").unwrap());
        assert_eq!(route, Route::parse("../a/b"));
        assert_eq!(Route::root().child(Segment::new("..").unwrap()).to_string(), "\\..");
    }

    // ========================================================================
    // Parsing and formatting
    // ========================================================================

    #[test]
    fn test_parse_normalizes() {
        let route = Route::parse("./../first/doesn't matter/../second/any stuff/../.");
        assert_eq!(route, Route::parse("../first/second"));
        assert_eq!(route.to_string(), "../first/second");
    }

    #[test]
    fn test_format_root() {
        assert_eq!(Route::parse(".").to_string(), ".");
        assert_eq!(Route::parse("./.").to_string(), ".");
        assert_eq!(Route::root().format(), ".");
    }

    #[test]
    fn test_format_outer_route() {
        assert_eq!(Route::parse("../first/second").to_string(), "../first/second");
        assert_eq!(Route::parse("../../x").to_string(), "../../x");
    }

    #[test]
    fn test_parse_empty_text_is_empty_segment() {
        let route = Route::parse("");
        assert_eq!(route.nodes(), &[common("")]);
        assert!(!route.is_root());
        assert_eq!(route.to_string(), "");
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        assert_eq!(
            Route::parse("a//b").nodes(),
            &[common("a"), common(""), common("b")]
        );
        assert_eq!(Route::parse("/a").nodes(), &[common(""), common("a")]);
        assert_eq!(Route::parse("a/").nodes(), &[common("a"), common("")]);
    }

    #[test]
    fn test_escaped_back_is_common() {
        let literal = Route::unit(common(".."));
        assert_eq!(literal.to_string(), "\\..");
        assert_eq!(Route::parse("\\.."), literal);
        assert_ne!(Route::parse("\\.."), Route::parse(".."));
        assert_eq!(Route::parse(".."), Route::unit(Node::Back));
    }

    #[test]
    fn test_escaped_current_is_common() {
        let literal = Route::unit(common("."));
        assert_eq!(literal.to_string(), "\\.");
        assert_eq!(Route::parse("\\."), literal);
        assert!(!literal.is_root());
    }

    #[test]
    fn test_escaped_backslash() {
        let route = Route::from_names(["a\\b", "c"]).unwrap();
        assert_eq!(route.to_string(), "a\\\\b/c");
        assert_eq!(Route::parse("a\\\\b/c"), route);
    }

    #[test]
    fn test_backslash_before_separator() {
        let route = Route::parse("a\\/b");
        assert_eq!(route.nodes(), &[common("a\\"), common("b")]);
        assert_eq!(Route::parse(&route.to_string()), route);
    }

    #[test]
    fn test_escaped_name_cancels_like_any_segment() {
        assert_eq!(Route::parse("\\../.."), Route::root());
    }

    #[test]
    fn test_from_str() {
        let route: Route = "a/./b".parse().unwrap();
        assert_eq!(route, Route::parse("a/b"));
    }

    // ========================================================================
    // Concatenation
    // ========================================================================

    #[test]
    fn test_concat_without_compression() {
        let route = Route::parse("first/second") + Route::parse("third/fourth");
        assert_eq!(route, Route::parse("first/second/third/fourth"));
    }

    #[test]
    fn test_concat_with_compression() {
        let route = Route::parse("first/doesn't matter").concat(&Route::parse("../second"));
        assert_eq!(route, Route::parse("first/second"));
        assert_eq!(
            Route::parse("first/second").concat(&Route::parse("../third")),
            Route::parse("first/third")
        );
    }

    #[test]
    fn test_concat_to_root() {
        let route = &Route::parse("first/second") + &Route::parse("../..");
        assert_eq!(route, Route::root());
    }

    #[test]
    fn test_concat_escapes_above() {
        let route = Route::parse("a").concat(&Route::parse("../../b"));
        assert_eq!(route, Route::parse("../b"));
        assert!(!route.is_local());
    }

    #[test]
    fn test_concat_outer_left() {
        let route = Route::parse("../a").concat(&Route::parse("../../b"));
        assert_eq!(route.nodes(), &[Node::Back, Node::Back, common("b")]);
    }

    #[test]
    fn test_concat_identity() {
        let route = Route::parse("../a/b");
        assert_eq!(Route::root().concat(&route), route);
        assert_eq!(route.concat(&Route::root()), route);
        assert_eq!(Route::root() + route.clone(), route);
        assert_eq!(route.clone() + Route::root(), route);
    }

    // ========================================================================
    // Parent, locality, sequence view
    // ========================================================================

    #[test]
    fn test_parent() {
        assert_eq!(Route::root().parent(), Route::parse(".."));
        assert_eq!(Route::parse("a/b").parent(), Route::parse("a"));
        assert_eq!(Route::parse("..").parent(), Route::parse("../.."));
        assert_eq!(Route::parse("a").parent(), Route::root());
    }

    #[test]
    fn test_ancestor() {
        let route = Route::parse("../a/b");
        assert_eq!(route.ancestor(0), route);
        assert_eq!(route.ancestor(1), Route::parse("../a"));
        assert_eq!(route.ancestor(2), Route::parse(".."));
        assert_eq!(route.ancestor(4), Route::parse("../../.."));
        assert_eq!(Route::root().ancestor(2), Route::parse("../.."));
    }

    #[test]
    fn test_ancestor_many_levels() {
        let route = Route::parse("a/b").ancestor(100_000);
        assert_eq!(route.len(), 99_998);
        assert!(route.iter().all(Node::is_back));
    }

    #[test]
    fn test_locality_after_cancellation() {
        assert!(!Route::parse("../x").is_local());
        let route = Route::parse("x/../y");
        assert!(route.is_local());
        assert_eq!(route.nodes(), &[common("y")]);
    }

    #[test]
    fn test_sequence_view_is_restartable() {
        let route = Route::parse("../a/b");
        let first: Vec<&Node> = route.iter().collect();
        let second: Vec<&Node> = (&route).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(route[0], Node::Back);
        assert_eq!(route.get(2), Some(&common("b")));
        assert_eq!(route.get(3), None);
        assert_eq!(route.first(), Some(&Node::Back));
        assert_eq!(route.last(), Some(&common("b")));
    }

    // ========================================================================
    // Equality, hashing, serde
    // ========================================================================

    #[test]
    fn test_hash_is_order_sensitive() {
        let forward = Route::parse("first/second");
        let reversed = Route::parse("second/first");
        assert_ne!(forward.fingerprint(), reversed.fingerprint());
        assert_eq!(forward.fingerprint(), Route::parse("first/./second").fingerprint());
    }

    #[test]
    fn test_routes_in_hash_set() {
        use std::collections::HashSet;

        let set: HashSet<Route> = ["a/b", "a/./b", "a/c/../b", "b/a"]
            .into_iter()
            .map(Route::parse)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serde_as_string() {
        let route = Route::parse("../dir/\\..");
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#""../dir/\\..""#);

        let restored: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, route);
    }

    // ========================================================================
    // Property-based tests using proptest
    // ========================================================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_node() -> impl Strategy<Value = Node> {
            prop_oneof![
                4 => "[a-c.\\\\]{0,3}".prop_map(|name| Node::common(name).unwrap()),
                2 => Just(Node::Back),
                1 => Just(Node::Current),
            ]
        }

        fn arb_nodes() -> impl Strategy<Value = Vec<Node>> {
            prop::collection::vec(arb_node(), 0..10)
        }

        fn is_normalized(route: &Route) -> bool {
            let nodes = route.nodes();
            let backs = nodes.iter().take_while(|node| node.is_back()).count();
            nodes[backs..].iter().all(Node::is_common)
        }

        proptest! {
            #[test]
            fn test_join_is_normalized(nodes in arb_nodes()) {
                let route = Route::join(nodes);
                prop_assert!(is_normalized(&route), "not normalized: {:?}", route);
            }

            #[test]
            fn test_roundtrip_property(nodes in arb_nodes()) {
                let route = Route::join(nodes);
                let text = route.to_string();
                prop_assert_eq!(Route::parse(&text), route, "text: {}", text);
            }

            #[test]
            fn test_join_is_idempotent(nodes in arb_nodes()) {
                let route = Route::join(nodes);
                prop_assert_eq!(Route::join(route.iter().cloned()), route);
            }

            #[test]
            fn test_format_of_parse_is_stable(text in "[a-c./\\\\]{0,12}") {
                let once = Route::parse(&text).to_string();
                let twice = Route::parse(&once).to_string();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn test_concat_agrees_with_join(left in arb_nodes(), right in arb_nodes()) {
                let joined = Route::join(left.iter().cloned().chain(right.iter().cloned()));
                let concatenated = Route::join(left).concat(&Route::join(right));
                prop_assert_eq!(concatenated, joined);
            }

            #[test]
            fn test_concat_is_associative(
                a in arb_nodes(),
                b in arb_nodes(),
                c in arb_nodes()
            ) {
                let (a, b, c) = (Route::join(a), Route::join(b), Route::join(c));
                prop_assert_eq!(a.concat(&b).concat(&c), a.concat(&b.concat(&c)));
            }

            #[test]
            fn test_ancestor_is_repeated_parent(nodes in arb_nodes(), levels in 0usize..12) {
                let route = Route::join(nodes);
                let stepped = (0..levels).fold(route.clone(), |acc, _| acc.parent());
                prop_assert_eq!(route.ancestor(levels), stepped);
            }

            #[test]
            fn test_parent_is_concat_with_back(nodes in arb_nodes()) {
                let route = Route::join(nodes);
                prop_assert_eq!(route.parent(), route.concat(&Route::unit(Node::Back)));
            }
        }
    }
}
