use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use core::fmt;

use crate::error::KeywordError;

/// Action attached to a node, invoked when a command resolves to it.
/// Receives the query flag and the raw parameter text; interpreting the
/// parameters is entirely the handler's business.
pub type Handler = Box<dyn Fn(bool, &str)>;

/// One level of an SCPI-style command hierarchy.
///
/// A node carries both spellings of its keyword (`SENSor` and the derived
/// short form `SENS`), an optional flag allowing the level to be left out
/// of a command path, the sub-levels reachable through `:`, and an optional
/// handler fired when an input resolves to this node.
///
/// Trees are built once, bottom-up, and never change afterwards. Matching
/// borrows the tree and the input line and allocates nothing.
pub struct Node {
    /// Full mixed-case spelling, e.g. `SENSor`.
    keyword: &'static str,
    /// Abbreviated spelling, the leading uppercase run of `keyword`.
    keyword_short: &'static str,
    /// Whether this level may be omitted from a command path.
    optional: bool,
    /// Sub-levels, tried in declaration order.
    children: Vec<Node>,
    /// Action fired when a command ends on this node.
    handler: Option<Handler>,
}

/// Outcome of resolving one command against a tree.
/// - `leaf`: The node the command ended on.
/// - `query`: Whether the matched unit carried a trailing `?`.
/// - `parameters`: Verbatim text after the space that ended the unit.
#[derive(Clone, Copy, Debug)]
pub struct MatchResult<'t, 'i> {
    pub leaf: &'t Node,
    pub query: bool,
    pub parameters: &'i str,
}

impl Node {
    /// Creates a node for the given keyword.
    ///
    /// The short form is derived here once: it is the leading run of
    /// uppercase ASCII letters, so `VOLTage` abbreviates to `VOLT` and an
    /// all-uppercase keyword to itself.
    ///
    /// # Panics
    /// Panics if the keyword is empty or does not start with an uppercase
    /// ASCII letter. Command vocabularies are fixed at build time, so a
    /// bad keyword is a programming error; use [`Node::try_new`] for a
    /// fallible variant.
    ///
    /// # Example
    /// ```
    /// use scpi_core::Node;
    ///
    /// let node = Node::new("VOLTage");
    /// assert_eq!(node.short_form(), "VOLT");
    /// ```
    pub fn new(keyword: &'static str) -> Self {
        match Self::try_new(keyword) {
            Ok(node) => node,
            Err(err) => panic!("invalid command keyword {:?}: {}", keyword, err),
        }
    }

    /// Fallible counterpart of [`Node::new`].
    pub fn try_new(keyword: &'static str) -> Result<Self, KeywordError> {
        if keyword.is_empty() {
            return Err(KeywordError::Empty);
        }
        if !keyword.as_bytes()[0].is_ascii_uppercase() {
            return Err(KeywordError::NoLeadingUppercase);
        }
        Ok(Self {
            keyword,
            keyword_short: leading_uppercase(keyword),
            optional: false,
            children: Vec::new(),
            handler: None,
        })
    }

    /// Marks this level as optional: when its keyword does not match, the
    /// input falls through to the children unchanged.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Appends a sub-level. Declaration order is match order.
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Attaches the action fired when a command resolves to this node.
    pub fn handler(mut self, handler: impl Fn(bool, &str) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Returns the full keyword spelling.
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// Returns the abbreviated spelling.
    pub fn short_form(&self) -> &'static str {
        self.keyword_short
    }

    /// Returns whether this level may be omitted from a command path.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns whether an action is attached to this node.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Returns the sub-levels in declaration order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Splits the input on `;` and resolves every piece against this tree,
    /// firing the handlers of resolved commands in textual order.
    ///
    /// Pieces that resolve to nothing are skipped silently; resolution has
    /// no error channel. Handlers are not isolated: one that panics aborts
    /// the remaining commands of the line.
    ///
    /// # Example
    /// ```
    /// use scpi_core::Node;
    ///
    /// let tree = Node::new("SENSor")
    ///     .child(Node::new("VOLTage").handler(|query, parameters| {
    ///         if query {
    ///             println!("voltage requested");
    ///         } else {
    ///             println!("voltage set to {}", parameters);
    ///         }
    ///     }));
    ///
    /// tree.parse("SENS:VOLT 100mV;SENS:VOLT?");
    /// ```
    pub fn parse(&self, input: &str) {
        for command in input.split(';') {
            self.match_segment(command);
        }
    }

    /// Resolves one colon-delimited command against this subtree.
    ///
    /// A leading `:` is ignored. The first unit of the input (the text up
    /// to the first `:` or space) is compared case-insensitively against
    /// the short and the full keyword; a trailing `?` on the unit marks a
    /// query and takes no part in the comparison.
    ///
    /// On a keyword match:
    /// - If the rest of the input starts with `:`, resolution continues
    ///   in the children and this level's query flag is dropped.
    /// - Otherwise this node is the leaf. The text after the separating
    ///   space becomes the parameters, the handler (if any) fires, and
    ///   the result is returned.
    ///
    /// On a keyword mismatch, an optional node hands the same input to
    /// its children; a required node yields `None`.
    pub fn match_segment<'t, 'i>(&'t self, input: &'i str) -> Option<MatchResult<'t, 'i>> {
        if input.is_empty() {
            return None;
        }
        let input = input.strip_prefix(':').unwrap_or(input);

        let unit_end = input.find([':', ' ']).unwrap_or(input.len());
        let unit = &input[..unit_end];
        let (token, query) = match unit.strip_suffix('?') {
            Some(stripped) => (stripped, true),
            None => (unit, false),
        };

        if !self.keyword_matches(token) {
            return if self.optional {
                self.match_children(input)
            } else {
                None
            };
        }

        let rest = &input[unit_end..];
        let mut parameters = "";
        if !rest.is_empty() {
            if rest.starts_with(':') {
                return self.match_children(rest);
            }
            // rest begins with the space that ended the unit
            parameters = &rest[1..];
        }

        if let Some(handler) = &self.handler {
            handler(query, parameters);
        }
        Some(MatchResult {
            leaf: self,
            query,
            parameters,
        })
    }

    /// Hands the input to each sub-level in declaration order and returns
    /// the first resolution. Later siblings are not consulted once one
    /// accepts.
    pub fn match_children<'t, 'i>(&'t self, input: &'i str) -> Option<MatchResult<'t, 'i>> {
        self.children
            .iter()
            .find_map(|child| child.match_segment(input))
    }

    /// Walks the tree depth-first and hands every node's full path to the
    /// visitor, levels joined with `:` and optional levels rendered in
    /// brackets, e.g. `SENSor:[POWer]:VOLTage`.
    pub fn for_each_path(&self, mut visit: impl FnMut(&str, &Node)) {
        let mut path = String::new();
        self.walk_paths(&mut path, &mut visit);
    }

    /// Collects the output of [`Node::for_each_path`].
    pub fn paths(&self) -> Vec<String> {
        let mut collected = Vec::new();
        self.for_each_path(|path, _| collected.push(String::from(path)));
        collected
    }

    fn walk_paths(&self, path: &mut String, visit: &mut impl FnMut(&str, &Node)) {
        let parent_len = path.len();
        if !path.is_empty() {
            path.push(':');
        }
        if self.optional {
            path.push('[');
            path.push_str(self.keyword);
            path.push(']');
        } else {
            path.push_str(self.keyword);
        }
        visit(path.as_str(), self);
        for child in &self.children {
            child.walk_paths(path, visit);
        }
        path.truncate(parent_len);
    }

    /// Case-insensitive comparison against either spelling. Both forms are
    /// matched whole; there is no prefix matching in between.
    fn keyword_matches(&self, token: &str) -> bool {
        token.eq_ignore_ascii_case(self.keyword_short) || token.eq_ignore_ascii_case(self.keyword)
    }
}

/// Returns the leading run of uppercase ASCII letters of `keyword`.
fn leading_uppercase(keyword: &str) -> &str {
    let end = keyword
        .bytes()
        .position(|b| !b.is_ascii_uppercase())
        .unwrap_or(keyword.len());
    &keyword[..end]
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("keyword", &self.keyword)
            .field("keyword_short", &self.keyword_short)
            .field("optional", &self.optional)
            .field("handler", &self.handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl fmt::Display for MatchResult<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.leaf.keyword)?;
        if self.query {
            f.write_str(" (query)")?;
        } else if !self.parameters.is_empty() {
            write!(f, "({})", self.parameters)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Node {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.keyword);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MatchResult<'_, '_> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=str} (query: {=bool}, parameters: {=str})",
            self.leaf.keyword,
            self.query,
            self.parameters
        );
    }
}

// ==================== TESTS =======================
