//! Arena XML tree built in a single pass over the document.
//!
//! Tags and attribute keys are stored with their namespace prefix
//! stripped; nodes keep parent/child links so later passes can walk
//! ancestors and count descendants without re-parsing.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Index of a node inside an [`XmlTree`]. Nodes are stored in document
/// order, so iterating ids 0..len visits the tree preorder.
pub type NodeId = usize;

/// One element node.
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Local tag name, namespace prefix stripped (`ui:LogMessage` → `LogMessage`).
    pub tag: String,
    /// Attributes in document order, keys prefix-stripped.
    pub attrs: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl XmlNode {
    /// Look up an attribute by (prefix-stripped) key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the node carries a non-empty `DisplayName` attribute.
    pub fn has_display_name(&self) -> bool {
        self.attr("DisplayName").is_some_and(|v| !v.is_empty())
    }
}

/// An XML document flattened into an arena.
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    nodes: Vec<XmlNode>,
    roots: Vec<NodeId>,
}

impl XmlTree {
    /// Parse a full XML document. Returns an error message on malformed
    /// input; the caller wraps it with the file path.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut tree = XmlTree::default();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let id = tree.push_node(e, stack.last().copied())?;
                    stack.push(id);
                }
                Ok(Event::Empty(ref e)) => {
                    tree.push_node(e, stack.last().copied())?;
                }
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        return Err("unexpected closing tag".to_string());
                    }
                }
                Ok(Event::Eof) => {
                    if !stack.is_empty() {
                        return Err("unexpected end of file inside an open element".to_string());
                    }
                    break;
                }
                // Text, CDATA, comments, PIs, declarations carry no structure.
                Ok(_) => {}
                Err(e) => return Err(e.to_string()),
            }
        }

        Ok(tree)
    }

    fn push_node(
        &mut self,
        start: &quick_xml::events::BytesStart<'_>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, String> {
        let tag = local_str(start.local_name().as_ref())?;

        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = local_str(attr.key.local_name().as_ref())?;
            let value = attr
                .unescape_value()
                .map_err(|e| e.to_string())?
                .into_owned();
            attrs.push((key, value));
        }

        let id = self.nodes.len();
        self.nodes.push(XmlNode {
            tag,
            attrs,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Iterate all nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &XmlNode)> {
        self.nodes.iter().enumerate()
    }

    /// Iterate ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[id].parent,
        }
    }

    /// All descendant ids of a node (excluding the node itself), preorder.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut work: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(n) = work.pop() {
            out.push(n);
            work.extend(self.nodes[n].children.iter().rev().copied());
        }
        out
    }

    /// Number of descendant nodes (excluding the node itself).
    pub fn descendant_count(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut work: Vec<NodeId> = self.nodes[id].children.clone();
        while let Some(n) = work.pop() {
            count += 1;
            work.extend(self.nodes[n].children.iter().copied());
        }
        count
    }
}

/// Ancestor iterator, nearest first.
pub struct Ancestors<'a> {
    tree: &'a XmlTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.nodes[id].parent;
        Some(id)
    }
}

fn local_str(bytes: &[u8]) -> Result<String, String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_stripping_and_links() {
        let tree = XmlTree::parse(
            r#"<a:Root xmlns:a="urn:a"><a:Child Name="c1"/><Other k="v"><Inner/></Other></a:Root>"#,
        )
        .unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.node(0).tag, "Root");
        assert_eq!(tree.node(1).tag, "Child");
        assert_eq!(tree.node(1).attr("Name"), Some("c1"));
        assert_eq!(tree.node(1).parent, Some(0));
        assert_eq!(tree.node(0).children, vec![1, 2]);
        assert_eq!(tree.descendant_count(0), 3);
        assert_eq!(tree.descendant_count(2), 1);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = XmlTree::parse("<A><B><C/></B></A>").unwrap();
        let chain: Vec<&str> = tree.ancestors(2).map(|id| tree.node(id).tag.as_str()).collect();
        assert_eq!(chain, vec!["B", "A"]);
    }

    #[test]
    fn test_malformed_is_an_error() {
        assert!(XmlTree::parse("<A><B></A>").is_err());
        assert!(XmlTree::parse("<A>").is_err());
    }

    #[test]
    fn test_attribute_unescaping() {
        let tree = XmlTree::parse(r#"<A Cond="[a &gt; 1]"/>"#).unwrap();
        assert_eq!(tree.node(0).attr("Cond"), Some("[a > 1]"));
    }
}
