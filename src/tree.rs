use num_traits::Float;

/// A node in the merge tree. Either an original leaf (one member, no
/// children) or an internal node recording the merge of its two children.
#[derive(Debug, Clone)]
pub struct MergeNode<T> {
    /// Sorted leaf labels contained in this cluster.
    pub members: Vec<String>,
    /// Ids of the left and right children, in the order they were chosen at
    /// merge time. `None` for leaves.
    pub children: Option<[usize; 2]>,
    /// The distance between the children at the time they were merged.
    /// Zero for leaves.
    pub height: T,
}

impl<T: Float> MergeNode<T> {
    pub(crate) fn leaf(label: String) -> Self {
        MergeNode {
            members: vec![label],
            children: None,
            height: T::zero(),
        }
    }

    /// The canonical rendering of this cluster used for tie-breaking: its
    /// sorted member labels joined with commas.
    pub(crate) fn canonical(&self) -> String {
        self.members.join(",")
    }
}

/// A rooted full binary tree recording the clustering order produced by the
/// UPGMA engine.
///
/// Nodes live in an arena indexed by id. Leaves occupy ids `0..n_leaves` in
/// input order; internal nodes are appended in merge order, so the k-th merge
/// (1-based) is node `n_leaves + k - 1` and the root is the last node.
#[derive(Debug, Clone)]
pub struct MergeTree<T> {
    pub(crate) nodes: Vec<MergeNode<T>>,
    pub(crate) n_leaves: usize,
}

impl<T: Float> MergeTree<T> {
    pub(crate) fn new(nodes: Vec<MergeNode<T>>, n_leaves: usize) -> Self {
        MergeTree { nodes, n_leaves }
    }

    /// The id of the root node.
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The node with the given id.
    pub fn node(&self, id: usize) -> &MergeNode<T> {
        &self.nodes[id]
    }

    /// The number of original leaves. Always one more than [`n_merges`](Self::n_merges).
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// The number of merges performed, equal to the number of internal nodes.
    pub fn n_merges(&self) -> usize {
        self.nodes.len() - self.n_leaves
    }

    /// The recorded merge heights, in merge order.
    pub fn merge_heights(&self) -> Vec<T> {
        self.nodes[self.n_leaves..]
            .iter()
            .map(|node| node.height)
            .collect()
    }

    /// Renders the clustering order in bracket notation: leaves as their
    /// label, internal nodes as `(left,right)` in the child order chosen by
    /// the engine.
    pub fn to_bracket(&self) -> String {
        self.bracket_of(self.root())
    }

    fn bracket_of(&self, id: usize) -> String {
        let node = &self.nodes[id];
        match node.children {
            Some([left, right]) => {
                format!("({},{})", self.bracket_of(left), self.bracket_of(right))
            }
            None => node.members[0].clone(),
        }
    }

    /// Renders the tree as a DOT graph description:
    ///
    /// ```text
    /// graph tree {
    ///     <src> -- <dst>
    ///     ...
    /// }
    /// ```
    ///
    /// Each internal node contributes two edge statements, left child first,
    /// and internal nodes appear in merge order. A leaf-only tree yields an
    /// empty block.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("graph tree {\n");
        for id in self.n_leaves..self.nodes.len() {
            // Internal nodes always have children.
            if let Some([left, right]) = self.nodes[id].children {
                out.push_str(&format!("    {} -- {}\n", self.node_name(left), self.node_name(id)));
                out.push_str(&format!("    {} -- {}\n", self.node_name(right), self.node_name(id)));
            }
        }
        out.push_str("}\n");
        out
    }

    /// The synthetic DOT name of a node: `<label>0` for a leaf, the
    /// concatenated sorted member labels followed by the 1-based merge index
    /// for an internal node.
    pub fn node_name(&self, id: usize) -> String {
        let node = &self.nodes[id];
        if node.children.is_none() {
            format!("{}0", node.members[0])
        } else {
            format!("{}{}", node.members.concat(), id - self.n_leaves + 1)
        }
    }
}
