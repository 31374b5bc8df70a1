use ldp_fusion_model::vocab::trellis;
use ldp_fusion_model::{GraphNameRef, IdentifierMapper, NamedNode, Partition};
use rustc_hash::FxHashMap;

/// Configuration of the [`ResourceManager`](crate::manager::ResourceManager).
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// The base URL of requests that do not carry their own.
    pub base_url: String,
    /// Whether updates and deletions of existing resources must carry an `If-Match` precondition.
    pub precondition_required: bool,
    /// Maps values of the `ext` parameter to the partition they select.
    pub extensions: FxHashMap<String, NamedNode>,
    pub mapper: IdentifierMapper,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_owned(),
            precondition_required: false,
            extensions: parse_extension_map(&format!(
                "acl={}",
                trellis::PREFER_ACCESS_CONTROL.as_str()
            )),
            mapper: IdentifierMapper::default(),
        }
    }
}

impl ManagerConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_precondition_required(mut self, precondition_required: bool) -> Self {
        self.precondition_required = precondition_required;
        self
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: FxHashMap<String, NamedNode>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Returns the partition that an `ext` value selects, if any.
    pub fn extension_partition(&self, ext: &str) -> Option<Partition> {
        let graph_name = self.extensions.get(ext)?;
        Partition::from_graph_name(GraphNameRef::NamedNode(graph_name.as_ref()))
    }
}

/// Parses a comma-separated list of `name=IRI` pairs into an extension map.
///
/// Entries without a name, without a value, or with an invalid IRI are skipped.
///
/// ```
/// use ldp_fusion::config::parse_extension_map;
///
/// let extensions = parse_extension_map("ex = https://example.com/ , =bar, baz");
/// assert_eq!(extensions.len(), 1);
/// assert_eq!(extensions["ex"].as_str(), "https://example.com/");
/// ```
pub fn parse_extension_map(value: &str) -> FxHashMap<String, NamedNode> {
    value
        .split(',')
        .filter_map(|entry| {
            let (name, iri) = entry.split_once('=')?;
            let (name, iri) = (name.trim(), iri.trim());
            if name.is_empty() || iri.is_empty() {
                return None;
            }
            Some((name.to_owned(), NamedNode::new(iri).ok()?))
        })
        .collect()
}

/// Computes the partitions of a representation from the `include` and `omit` preferences of a
/// request.
///
/// Without preferences, the user-managed, containment, and membership partitions are returned.
/// Preferences that do not name a partition are ignored.
pub fn triple_preferences(include: &[NamedNode], omit: &[NamedNode]) -> Vec<Partition> {
    let partition = |iri: &NamedNode| Partition::from_graph_name(GraphNameRef::NamedNode(iri.as_ref()));

    let mut partitions = vec![
        Partition::UserManaged,
        Partition::Containment,
        Partition::Membership,
    ];
    for partition in include.iter().filter_map(partition) {
        if !partitions.contains(&partition) {
            partitions.push(partition);
        }
    }
    let omitted = omit.iter().filter_map(partition).collect::<Vec<_>>();
    partitions.retain(|partition| !omitted.contains(partition));
    partitions
}
