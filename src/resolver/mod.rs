//! Reference resolution
//!
//! This module handles:
//! - Walking a document tree depth-first and rewriting every `$ref`
//! - Loading relative and remote documents through a per-run cache
//! - Circular reference detection
//! - Recording a [`ReferenceDescriptor`] for every reference encountered
//!
//! ## Circular references
//!
//! While walking, the resolver keeps a stack of every node currently being
//! expanded, identified by the document it came from and its pointer inside
//! that document, together with where it lands in the output. A reference
//! whose target is on that stack is circular. With
//! [`ResolveOptions::resolve_circulars`] set it is rewritten to a local
//! reference to the target's output location:
//!
//! ```text
//! Pet:                              Pet:
//!   properties:                       properties:
//!     parent:            ──►            parent:
//!       $ref: '#/Pet'                     $ref: '#/Pet'
//!
//! Owner:                            Owner:
//!   $ref: 'pet.yaml#/Pet'             properties:
//!                                       parent:
//!                                         $ref: '#/Owner'
//! ```

pub mod reference;


use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::cache::DocumentCache;
use crate::document::{JsonPointer, Node, Reference};
use crate::error::Result;
use crate::error::resolve::invalid_location;
use crate::loader::{DocumentLoader, load_document};

pub use reference::{RefKind, RefStatus, ReferenceDescriptor};

/// Controls which references are resolved and how cycles are handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Reference kinds to resolve; others are left as written
    pub filter: Vec<RefKind>,
    /// Rewrite circular references into local self-references
    pub resolve_circulars: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            filter: vec![RefKind::Local, RefKind::Relative, RefKind::Remote],
            resolve_circulars: false,
        }
    }
}

/// Output of one resolution run
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The tree with every resolvable reference replaced
    pub resolved: Node,
    /// Every reference encountered, in walk order
    pub refs: Vec<ReferenceDescriptor>,
}

impl Resolution {
    #[cfg(test)]
    pub fn missing(&self) -> impl Iterator<Item = &ReferenceDescriptor> {
        self.refs.iter().filter(|r| r.is_missing())
    }
}

/// A node currently being expanded
struct Frame {
    document: Url,
    source: JsonPointer,
    output: JsonPointer,
}

/// Mutable state of a single walk
#[derive(Default)]
struct Walk {
    frames: Vec<Frame>,
    refs: Vec<ReferenceDescriptor>,
}

impl Walk {
    fn ancestor(&self, document: &Url, source: &JsonPointer) -> Option<&Frame> {
        self.frames
            .iter()
            .find(|frame| &frame.document == document && &frame.source == source)
    }

    fn record(
        &mut self,
        output: &JsonPointer,
        reference: &Reference,
        kind: RefKind,
        status: RefStatus,
        error: Option<String>,
    ) {
        self.refs.push(ReferenceDescriptor {
            location: output.to_fragment(),
            target: reference.target.clone(),
            kind,
            status,
            error,
        });
    }
}

/// Reference resolver
///
/// Owns the loader used for relative and remote documents and the cache of
/// documents loaded during the current run.
pub struct Resolver<L> {
    loader: L,
    options: ResolveOptions,
    cache: DocumentCache,
}

impl<L: DocumentLoader> Resolver<L> {
    pub fn new(loader: L, options: ResolveOptions) -> Self {
        Self {
            loader,
            options,
            cache: DocumentCache::new(),
        }
    }

    /// Resolve every reference in `root`
    ///
    /// `base` is the absolute path of the document `root` was read from;
    /// relative targets are resolved against it. Per-reference failures are
    /// recorded as missing descriptors and never abort the walk.
    ///
    /// # Errors
    ///
    /// Returns an error only when `base` cannot be used as a location.
    pub fn resolve(&mut self, root: Node, base: &Path) -> Result<Resolution> {
        self.cache.clear();

        let base_url = base_url(base)?;
        self.cache.insert(base_url.clone(), Ok(root.clone()));

        let mut state = Walk::default();
        let resolved = self.walk(
            root,
            &base_url,
            JsonPointer::root(),
            JsonPointer::root(),
            &mut state,
        );

        debug!(
            references = state.refs.len(),
            documents = self.cache.len(),
            "resolution walk finished"
        );

        Ok(Resolution {
            resolved,
            refs: state.refs,
        })
    }

    fn walk(
        &mut self,
        node: Node,
        document: &Url,
        source: JsonPointer,
        output: JsonPointer,
        state: &mut Walk,
    ) -> Node {
        state.frames.push(Frame {
            document: document.clone(),
            source: source.clone(),
            output: output.clone(),
        });

        let node = match node {
            Node::Scalar(_) => node,
            Node::Sequence(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let token = index.to_string();
                    resolved.push(self.walk(
                        item,
                        document,
                        source.child(token.clone()),
                        output.child(token),
                        state,
                    ));
                }
                Node::Sequence(resolved)
            }
            Node::Mapping(entries) => {
                let mut resolved = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let value = self.walk(
                        value,
                        document,
                        source.child(key.clone()),
                        output.child(key.clone()),
                        state,
                    );
                    resolved.push((key, value));
                }
                Node::Mapping(resolved)
            }
            Node::Reference(reference) => self.resolve_reference(reference, document, &output, state),
        };

        state.frames.pop();
        node
    }

    fn resolve_reference(
        &mut self,
        reference: Reference,
        document: &Url,
        output: &JsonPointer,
        state: &mut Walk,
    ) -> Node {
        let Some(target) = reference.target.clone() else {
            state.record(
                output,
                &reference,
                RefKind::Invalid,
                RefStatus::Skipped,
                Some("$ref value is not a string".to_string()),
            );
            return Node::Reference(reference);
        };

        let kind = RefKind::classify(&target);
        if !self.options.filter.contains(&kind) {
            state.record(output, &reference, kind, RefStatus::Skipped, None);
            return Node::Reference(reference);
        }

        let (target_document, pointer) = match split_target(document, &target) {
            Ok(split) => split,
            Err(detail) => {
                warn!(location = %output.to_fragment(), reference = %target, "{detail}");
                state.record(output, &reference, kind, RefStatus::Missing, Some(detail));
                return Node::Reference(reference);
            }
        };

        if let Some(ancestor) = state.ancestor(&target_document, &pointer) {
            let self_reference = ancestor.output.to_fragment();
            debug!(location = %output.to_fragment(), reference = %target, to = %self_reference, "circular reference");
            state.record(output, &reference, kind, RefStatus::Circular, None);

            if self.options.resolve_circulars {
                return Node::Reference(Reference::local(self_reference));
            }
            return Node::Reference(reference);
        }

        match self.lookup(&target_document, &pointer) {
            Ok(content) => {
                debug!(location = %output.to_fragment(), reference = %target, %kind, "resolved reference");
                state.record(output, &reference, kind, RefStatus::Resolved, None);
                self.walk(content, &target_document, pointer, output.clone(), state)
            }
            Err(detail) => {
                warn!(location = %output.to_fragment(), reference = %target, "{detail}");
                state.record(output, &reference, kind, RefStatus::Missing, Some(detail));
                Node::Reference(reference)
            }
        }
    }

    /// Load `document` through the cache and evaluate `pointer` in it
    fn lookup(
        &mut self,
        document: &Url,
        pointer: &JsonPointer,
    ) -> std::result::Result<Node, String> {
        let loader = &self.loader;
        let content = self
            .cache
            .get_or_load(document, || load_document(loader, document))
            .map_err(ToString::to_string)?;

        content.get(pointer).cloned().ok_or_else(|| {
            crate::error::document::pointer_not_found(pointer.to_string(), document.as_str())
                .to_string()
        })
    }
}

/// Convert the root document's path into the URL relative targets join onto
fn base_url(base: &Path) -> Result<Url> {
    let location = base.display().to_string();
    if !base.is_absolute() {
        return Err(invalid_location(location, "base location must be absolute"));
    }

    Url::from_file_path(base)
        .map_err(|()| invalid_location(location, "cannot be expressed as a file URL"))
}

/// Join `target` onto the containing document and split off its fragment
fn split_target(document: &Url, target: &str) -> std::result::Result<(Url, JsonPointer), String> {
    let mut url = document
        .join(target)
        .map_err(|e| format!("Invalid reference target '{target}': {e}"))?;

    let pointer = JsonPointer::from_fragment(url.fragment()).map_err(|e| e.to_string())?;
    url.set_fragment(None);

    Ok((url, pointer))
}
