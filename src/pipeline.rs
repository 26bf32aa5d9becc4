//! Bundling pipeline
//!
//! Drives one run through the stages in order:
//!
//! ```text
//! Idle -> Loading -> Resolving -> Succeeded -> Writing -> WriteOk
//!                         |                        `---> WriteFailed
//!                         `---> Failed
//! ```
//!
//! `Failed`, `WriteOk` and `WriteFailed` are terminal. A load failure also
//! ends in `Failed`.

use std::path::Path;

use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::document::Node;
use crate::error::Result;
use crate::loader::{DocumentLoader, load_spec};
use crate::resolver::{ResolveOptions, Resolver};
use crate::writer::write_bundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    Resolving,
    Succeeded,
    Failed,
    Writing,
    WriteOk,
    WriteFailed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineState::Failed | PipelineState::WriteOk | PipelineState::WriteFailed
        )
    }
}

pub struct Pipeline<L> {
    resolver: Resolver<L>,
    state: PipelineState,
}

impl<L: DocumentLoader> Pipeline<L> {
    pub fn new(loader: L, options: ResolveOptions) -> Self {
        Self {
            resolver: Resolver::new(loader, options),
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Load and resolve `spec_path`, stopping in `Succeeded` or `Failed`
    ///
    /// `spec_path` must be absolute.
    pub fn bundle(&mut self, spec_path: &Path) -> Result<Node> {
        self.transition(PipelineState::Idle);
        self.transition(PipelineState::Loading);

        let root = match load_spec(spec_path) {
            Ok(root) => root,
            Err(err) => {
                self.transition(PipelineState::Failed);
                return Err(err);
            }
        };

        self.transition(PipelineState::Resolving);
        info!(spec = %spec_path.display(), "resolving references");

        match aggregate(self.resolver.resolve(root, spec_path)) {
            Ok(tree) => {
                self.transition(PipelineState::Succeeded);
                Ok(tree)
            }
            Err(err) => {
                self.transition(PipelineState::Failed);
                Err(err)
            }
        }
    }

    /// Bundle `spec_path` and write the result to `output_path`
    ///
    /// Nothing is written unless every required reference resolved.
    pub fn run(&mut self, spec_path: &Path, output_path: &Path) -> Result<()> {
        let tree = self.bundle(spec_path)?;

        self.transition(PipelineState::Writing);
        match write_bundle(&tree, output_path) {
            Ok(()) => {
                self.transition(PipelineState::WriteOk);
                Ok(())
            }
            Err(err) => {
                self.transition(PipelineState::WriteFailed);
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(
            from = ?self.state,
            to = ?next,
            terminal = next.is_terminal(),
            "pipeline transition"
        );
        self.state = next;
    }
}
