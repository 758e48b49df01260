//! Layout through the Graphviz `dot` executable.
//!
//! The graph is serialized as DOT, piped into `<program> -Tplain` and the node records of the
//! reply are mapped back onto the input nodes. Whenever the tool is missing, fails, times out or
//! does not place every node, the layered engine's result is returned instead, unless
//! `strict_external` asks for the failure to be reported.

pub mod dot;
pub mod plain;
pub mod runner;

pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};

use crate::engine::LayoutEngine;
use crate::error::{ExternalError, Result};
use crate::layered::LayeredLayout;
use crate::model::NodePosition;
use crate::options::LayoutOptions;
use scratchrobin_graph::Graph;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphvizLayout<R = SystemRunner> {
    runner: R,
}

impl GraphvizLayout<SystemRunner> {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for GraphvizLayout<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> GraphvizLayout<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs the external tool without any fallback.
    pub fn try_layout(
        &self,
        graph: &Graph,
        options: &LayoutOptions,
    ) -> std::result::Result<Vec<NodePosition>, ExternalError> {
        let program = options.external_program.as_str();
        if !self.runner.is_available(program) {
            return Err(ExternalError::Unavailable {
                program: program.to_string(),
            });
        }

        let input = dot::to_dot(graph, options);
        let timeout = options.external_timeout_ms.map(Duration::from_millis);
        let output = self.runner.run(program, &["-Tplain"], &input, timeout)?;
        if !output.success {
            return Err(ExternalError::ExitStatus {
                program: program.to_string(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let mut placed = plain::parse(&output.stdout, graph, options);
        if placed.len() != graph.node_count() {
            return Err(ExternalError::Output {
                program: program.to_string(),
                reason: format!(
                    "placed {} of {} nodes",
                    placed.len(),
                    graph.node_count()
                ),
            });
        }

        let mut positions = Vec::with_capacity(graph.node_count());
        for ix in 0..graph.node_count() {
            match placed.swap_remove(&ix) {
                Some(pos) => positions.push(pos),
                None => {
                    return Err(ExternalError::Output {
                        program: program.to_string(),
                        reason: format!("no position for node `{}`", graph.nodes()[ix].id),
                    });
                }
            }
        }
        Ok(positions)
    }
}

impl<R: ProcessRunner> LayoutEngine for GraphvizLayout<R> {
    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn layout(&self, graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>> {
        let options = options.sanitized();
        let _span = tracing::debug_span!(
            "graphviz_layout",
            nodes = graph.node_count(),
            program = %options.external_program
        )
        .entered();

        if graph.is_empty() {
            return Ok(Vec::new());
        }

        match self.try_layout(graph, &options) {
            Ok(positions) => Ok(positions),
            Err(err) if options.strict_external => Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "external layout failed; using layered layout");
                LayeredLayout.layout(graph, &options)
            }
        }
    }
}
