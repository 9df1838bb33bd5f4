//! Simulation engine
//!
//! Drives a price stream through the propagation engine and writes each
//! update's echo and resulting valuations to a sink, strictly in order.
//! Updates are applied one at a time; batching on the source side is
//! invisible in the output.

use crate::core::Hierarchy;
use crate::hot_path::{Propagation, PropagationEngine, Valuation};
use crate::infrastructure::config::SimulationConfig;
use crate::infrastructure::metrics::{MetricsCollector, MetricsSnapshot};
use crate::io::{self, CsvSink, PriceUpdate, ValuationSink};
use crate::Result;
use std::fs;

/// Counters for a finished run
pub type RunSummary = MetricsSnapshot;

/// Single-threaded simulation over one hierarchy
pub struct Simulator {
    engine: PropagationEngine,
    metrics: MetricsCollector,
    /// Reused per update
    scratch: Vec<Valuation>,
}

impl Simulator {
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self {
            engine: PropagationEngine::new(hierarchy),
            metrics: MetricsCollector::new(),
            scratch: Vec::new(),
        }
    }

    /// Load the hierarchy definition at `path`
    pub fn from_definition_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(io::load_hierarchy_from_path(path)?))
    }

    #[inline]
    pub fn hierarchy(&self) -> &Hierarchy {
        self.engine.hierarchy()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Echo one update, propagate it, and write what it produced
    pub fn process_update<S: ValuationSink>(
        &mut self,
        update: &PriceUpdate,
        sink: &mut S,
    ) -> Result<Propagation> {
        sink.write_update(update)?;

        self.scratch.clear();
        let outcome = self
            .engine
            .apply_into(&update.name, update.price, &mut self.scratch);
        for valuation in &self.scratch {
            sink.write_valuation(valuation)?;
        }

        self.metrics.record_update(outcome, self.scratch.len());
        tracing::debug!(
            target: "engine",
            name = %update.name,
            price = update.price,
            emitted = self.scratch.len(),
            ?outcome,
            "Applied price update"
        );
        Ok(outcome)
    }

    /// Consume a chunked price stream into `sink`
    ///
    /// Writes the output header first and flushes at the end. The first
    /// source or sink error stops the run and is returned unchanged; rows
    /// already written stay written.
    pub fn run<I, S>(&mut self, chunks: I, sink: &mut S) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<Vec<PriceUpdate>>>,
        S: ValuationSink,
    {
        sink.write_header()?;
        for chunk in chunks {
            let chunk = chunk?;
            self.metrics.record_chunk();
            crate::log_io!(tracing::Level::TRACE, rows = chunk.len(), "Price chunk read");
            for update in &chunk {
                self.process_update(update, sink)?;
            }
        }
        sink.flush()?;

        let summary = self.metrics.snapshot();
        crate::log_engine!(
            tracing::Level::INFO,
            updates = summary.updates,
            valuations = summary.valuations,
            "Price stream consumed"
        );
        Ok(summary)
    }

    /// Load, run and write a full simulation from configured file paths
    pub fn run_files(config: &SimulationConfig) -> Result<RunSummary> {
        let mut simulator = Self::from_definition_path(&config.portfolios_path)?;
        simulator.hierarchy().log_structure("loaded");

        if let Some(dir) = config.output_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let chunks = io::price_chunks_from_path(&config.prices_path, config.chunk_size)?;
        let mut sink = CsvSink::create(&config.output_path)?;
        crate::log_engine!(
            tracing::Level::INFO,
            prices = %config.prices_path.display(),
            output = %config.output_path.display(),
            chunk_size = config.chunk_size,
            "Starting simulation"
        );

        let summary = simulator.run(chunks, &mut sink)?;
        simulator.hierarchy().log_structure("final");
        Ok(summary)
    }
}
