// src/core/engine.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::{info, debug};

use crate::config::Config;
use crate::error::MetatraceError;
use super::{render, DecodeOptions, Metaprogram};

/// Which trace to load and how; unset fields fall back to the configuration
#[derive(Debug, Clone, Default)]
pub struct TraceRequest {
    pub path: PathBuf,
    pub full_mode: bool,
    pub strict: bool,
    pub root_name: Option<String>,
    pub evaluation_result: Option<String>,
}

/// Main orchestration engine: trace file -> metaprogram -> rendered output
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Create a new engine instance from the configuration file, if any
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;

        debug!("Loaded configuration: {:?}", config);

        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Read a trace file and rebuild its metaprogram
    pub async fn load(&self, request: &TraceRequest) -> Result<Metaprogram> {
        info!("Reading trace {}", request.path.display());

        let content = tokio::fs::read_to_string(&request.path)
            .await
            .map_err(MetatraceError::from)
            .with_context(|| format!("Can't open trace file {}", request.path.display()))?;

        let options = DecodeOptions {
            strict: request.strict || self.config.trace.strict,
        };
        let full_mode = request.full_mode || self.config.display.full_mode;
        let root_name = request
            .root_name
            .as_deref()
            .unwrap_or(&self.config.trace.root_name);
        let evaluation_result = request
            .evaluation_result
            .as_deref()
            .unwrap_or(&self.config.trace.evaluation_result);

        debug!("Decoding with full_mode={}, strict={}", full_mode, options.strict);

        let metaprogram =
            Metaprogram::from_trace_json(&content, options, full_mode, root_name, evaluation_result)
                .with_context(|| format!("Failed to build metaprogram from {}", request.path.display()))?;

        Ok(metaprogram)
    }

    /// Render the call graph, wrapped to `width` or the configured width
    pub async fn forwardtrace(&self, request: &TraceRequest, width: Option<usize>) -> Result<Vec<String>> {
        let metaprogram = self.load(request).await?;
        let width = width.unwrap_or(self.config.display.width);

        if metaprogram.is_empty() {
            info!("Trace contains no instantiations");
        }
        debug!("Rendering {} frames at width {}", metaprogram.len(), width);

        Ok(render(&metaprogram, width))
    }

    pub async fn stats(&self, request: &TraceRequest, json: bool) -> Result<String> {
        let metaprogram = self.load(request).await?;
        let stats = metaprogram.get_statistics();

        if json {
            return Ok(serde_json::to_string_pretty(&stats)?);
        }

        let mut summary = format!(
            "Expression: {}\nInstantiations: {}\nTop-level: {}\nLeaves: {}\nMax depth: {}",
            metaprogram.root_name(),
            stats.total_frames,
            stats.root_frames,
            stats.leaf_frames,
            stats.max_depth
        );
        if !metaprogram.evaluation_result().is_empty() {
            summary.push_str(&format!("\nResult: {}", metaprogram.evaluation_result()));
        }
        for (kind, count) in &stats.frames_by_kind {
            summary.push_str(&format!("\n  {}: {}", kind, count));
        }
        Ok(summary)
    }

    pub async fn dump(&self, request: &TraceRequest) -> Result<String> {
        let metaprogram = self.load(request).await?;
        Ok(serde_json::to_string_pretty(&metaprogram)?)
    }

    /// Write a default `metatrace.toml` into the target directory
    pub async fn init(&self, path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
        let target_dir = path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join("metatrace.toml");

        if config_path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        tokio::fs::create_dir_all(&target_dir).await?;
        Config::default().save(&config_path)?;

        info!("Wrote configuration to {}", config_path.display());
        Ok(config_path)
    }
}
