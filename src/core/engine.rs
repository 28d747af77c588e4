use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's phases in order: cells, canvas, file.
pub struct TableEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> TableEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Returns the path of the written image.
    pub fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting table render");
        self.monitor.log_stats("Start");

        tracing::info!("🔢 Computing cells...");
        let cells = self.pipeline.compute_cells()?;
        tracing::info!("Computed {} cells", cells.len());
        self.monitor.log_stats("Cells");

        tracing::info!("🎨 Rendering table...");
        let canvas = self.pipeline.render(&cells)?;
        tracing::info!("Rendered {}x{} canvas", canvas.width(), canvas.height());
        self.monitor.log_stats("Render");

        tracing::info!("💾 Saving image...");
        let output_path = self.pipeline.persist(canvas)?;
        tracing::info!("📁 Output saved to: {}", output_path);
        self.monitor.log_stats("Save");

        self.monitor.log_final_stats();
        Ok(output_path)
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }
}
